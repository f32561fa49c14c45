//! Runs the nc_compress binary and checks exit codes and output files

mod common;

use common::create_sample_dataset;
use std::process::Command;
use tempfile::tempdir;

fn nc_compress() -> Command {
    Command::new(env!("CARGO_BIN_EXE_nc_compress"))
}

#[test]
fn test_binary_compresses_and_reports_sizes() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input = temp_dir.path().join("sample.nc");
    let output = temp_dir.path().join("sample_compressed.nc");
    create_sample_dataset(&input).expect("Failed to create NetCDF file");

    let result = nc_compress()
        .arg(&input)
        .arg(&output)
        .args(["--level", "9", "--method", "zlib"])
        .output()
        .expect("Failed to run nc_compress");

    assert_eq!(result.status.code(), Some(0));
    assert!(output.exists());
    let stderr = String::from_utf8_lossy(&result.stderr);
    assert!(stderr.contains("Compressed from"), "stderr was: {}", stderr);
    assert!(stderr.contains("nc_compress - INFO - Opening dataset from"));
}

#[test]
fn test_binary_hide_stats_suppresses_summary() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input = temp_dir.path().join("sample.nc");
    let output = temp_dir.path().join("sample_compressed.nc");
    create_sample_dataset(&input).expect("Failed to create NetCDF file");

    let result = nc_compress()
        .arg(&input)
        .arg(&output)
        .arg("--hide_stats")
        .output()
        .expect("Failed to run nc_compress");

    assert_eq!(result.status.code(), Some(0));
    assert!(output.exists());
    assert!(!String::from_utf8_lossy(&result.stderr).contains("Compressed from"));
}

#[test]
fn test_binary_xbitinfo_exits_one_without_output() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let input = temp_dir.path().join("sample.nc");
    create_sample_dataset(&input).expect("Failed to create NetCDF file");

    for method in ["xb", "xbit", "xbitinfo"] {
        let output = temp_dir.path().join(format!("{}.nc", method));
        let result = nc_compress()
            .arg(&input)
            .arg(&output)
            .args(["--method", method])
            .output()
            .expect("Failed to run nc_compress");

        assert_eq!(result.status.code(), Some(1));
        assert!(!output.exists());
        assert!(String::from_utf8_lossy(&result.stderr)
            .contains("Compression with xbitinfo has not been implemented yet"));
    }
}

#[test]
fn test_binary_missing_input_fails() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let output = temp_dir.path().join("out.nc");

    let result = nc_compress()
        .arg(temp_dir.path().join("missing.nc"))
        .arg(&output)
        .output()
        .expect("Failed to run nc_compress");

    assert_eq!(result.status.code(), Some(1));
    assert!(!output.exists());
}

#[test]
fn test_binary_usage_error() {
    let result = nc_compress()
        .arg("only_one_path.nc")
        .output()
        .expect("Failed to run nc_compress");

    assert_eq!(result.status.code(), Some(2));
}
