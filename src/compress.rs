//! Compression driver
//!
//! Opens a dataset, sets the requested encoding on every data variable and
//! writes the result. [`run`] wraps this with the command-line pipeline:
//! size measurement, method dispatch, progress and statistics.

use crate::cli::Args;
use crate::dataset::Dataset;
use crate::encoding::Compression;
use crate::errors::{NcCompressError, Result};
use crate::method::Method;
use crate::metadata::log_structure;
use crate::netcdf_io::WriteSummary;
use crate::progress::{self, ProgressReporter};
use crate::stats::{file_size, CompressionStats};
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Set `{method: true, complevel: level}` on every data variable.
pub fn compress_encodings<'d>(
    ds: &'d mut Dataset,
    compression: &Compression,
) -> Result<&'d mut Dataset> {
    let data_vars = ds.data_vars();

    debug!(
        "Setting compression to {} for [{}]",
        compression,
        data_vars.join(", ")
    );

    for var in &data_vars {
        ds.encoding_mut(var)?.update(compression);
    }

    Ok(ds)
}

/// Load, compress, and write out a dataset.
///
/// The input is released before returning, on success or failure.
pub fn compress(
    input_path: &Path,
    output_path: &Path,
    compression: &Compression,
    progress: &mut dyn ProgressReporter,
) -> Result<WriteSummary> {
    ensure_distinct(input_path, output_path)?;

    info!("Opening dataset from {}", input_path.display());
    let mut ds = Dataset::open(input_path)?;
    log_structure(&ds.metadata());

    compress_encodings(&mut ds, compression)?;

    info!("Saving compressed NetCDF to {}", output_path.display());
    let summary = ds.to_netcdf(output_path, progress)?;

    ds.close();
    Ok(summary)
}

/// Run the full command-line pipeline.
///
/// Returns the size statistics unless `hide_stats` is set.
pub fn run(args: &Args) -> Result<Option<CompressionStats>> {
    let input_bytes = file_size(&args.input_path)?;

    let method = Method::parse(&args.method).into_lossless()?;
    debug!("Using lossless method {}", method);

    let mut reporter = progress::resolve(!args.no_progress);
    debug!("Progress bar shown: {}", reporter.is_visible());
    compress(
        &args.input_path,
        &args.output_path,
        &args.compression(),
        reporter.as_mut(),
    )?;

    if args.hide_stats {
        return Ok(None);
    }

    let stats = CompressionStats::measure(input_bytes, &args.output_path)?;
    info!("{}", stats);
    Ok(Some(stats))
}

/// Refuse to write over the input, including through a symlink or a hard
/// link to the same file.
fn ensure_distinct(input_path: &Path, output_path: &Path) -> Result<()> {
    if !output_path.exists() {
        return Ok(());
    }
    if same_file(input_path, output_path)? {
        return Err(NcCompressError::SameInputOutput {
            path: output_path.display().to_string(),
        });
    }
    Ok(())
}

#[cfg(unix)]
fn same_file(a: &Path, b: &Path) -> Result<bool> {
    use std::os::unix::fs::MetadataExt;

    let (a, b) = (fs::metadata(a)?, fs::metadata(b)?);
    Ok(a.dev() == b.dev() && a.ino() == b.ino())
}

#[cfg(not(unix))]
fn same_file(a: &Path, b: &Path) -> Result<bool> {
    Ok(fs::canonicalize(a)? == fs::canonicalize(b)?)
}
