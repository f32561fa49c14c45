//! File size statistics for a compression run

use crate::errors::Result;
use std::fmt;
use std::fs;
use std::path::Path;

const BYTES_PER_MB: f64 = 1_000_000.0;

/// Size of a file on disk, in bytes
pub fn file_size(path: &Path) -> Result<u64> {
    Ok(fs::metadata(path)?.len())
}

/// Input and output sizes of one run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CompressionStats {
    pub input_bytes: u64,
    pub output_bytes: u64,
}

impl CompressionStats {
    pub fn new(input_bytes: u64, output_bytes: u64) -> Self {
        Self {
            input_bytes,
            output_bytes,
        }
    }

    /// Stat the output, pairing it with an input size measured earlier.
    pub fn measure(input_bytes: u64, output_path: &Path) -> Result<Self> {
        Ok(Self::new(input_bytes, file_size(output_path)?))
    }

    pub fn input_mb(&self) -> f64 {
        self.input_bytes as f64 / BYTES_PER_MB
    }

    pub fn output_mb(&self) -> f64 {
        self.output_bytes as f64 / BYTES_PER_MB
    }

    /// Output size as a fraction of the input size
    pub fn ratio(&self) -> Option<f64> {
        if self.input_bytes == 0 {
            None
        } else {
            Some(self.output_bytes as f64 / self.input_bytes as f64)
        }
    }
}

impl fmt::Display for CompressionStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Compressed from {} MB to {} MB.",
            format_megabytes(self.input_mb()),
            format_megabytes(self.output_mb())
        )
    }
}

/// Two decimals with comma thousands separators, e.g. `1,234.57`
pub fn format_megabytes(mb: f64) -> String {
    let fixed = format!("{:.2}", mb.abs());
    let (whole, frac) = fixed.split_once('.').unwrap_or((fixed.as_str(), "00"));

    let mut grouped = String::with_capacity(whole.len() + whole.len() / 3);
    for (i, c) in whole.chars().enumerate() {
        if i > 0 && (whole.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    let sign = if mb < 0.0 { "-" } else { "" };
    format!("{sign}{grouped}.{frac}")
}
