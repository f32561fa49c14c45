//! Defines command-line interface options using `clap` for nc_compress.

use crate::encoding::{Compression, DEFAULT_LEVEL};
use crate::method::DEFAULT_METHOD;
use clap::Parser;
use std::path::PathBuf;

/// Take a source NetCDF and compress it.
///
/// Optionally it can use xbitinfo to try to smartly discard unused bits
/// for higher compression with `--method=xbitinfo` (not implemented yet).
///
/// Example usage:
///     nc_compress /path/to/uncompressed.nc /path/to/compressed.nc
#[derive(Parser, Debug, Clone)]
#[command(name = "nc_compress", version, about, long_about)]
pub struct Args {
    /// Input NetCDF
    pub input_path: PathBuf,

    /// Output compressed NetCDF
    pub output_path: PathBuf,

    /// Compression level (default: 5)
    #[arg(short, long, default_value_t = DEFAULT_LEVEL, allow_negative_numbers = true)]
    pub level: i32,

    /// Compression method (default: zlib)
    #[arg(short, long, default_value = DEFAULT_METHOD)]
    pub method: String,

    /// Hide compression statistics
    #[arg(long = "hide_stats", visible_alias = "hide-stats")]
    pub hide_stats: bool,

    /// Enable the byte shuffle filter ahead of compression
    #[arg(long)]
    pub shuffle: bool,

    /// Never draw a progress bar, even on a terminal
    #[arg(long = "no_progress", visible_alias = "no-progress")]
    pub no_progress: bool,

    /// Enable verbose (debug) logging.
    #[arg(short, long, default_value_t = false)]
    pub verbose: bool,
}

impl Args {
    /// The option pair to apply to every data variable
    pub fn compression(&self) -> Compression {
        Compression::new(self.method.clone(), self.level).with_shuffle(self.shuffle)
    }
}
