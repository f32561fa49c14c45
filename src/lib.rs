//! nc_compress: lossless re-compression of NetCDF datasets
//!
//! Takes a source NetCDF file and re-writes it as NetCDF-4 with a
//! compression encoding (method + level) set on every data variable.
//! Coordinate variables are copied as they are.
//!
//! ## Module Organization
//!
//! - [`compress`]: the compression driver and command-line pipeline
//! - [`dataset`]: read-only dataset handle with per-variable encodings
//! - [`encoding`]: encoding records and their translation to storage filters
//! - [`method`]: method name dispatch
//! - [`netcdf_io`]: NetCDF writing
//! - [`metadata`]: dataset structure inspection
//! - [`progress`]: progress reporting during the write
//! - [`stats`]: file size statistics
//! - [`logging`]: logger setup
//! - [`errors`]: centralized error handling
//!
//! ## Usage
//! ```rust,no_run
//! use nc_compress::prelude::*;
//! use std::path::Path;
//!
//! let summary = nc_compress::compress::compress(
//!     Path::new("sample.nc"),
//!     Path::new("sample_compressed.nc"),
//!     &Compression::new("zlib", 9),
//!     &mut NoProgress,
//! )
//! .unwrap();
//! println!("compressed {} variables", summary.compressed.len());
//! ```

pub mod cli;
pub mod compress;
pub mod dataset;
pub mod encoding;
pub mod errors;
pub mod logging;
pub mod metadata;
pub mod method;
pub mod netcdf_io;
pub mod progress;
pub mod stats;

pub use errors::{NcCompressError, Result};

pub mod prelude {
    //! Commonly used imports for convenience
    pub use crate::compress::{compress, compress_encodings};
    pub use crate::dataset::Dataset;
    pub use crate::encoding::{Compression, StorageFilter, VariableEncoding};
    pub use crate::errors::{NcCompressError, Result};
    pub use crate::method::Method;
    pub use crate::netcdf_io::{NcChar, NetCDFWriter, WriteSummary};
    pub use crate::progress::{ConsoleProgress, NoProgress, ProgressReporter};
    pub use crate::stats::CompressionStats;
}
