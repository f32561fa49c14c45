//! Centralized error handling for nc_compress
//!
//! Every failure the compression pipeline can hit is one variant of
//! [`NcCompressError`]. Library errors from NetCDF-C and the filesystem are
//! wrapped as-is so their messages reach the user unchanged.

use thiserror::Error;

/// Main error type for nc_compress operations
#[derive(Debug, Error)]
pub enum NcCompressError {
    /// NetCDF file operation errors
    #[error("NetCDF error: {0}")]
    NetCDFError(#[from] netcdf::Error),

    /// I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// The requested method is reserved but has no implementation yet
    #[error("Compression with {method} has not been implemented yet")]
    NotImplemented { method: String },

    /// A variable's encoding names a filter the write backend cannot apply
    #[error("Variable '{var}' rejected encoding {{{method}: true, complevel: {level}}}")]
    EncodingRejected {
        var: String,
        method: String,
        level: String,
    },

    /// Variable type the writer cannot copy
    #[error("Variable '{var}' has unsupported type {vartype}")]
    UnsupportedVariableType { var: String, vartype: String },

    /// Variable not found in NetCDF file
    #[error("Variable '{var}' not found in file")]
    VariableNotFound { var: String },

    /// Output path points at the input file
    #[error("Output path {path} is the same file as the input")]
    SameInputOutput { path: String },

    /// Logger could not be installed
    #[error("Logger setup failed: {0}")]
    LoggerError(String),
}

/// Result type alias for nc_compress operations
pub type Result<T> = std::result::Result<T, NcCompressError>;
