//! Per-variable storage encodings
//!
//! An encoding is a small record of filter flags keyed by method name plus
//! a compression level. It is mutated in place while the dataset is open and
//! only turned into a concrete storage filter when the dataset is written.

use crate::errors::{NcCompressError, Result};
use std::collections::BTreeMap;
use std::fmt;

/// Method name of the deflate filter NetCDF-C applies natively
pub const ZLIB: &str = "zlib";

/// Level NetCDF-4 uses when deflate is enabled without an explicit level
pub const DEFAULT_DEFLATE_LEVEL: i32 = 4;

/// Default level for the command line
pub const DEFAULT_LEVEL: i32 = 5;

/// The option pair applied to every data variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Compression {
    pub method: String,
    pub level: i32,
    pub shuffle: bool,
}

impl Compression {
    pub fn new(method: impl Into<String>, level: i32) -> Self {
        Self {
            method: method.into(),
            level,
            shuffle: false,
        }
    }

    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }
}

impl Default for Compression {
    fn default() -> Self {
        Self::new(ZLIB, DEFAULT_LEVEL)
    }
}

impl fmt::Display for Compression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}: true, complevel: {}", self.method, self.level)?;
        if self.shuffle {
            write!(f, ", shuffle: true")?;
        }
        write!(f, "}}")
    }
}

/// Storage encoding of a single variable
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VariableEncoding {
    pub filters: BTreeMap<String, bool>,
    pub complevel: Option<i32>,
    pub shuffle: bool,
}

/// Filter the writer applies to a variable
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageFilter {
    Uncompressed,
    Deflate { level: i32, shuffle: bool },
}

impl VariableEncoding {
    /// Merge `{method: true, complevel: level}` into this encoding.
    pub fn update(&mut self, compression: &Compression) {
        self.filters.insert(compression.method.clone(), true);
        self.complevel = Some(compression.level);
        self.shuffle = compression.shuffle;
    }

    /// Names of the filters switched on, in sorted order
    pub fn enabled_filters(&self) -> Vec<&str> {
        self.filters
            .iter()
            .filter(|(_, &on)| on)
            .map(|(name, _)| name.as_str())
            .collect()
    }

    /// Translate the encoding into a filter for `var_name`.
    ///
    /// The level is not range-checked here; NetCDF-C rejects it on write if
    /// it is out of range.
    ///
    /// # Errors
    ///
    /// Returns [`NcCompressError::EncodingRejected`] if any enabled filter
    /// is not deflate.
    pub fn resolve(&self, var_name: &str) -> Result<StorageFilter> {
        let enabled = self.enabled_filters();

        if let Some(unknown) = enabled.iter().find(|&&name| name != ZLIB) {
            return Err(NcCompressError::EncodingRejected {
                var: var_name.to_string(),
                method: unknown.to_string(),
                level: self
                    .complevel
                    .map(|l| l.to_string())
                    .unwrap_or_else(|| "unset".to_string()),
            });
        }

        if enabled.is_empty() {
            Ok(StorageFilter::Uncompressed)
        } else {
            Ok(StorageFilter::Deflate {
                level: self.complevel.unwrap_or(DEFAULT_DEFLATE_LEVEL),
                shuffle: self.shuffle,
            })
        }
    }
}
