//! Compression method dispatch
//!
//! Method names are mostly passed straight through to the encoding layer.
//! The one exception is the family of aliases reserved for xbitinfo-style
//! smart bit discarding, which is not available yet.

use crate::errors::{NcCompressError, Result};

/// Names that select smart bit discarding.
pub const SMART_BIT_DISCARD_ALIASES: [&str; 3] = ["xb", "xbit", "xbitinfo"];

/// Default method when none is given on the command line
pub const DEFAULT_METHOD: &str = "zlib";

/// How a requested method will be handled
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Method {
    /// Reserved for smart bit discarding (not implemented)
    SmartBitDiscard(String),
    /// Lossless filter, name passed through uninterpreted
    Lossless(String),
}

impl Method {
    /// Classify a method name. Matching is exact and case-sensitive.
    pub fn parse(name: &str) -> Self {
        if SMART_BIT_DISCARD_ALIASES.contains(&name) {
            Method::SmartBitDiscard(name.to_string())
        } else {
            Method::Lossless(name.to_string())
        }
    }

    /// Unwrap the lossless method name, or fail for reserved methods.
    pub fn into_lossless(self) -> Result<String> {
        match self {
            Method::Lossless(name) => Ok(name),
            Method::SmartBitDiscard(_) => Err(NcCompressError::NotImplemented {
                method: "xbitinfo".to_string(),
            }),
        }
    }
}
