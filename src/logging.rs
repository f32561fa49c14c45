//! Logger setup and teardown
//!
//! Logging goes through the `log` facade with `env_logger` as the backend.
//! [`init`] installs it once for the process and hands back a
//! [`LoggerGuard`] that flushes pending output when dropped.

use crate::errors::{NcCompressError, Result};
use chrono::Local;
use env_logger::{Builder, Env};
use log::LevelFilter;
use std::io::Write;

/// Logger name shown in every line
pub const LOGGER_NAME: &str = "nc_compress";

/// Flushes the logger when dropped
#[must_use = "dropping the guard flushes the logger immediately"]
#[derive(Debug)]
pub struct LoggerGuard {
    _private: (),
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        log::logger().flush();
    }
}

/// Default filter for the given verbosity
pub fn default_level(verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    }
}

/// Install the process logger. `RUST_LOG` overrides the default filter.
///
/// # Errors
///
/// Returns [`NcCompressError::LoggerError`] if a logger is already set.
pub fn init(verbose: bool) -> Result<LoggerGuard> {
    let level = default_level(verbose);

    Builder::new()
        .filter_level(level)
        .parse_env(Env::default())
        .format(|buf, record| {
            writeln!(
                buf,
                "{} - {} - {} - {}",
                Local::now().format("%Y-%m-%d %H:%M:%S,%3f"),
                LOGGER_NAME,
                record.level(),
                record.args()
            )
        })
        .try_init()
        .map_err(|e| NcCompressError::LoggerError(e.to_string()))?;

    Ok(LoggerGuard { _private: () })
}
