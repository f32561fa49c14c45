//! Entry point for nc_compress.
//! Handles CLI parsing and logger setup, then hands off to the compression driver.

use clap::Parser;
use log::error;
use nc_compress::cli::Args;
use nc_compress::{compress, logging};
use std::process::ExitCode;

fn main() -> ExitCode {
    // Parse command-line arguments
    let args = Args::parse();

    let _logger = match logging::init(args.verbose) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    match compress::run(&args) {
        Ok(_) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}
