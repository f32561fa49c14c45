//! Progress reporting for the write step
//!
//! The writer reports how many bytes of variable data it has copied through
//! a [`ProgressReporter`]. Which reporter is used is decided once at startup
//! by [`resolve`]; when no terminal is attached the no-op [`NoProgress`] is
//! used and the write happens quietly.

use log::debug;
use std::io::{IsTerminal, Write};
use std::time::Instant;

/// Observer of the write pipeline. All methods default to no-ops.
pub trait ProgressReporter {
    /// Called once before any data is copied
    fn start(&mut self, _total_bytes: u64) {}

    /// Called after a slab of `bytes` of `var_name` has been written
    fn advance(&mut self, _var_name: &str, _bytes: u64) {}

    /// Called once after the last variable
    fn finish(&mut self) {}

    /// Whether this reporter draws anything
    fn is_visible(&self) -> bool {
        false
    }
}

/// Reporter that does nothing
#[derive(Debug, Default, Clone, Copy)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {}

const BAR_WIDTH: usize = 40;

/// Single-line progress bar redrawn on stderr
#[derive(Debug)]
pub struct ConsoleProgress {
    total: u64,
    done: u64,
    started: Instant,
}

impl ConsoleProgress {
    pub fn new() -> Self {
        Self {
            total: 0,
            done: 0,
            started: Instant::now(),
        }
    }

    fn fraction(&self) -> f64 {
        if self.total == 0 {
            1.0
        } else {
            (self.done as f64 / self.total as f64).min(1.0)
        }
    }

    fn draw(&self, label: &str) {
        let filled = (self.fraction() * BAR_WIDTH as f64).round() as usize;
        let line = format!(
            "\r[{}{}] | {:3.0}% Completed | {:.1}s | {}",
            "#".repeat(filled),
            " ".repeat(BAR_WIDTH - filled),
            self.fraction() * 100.0,
            self.started.elapsed().as_secs_f64(),
            label
        );
        let mut stderr = std::io::stderr().lock();
        // Progress output is best effort
        let _ = stderr.write_all(line.as_bytes());
        let _ = stderr.flush();
    }
}

impl Default for ConsoleProgress {
    fn default() -> Self {
        Self::new()
    }
}

impl ProgressReporter for ConsoleProgress {
    fn start(&mut self, total_bytes: u64) {
        self.total = total_bytes;
        self.done = 0;
        self.started = Instant::now();
        self.draw("");
    }

    fn advance(&mut self, var_name: &str, bytes: u64) {
        self.done += bytes;
        self.draw(var_name);
    }

    fn finish(&mut self) {
        self.done = self.total;
        self.draw("done");
        eprintln!();
    }

    fn is_visible(&self) -> bool {
        true
    }
}

/// Pick the reporter for this process.
///
/// Returns a [`ConsoleProgress`] only if progress is `enabled` and stderr is
/// a terminal.
pub fn resolve(enabled: bool) -> Box<dyn ProgressReporter> {
    if !enabled {
        debug!("Progress display disabled, saving quietly.");
        Box::new(NoProgress)
    } else if !std::io::stderr().is_terminal() {
        debug!("stderr is not a terminal, saving quietly.");
        Box::new(NoProgress)
    } else {
        Box::new(ConsoleProgress::new())
    }
}
