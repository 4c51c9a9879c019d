//! Terminal output for driftcheck.
//!
//! - Dimmed colors for routine messages
//! - Bold colors for warnings and errors
//! - A progress bar while hashing
//! - Verbosity control (quiet, normal, verbose)
//! - [`report`]: rendering of reconciliation results

mod progress;
pub mod report;

use colored::Colorize;
use std::sync::atomic::{AtomicU8, Ordering};

pub use progress::Progress;

/// Verbosity level for output messages.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verbosity {
    /// Suppress informational messages, show only warnings and errors.
    Quiet = 0,
    /// Default verbosity level, show all standard messages.
    Normal = 1,
    /// Show verbose debug messages in addition to standard output.
    Verbose = 2,
}

/// Global verbosity setting (default: Normal).
static VERBOSITY: AtomicU8 = AtomicU8::new(1);

/// Sets the global verbosity level for all output functions.
pub fn set_verbosity(level: Verbosity) {
    VERBOSITY.store(level as u8, Ordering::Relaxed);
}

/// Gets the current global verbosity level.
pub fn get_verbosity() -> Verbosity {
    match VERBOSITY.load(Ordering::Relaxed) {
        0 => Verbosity::Quiet,
        2 => Verbosity::Verbose,
        _ => Verbosity::Normal,
    }
}

/// Prints a plain line to stdout (respects quiet mode).
pub fn line(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    println!("{message}");
}

/// Prints an informational message in dimmed color (respects quiet mode).
pub fn info(message: &str) {
    if get_verbosity() == Verbosity::Quiet {
        return;
    }
    eprintln!("{}", message.dimmed());
}

/// Prints a warning message in bold yellow (always shown).
pub fn warning(message: &str) {
    eprintln!("{}", message.yellow().bold());
}

/// Highlights a file name inside a message.
#[must_use]
pub fn file_name(name: &str) -> String {
    name.cyan().to_string()
}

/// Starts a new progress bar for tracking long operations.
#[must_use]
pub fn start_progress(title: &str, total: usize) -> Progress {
    if get_verbosity() == Verbosity::Quiet {
        return Progress::hidden(title, total);
    }
    Progress::new(title, total)
}
