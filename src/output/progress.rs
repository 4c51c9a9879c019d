//! Progress line shown while files are hashed.

use colored::Colorize;
use std::io::{self, IsTerminal, Write};

/// In-place progress line for a fingerprinting run.
///
/// Counts processed list entries and the bytes digested so far:
/// "Hashing files: 60% (3/5), 1.2 MiB"
pub struct Progress {
    title: String,
    total: usize,
    processed: usize,
    bytes: u64,
    /// Draws only when stderr is a TTY and output is not quiet
    visible: bool,
    /// Percentage last drawn, `None` before the first draw
    drawn: Option<u8>,
}

impl Progress {
    /// Starts a progress line for `total` entries, drawn only on a TTY.
    #[must_use]
    pub fn new(title: &str, total: usize) -> Self {
        let mut progress = Self::hidden(title, total);
        progress.visible = io::stderr().is_terminal() && total > 0;
        progress.redraw();
        progress
    }

    /// Progress that keeps counts but never draws.
    #[must_use]
    pub fn hidden(title: &str, total: usize) -> Self {
        Self {
            title: title.to_string(),
            total,
            processed: 0,
            bytes: 0,
            visible: false,
            drawn: None,
        }
    }

    /// Whether this progress writes to the terminal.
    #[must_use]
    pub const fn is_visible(&self) -> bool {
        self.visible
    }

    /// Marks one more entry as processed, `bytes` of which were hashed.
    pub fn advance(&mut self, bytes: u64) {
        self.processed = (self.processed + 1).min(self.total);
        self.bytes = self.bytes.saturating_add(bytes);
        self.redraw();
    }

    /// Completion percentage, 0 when there is nothing to do.
    #[must_use]
    pub const fn percent(&self) -> u8 {
        if self.total == 0 {
            return 0;
        }
        #[allow(clippy::cast_possible_truncation)]
        let percent = (self.processed * 100 / self.total) as u8;
        percent
    }

    /// Prints the final line.
    pub fn finish(mut self) {
        self.processed = self.total;
        if self.drawn.is_some() {
            eprintln!("\r{}, done.", self.status_line());
        }
        self.visible = false;
    }

    /// Redraws only when the percentage moved.
    fn redraw(&mut self) {
        let percent = self.percent();
        if !self.visible || self.drawn == Some(percent) {
            return;
        }
        self.drawn = Some(percent);
        eprint!("\r{}", self.status_line());
        let _ = io::stderr().flush();
    }

    fn status_line(&self) -> String {
        format!(
            "{}: {}% ({}/{}), {}",
            self.title.dimmed(),
            self.percent(),
            self.processed,
            self.total,
            format_bytes(self.bytes).dimmed()
        )
    }
}

impl Drop for Progress {
    fn drop(&mut self) {
        // Aborted midway: move off the progress line.
        if self.visible && self.drawn.is_some() {
            eprintln!();
        }
    }
}

/// Human-readable binary size, e.g. `1.5 KiB`.
#[allow(clippy::cast_precision_loss)]
fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["KiB", "MiB", "GiB", "TiB"];
    if bytes < 1024 {
        return format!("{bytes} B");
    }
    let mut value = bytes as f64 / 1024.0;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }
    format!("{value:.1} {}", UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn test_advance_counts_entries_and_bytes() {
        let mut progress = Progress::hidden("Hashing files", 4);

        progress.advance(10);
        assert_eq!(progress.percent(), 25);

        progress.advance(0);
        progress.advance(5);
        assert_eq!(progress.processed, 3);
        assert_eq!(progress.bytes, 15);
        assert_eq!(progress.percent(), 75);
    }

    #[test]
    fn test_advance_past_total_is_clamped() {
        let mut progress = Progress::hidden("Hashing files", 1);
        progress.advance(1);
        progress.advance(1);
        assert_eq!(progress.processed, 1);
        assert_eq!(progress.percent(), 100);
    }

    #[test]
    fn test_empty_run() {
        let mut progress = Progress::hidden("Hashing files", 0);
        progress.advance(3);
        assert_eq!(progress.percent(), 0);
        progress.finish();
    }

    #[test]
    fn test_hidden_never_draws() {
        let mut progress = Progress::hidden("Hashing files", 2);
        progress.advance(1);
        assert!(!progress.is_visible());
        assert_eq!(progress.drawn, None);
    }

    #[rstest]
    #[case(0, "0 B")]
    #[case(1023, "1023 B")]
    #[case(1536, "1.5 KiB")]
    #[case(10 * 1024 * 1024, "10.0 MiB")]
    fn test_format_bytes(#[case] bytes: u64, #[case] expected: &str) {
        assert_eq!(format_bytes(bytes), expected);
    }
}
