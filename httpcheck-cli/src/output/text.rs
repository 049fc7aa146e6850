//! Text output: one tab-separated line per outcome.

use chrono::{DateTime, Local};
use httpcheck_core::ProbeOutcome;

/// Timestamp prefix layout, `2024/05/01 13:45:10`.
const TIMESTAMP_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Formats outcomes as `<target>\t<duration>\t<status>` or
/// `ERROR:\t<target>\t<error>`, optionally prefixed with local time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TextFormatter {
    timestamps: bool,
}

impl TextFormatter {
    /// Creates a new text formatter.
    pub fn new(timestamps: bool) -> Self {
        Self { timestamps }
    }

    /// Formats one outcome observed at `at`.
    pub fn format(&self, outcome: &ProbeOutcome, at: DateTime<Local>) -> String {
        if self.timestamps {
            format!("{} {outcome}", at.format(TIMESTAMP_FORMAT))
        } else {
            outcome.to_string()
        }
    }
}
