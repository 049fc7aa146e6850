//! Output formatting for CLI.
//!
//! Outcomes go to stdout, one line each; diagnostics go to stderr through
//! tracing.

mod json;
mod text;

use std::io::{Write, stdout};

use chrono::{Local, Utc};
use httpcheck_core::ProbeOutcome;
use httpcheck_probe::OutcomeSink;
use tracing::warn;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::OutputFormat;

/// Writes each outcome as one line on stdout.
///
/// Every line is written under the stdout lock, so outcomes from
/// concurrent probes never interleave.
#[derive(Debug, Clone, Copy)]
pub struct StdoutSink {
    format: OutputFormat,
    text: TextFormatter,
    json: JsonFormatter,
}

impl StdoutSink {
    /// Creates a sink for the given format.
    pub fn new(format: OutputFormat, timestamps: bool) -> Self {
        Self {
            format,
            text: TextFormatter::new(timestamps),
            json: JsonFormatter::new(),
        }
    }

    /// Renders one outcome without the trailing newline.
    pub fn render(&self, outcome: &ProbeOutcome) -> anyhow::Result<String> {
        match self.format {
            OutputFormat::Text => Ok(self.text.format(outcome, Local::now())),
            OutputFormat::Json => self.json.format(outcome, Utc::now()),
        }
    }
}

impl OutcomeSink for StdoutSink {
    fn emit(&self, outcome: &ProbeOutcome) {
        let line = match self.render(outcome) {
            Ok(line) => line,
            Err(e) => {
                warn!(url = %outcome.target, error = %e, "failed to render outcome");
                return;
            }
        };

        let mut out = stdout().lock();
        if let Err(e) = writeln!(out, "{line}").and_then(|()| out.flush()) {
            warn!(error = %e, "failed to write outcome");
        }
    }
}
