//! JSON-lines output formatting.

use anyhow::Result;
use chrono::{DateTime, Utc};
use httpcheck_core::{ProbeOutcome, ProbeResult, Target, format_duration};
use serde::{Serialize, Serializer};

// ============================================================================
// Output Types
// ============================================================================

/// JSON output for a single outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OutcomeOutput<'a> {
    #[serde(serialize_with = "serialize_datetime")]
    pub timestamp: DateTime<Utc>,
    pub target: &'a Target,
    pub duration_ms: f64,
    pub duration: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<u16>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<&'a str>,
}

impl<'a> OutcomeOutput<'a> {
    fn new(outcome: &'a ProbeOutcome, at: DateTime<Utc>) -> Self {
        let (status, error) = match &outcome.result {
            ProbeResult::Success(status) => (Some(*status), None),
            ProbeResult::Failure(error) => (None, Some(error.as_str())),
        };
        Self {
            timestamp: at,
            target: &outcome.target,
            duration_ms: outcome.duration.as_secs_f64() * 1_000.0,
            duration: format_duration(outcome.duration),
            status,
            error,
        }
    }
}

fn serialize_datetime<S>(dt: &DateTime<Utc>, s: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    s.serialize_str(&dt.to_rfc3339())
}

// ============================================================================
// JSON Formatter
// ============================================================================

/// Formats outcomes as single-line JSON objects.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonFormatter;

impl JsonFormatter {
    /// Creates a new JSON formatter.
    pub fn new() -> Self {
        Self
    }

    /// Formats one outcome observed at `at`.
    pub fn format(&self, outcome: &ProbeOutcome, at: DateTime<Utc>) -> Result<String> {
        Ok(serde_json::to_string(&OutcomeOutput::new(outcome, at))?)
    }
}
