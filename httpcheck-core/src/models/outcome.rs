//! Probe outcomes.
//!
//! One [`ProbeOutcome`] is produced per probe. Its [`Display`](fmt::Display)
//! form is the line format downstream parsers consume:
//!
//! ```text
//! <target>\t<duration>\t<status>
//! ERROR:\t<target>\t<error>
//! ```

use std::fmt;
use std::time::Duration;

use crate::duration::format_duration;
use crate::models::target::Target;

/// What a probe observed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeResult {
    /// A response arrived. The status code is reported verbatim, 5xx included.
    Success(u16),
    /// No response: transport or network failure.
    Failure(String),
}

/// The recorded result of one probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProbeOutcome {
    /// The probed target.
    pub target: Target,
    /// Time from request start to completion or failure.
    pub duration: Duration,
    /// Status code or failure description.
    pub result: ProbeResult,
}

impl ProbeOutcome {
    /// Creates a success outcome.
    pub fn success(target: Target, duration: Duration, status: u16) -> Self {
        Self {
            target,
            duration,
            result: ProbeResult::Success(status),
        }
    }

    /// Creates a failure outcome.
    pub fn failure(target: Target, duration: Duration, error: impl Into<String>) -> Self {
        Self {
            target,
            duration,
            result: ProbeResult::Failure(error.into()),
        }
    }

    /// Returns true if a response was received.
    pub fn is_success(&self) -> bool {
        matches!(self.result, ProbeResult::Success(_))
    }

    /// Status code, if a response was received.
    pub fn status(&self) -> Option<u16> {
        match self.result {
            ProbeResult::Success(status) => Some(status),
            ProbeResult::Failure(_) => None,
        }
    }

    /// Failure description, if the probe failed.
    pub fn error(&self) -> Option<&str> {
        match &self.result {
            ProbeResult::Success(_) => None,
            ProbeResult::Failure(e) => Some(e),
        }
    }
}

impl fmt::Display for ProbeOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match &self.result {
            ProbeResult::Success(status) => write!(
                f,
                "{}\t{}\t{}",
                self.target,
                format_duration(self.duration),
                status
            ),
            ProbeResult::Failure(error) => write!(f, "ERROR:\t{}\t{}", self.target, error),
        }
    }
}
