//! Outcome sinks.
//!
//! The engine hands every [`ProbeOutcome`] to an [`OutcomeSink`] the moment
//! it is produced and keeps nothing. Rendering and destination are the
//! sink's business.

use httpcheck_core::ProbeOutcome;

/// Receives probe outcomes, possibly from many probes at once.
pub trait OutcomeSink: Send + Sync {
    /// Consumes one outcome. Must not block for long: probes call this
    /// while holding their admission slot.
    fn emit(&self, outcome: &ProbeOutcome);
}

impl<F> OutcomeSink for F
where
    F: Fn(&ProbeOutcome) + Send + Sync,
{
    fn emit(&self, outcome: &ProbeOutcome) {
        self(outcome);
    }
}
