//! Core error types for `httpcheck`.
//!
//! Every variant here is a startup condition: the engine refuses to start
//! when one of them is returned. Probe-level failures never surface as a
//! [`CoreError`].

use std::path::PathBuf;

use thiserror::Error;

/// Core error type for `httpcheck` startup.
#[derive(Debug, Error)]
pub enum CoreError {
    /// The target list contained no usable entries.
    #[error("no urls to check")]
    NoTargets,

    /// Invalid configuration.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// A duration string could not be parsed.
    #[error("invalid duration {input:?}: {reason}")]
    InvalidDuration {
        /// The rejected input.
        input: String,
        /// What was wrong with it.
        reason: &'static str,
    },

    /// The target list could not be read.
    #[error("cannot read {}: {source}", path.display())]
    Io {
        /// Path of the target list.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },
}

impl CoreError {
    pub(crate) fn invalid_duration(input: &str, reason: &'static str) -> Self {
        CoreError::InvalidDuration {
            input: input.to_string(),
            reason,
        }
    }
}
