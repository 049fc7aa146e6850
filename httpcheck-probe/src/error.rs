//! Probe engine error types.

use std::error::Error as StdError;

use httpcheck_core::CoreError;
use thiserror::Error;

// ============================================================================
// Startup Error
// ============================================================================

/// Errors that prevent the engine from starting.
#[derive(Debug, Error)]
pub enum ProbeError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[source] reqwest::Error),

    /// Invalid targets or configuration.
    #[error(transparent)]
    Core(#[from] CoreError),
}

// ============================================================================
// Transport Error
// ============================================================================

/// A single request that produced no response.
///
/// Never fatal: the probe executor turns it into a failure outcome.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The HTTP request failed (connect, TLS, timeout, protocol, redirect).
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    /// Any other transport failure.
    #[error("{0}")]
    Other(String),
}

impl TransportError {
    /// Returns true if the request hit the transport timeout.
    pub fn is_timeout(&self) -> bool {
        match self {
            TransportError::Request(e) => e.is_timeout(),
            TransportError::Other(_) => false,
        }
    }

    /// Renders the error and its whole source chain, `outer: inner: root`.
    ///
    /// reqwest keeps the useful part ("connection refused", "dns error")
    /// in the sources, so the top-level message alone is not enough for an
    /// operator reading the output stream.
    pub fn describe(&self) -> String {
        let mut description = self.to_string();
        let mut source = StdError::source(self);
        while let Some(err) = source {
            let message = err.to_string();
            if !description.ends_with(&message) {
                description.push_str(": ");
                description.push_str(&message);
            }
            source = err.source();
        }
        description
    }
}
