//! Probe executor.
//!
//! Runs one probe against one target: time the request, classify the
//! result, hand the outcome to the sink. Nothing escapes: transport
//! errors and even a panicking transport become failure outcomes.

use std::any::Any;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;
use httpcheck_core::{ProbeOutcome, Target};
use tokio::time::Instant;
use tracing::{debug, instrument};

use crate::sink::OutcomeSink;
use crate::transport::Transport;

/// Probes single targets through a shared transport.
#[derive(Clone)]
pub struct ProbeExecutor {
    transport: Arc<dyn Transport>,
    sink: Arc<dyn OutcomeSink>,
}

impl ProbeExecutor {
    /// Creates an executor.
    pub fn new(transport: Arc<dyn Transport>, sink: Arc<dyn OutcomeSink>) -> Self {
        Self { transport, sink }
    }

    /// Probes `target` and emits exactly one outcome, which is also
    /// returned.
    #[instrument(skip_all, fields(url = %target))]
    pub async fn probe(&self, target: Target) -> ProbeOutcome {
        let start = Instant::now();

        let result = AssertUnwindSafe(self.transport.head(&target))
            .catch_unwind()
            .await;
        let elapsed = start.elapsed();

        let outcome = match result {
            Ok(Ok(status)) => {
                debug!(status, ?elapsed, "probe succeeded");
                ProbeOutcome::success(target, elapsed, status)
            }
            Ok(Err(e)) => {
                let description = e.describe();
                debug!(error = %description, ?elapsed, "probe failed");
                ProbeOutcome::failure(target, elapsed, description)
            }
            Err(panic) => {
                let description = format!("transport panicked: {}", panic_message(&*panic));
                debug!(error = %description, "probe failed");
                ProbeOutcome::failure(target, elapsed, description)
            }
        };

        self.sink.emit(&outcome);
        outcome
    }
}

impl std::fmt::Debug for ProbeExecutor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ProbeExecutor").finish_non_exhaustive()
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s
    } else {
        "unknown panic"
    }
}
