//! Cycle scheduler.
//!
//! One cycle is one pass over the target set. Targets are admitted through
//! the [`Gate`] in list order on the calling task; each admitted probe runs
//! on its own tokio task and carries its permit until it finishes. The
//! cycle returns only after every spawned probe has finished.

use std::sync::Arc;
use std::time::Duration;

use httpcheck_core::TargetSet;
use tokio::task::JoinSet;
use tokio::time::Instant;
use tracing::warn;

use crate::gate::Gate;
use crate::probe::ProbeExecutor;

/// Summary of one finished cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CycleReport {
    /// Probes that finished (one per target).
    pub probed: usize,
    /// Probes that produced a failure outcome.
    pub failures: usize,
    /// Wall time from first admission to the barrier releasing.
    pub elapsed: Duration,
}

/// Runs cycles over a target set under a concurrency ceiling.
#[derive(Debug)]
pub struct CycleScheduler {
    gate: Gate,
    executor: Arc<ProbeExecutor>,
}

impl CycleScheduler {
    /// Creates a scheduler.
    pub fn new(gate: Gate, executor: ProbeExecutor) -> Self {
        Self {
            gate,
            executor: Arc::new(executor),
        }
    }

    /// The gate bounding this scheduler's probes.
    pub fn gate(&self) -> &Gate {
        &self.gate
    }

    /// Probes every target once and waits for all of them.
    ///
    /// Admission may block when the gate is full. An empty set completes
    /// immediately.
    pub async fn run_cycle(&self, targets: &TargetSet) -> CycleReport {
        let start = Instant::now();
        let mut probes = JoinSet::new();

        for target in targets {
            let permit = self.gate.acquire().await;
            let executor = Arc::clone(&self.executor);
            let target = target.clone();

            probes.spawn(async move {
                let outcome = executor.probe(target).await;
                drop(permit);
                outcome.is_success()
            });
        }

        let mut report = CycleReport {
            probed: 0,
            failures: 0,
            elapsed: Duration::ZERO,
        };
        while let Some(joined) = probes.join_next().await {
            report.probed += 1;
            match joined {
                Ok(true) => {}
                Ok(false) => report.failures += 1,
                Err(e) => {
                    warn!(error = %e, "probe task did not complete");
                    report.failures += 1;
                }
            }
        }

        report.elapsed = start.elapsed();
        report
    }
}
