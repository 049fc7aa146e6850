//! Engine loop.
//!
//! `RUN_CYCLE -> SLEEP(delay) -> RUN_CYCLE -> ...` until the stop signal is
//! raised. The signal is checked before each cycle and raced against each
//! sleep; a cycle that has started always runs to its barrier.

use std::sync::Arc;

use httpcheck_core::{CoreError, EngineConfig, TargetSet, format_duration};
use tokio::sync::watch;
use tracing::{debug, info};

use crate::cycle::{CycleReport, CycleScheduler};
use crate::error::ProbeError;
use crate::gate::Gate;
use crate::probe::ProbeExecutor;
use crate::sink::OutcomeSink;
use crate::transport::Transport;

// ============================================================================
// Stop Signal
// ============================================================================

/// Creates a connected stop handle and signal.
pub fn stop_signal() -> (StopHandle, StopSignal) {
    let (tx, rx) = watch::channel(false);
    (StopHandle { tx }, StopSignal { rx })
}

/// Raises the stop signal.
#[derive(Debug, Clone)]
pub struct StopHandle {
    tx: watch::Sender<bool>,
}

impl StopHandle {
    /// Asks the engine to stop at its next check point.
    pub fn stop(&self) {
        self.tx.send_replace(true);
    }
}

/// Observed by the engine between cycles.
#[derive(Debug, Clone)]
pub struct StopSignal {
    rx: watch::Receiver<bool>,
}

impl StopSignal {
    /// A signal that is never raised.
    pub fn never() -> Self {
        let (_, rx) = watch::channel(false);
        Self { rx }
    }

    /// Returns true once the signal has been raised.
    pub fn is_stopped(&self) -> bool {
        *self.rx.borrow()
    }

    /// Resolves when the signal is raised. Never resolves if every handle
    /// was dropped without raising it.
    pub async fn stopped(&mut self) {
        loop {
            if *self.rx.borrow_and_update() {
                return;
            }
            if self.rx.changed().await.is_err() {
                std::future::pending::<()>().await;
            }
        }
    }
}

// ============================================================================
// Engine
// ============================================================================

/// Probes a fixed target set in paced cycles.
#[derive(Debug)]
pub struct Engine {
    targets: TargetSet,
    config: EngineConfig,
    scheduler: CycleScheduler,
}

impl Engine {
    /// Assembles an engine. An empty target set is refused.
    pub fn new(
        targets: TargetSet,
        config: EngineConfig,
        transport: Arc<dyn Transport>,
        sink: Arc<dyn OutcomeSink>,
    ) -> Result<Self, ProbeError> {
        if targets.is_empty() {
            return Err(CoreError::NoTargets.into());
        }

        let gate = Gate::new(config.concurrency_limit());
        let scheduler = CycleScheduler::new(gate, ProbeExecutor::new(transport, sink));

        Ok(Self {
            targets,
            config,
            scheduler,
        })
    }

    /// The gate bounding this engine's probes.
    pub fn gate(&self) -> &Gate {
        self.scheduler.gate()
    }

    /// Runs one cycle without pacing.
    pub async fn run_once(&self) -> CycleReport {
        self.scheduler.run_cycle(&self.targets).await
    }

    /// Runs cycles until `stop` is raised and returns how many completed.
    pub async fn run(&self, mut stop: StopSignal) -> u64 {
        let delay = self.config.cycle_delay();
        info!(
            targets = self.targets.len(),
            concurrency = self.gate().capacity(),
            delay = %format_duration(delay),
            keep_alive = !self.config.disable_keep_alive(),
            "engine started"
        );

        let mut cycles: u64 = 0;
        loop {
            if stop.is_stopped() {
                break;
            }

            debug!(cycle = cycles + 1, "cycle started");
            let report = self.run_once().await;
            cycles += 1;
            debug!(
                cycle = cycles,
                probed = report.probed,
                failures = report.failures,
                elapsed = %format_duration(report.elapsed),
                "cycle finished"
            );

            if stop.is_stopped() {
                break;
            }
            // The timer rounds up to the next millisecond; no delay means no sleep.
            if delay.is_zero() {
                continue;
            }
            tokio::select! {
                () = tokio::time::sleep(delay) => {}
                () = stop.stopped() => break,
            }
        }

        info!(cycles, "engine stopped");
        cycles
    }
}
