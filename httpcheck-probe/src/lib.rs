// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # httpcheck Probe
//!
//! The probe cycle engine: bounded-concurrency fan-out of HEAD probes over
//! a fixed target set, a join barrier per cycle, and a fixed idle delay
//! between cycles.
//!
//! ```text
//! Engine::run
//!   └── loop until StopSignal
//!       ├── CycleScheduler::run_cycle
//!       │   ├── Gate::acquire (in target order, may wait)
//!       │   ├── spawn ProbeExecutor::probe  ── Transport::head
//!       │   │                               └── OutcomeSink::emit
//!       │   └── join every probe (barrier)
//!       └── sleep(cycle_delay)
//! ```
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use httpcheck_core::{EngineConfig, TargetSet};
//! use httpcheck_probe::{Engine, HttpTransport, StopSignal, TransportSettings};
//!
//! let config = EngineConfig::new(10, Duration::from_secs(30), false)?;
//! let transport = HttpTransport::new(&TransportSettings::from_config(&config))?;
//! let engine = Engine::new(
//!     TargetSet::load("urls.txt")?,
//!     config,
//!     Arc::new(transport),
//!     Arc::new(|outcome: &ProbeOutcome| println!("{outcome}")),
//! )?;
//! engine.run(StopSignal::never()).await;
//! ```

pub mod cycle;
pub mod engine;
pub mod error;
pub mod gate;
pub mod probe;
pub mod sink;
pub mod transport;

pub use cycle::{CycleReport, CycleScheduler};
pub use engine::{Engine, StopHandle, StopSignal, stop_signal};
pub use error::{ProbeError, TransportError};
pub use gate::{Gate, GatePermit};
pub use probe::ProbeExecutor;
pub use sink::OutcomeSink;
pub use transport::{DEFAULT_TIMEOUT, HttpTransport, Transport, TransportSettings};
