//! Domain models for httpcheck.
//!
//! ## Submodules
//!
//! - [`target`] - Targets and the immutable target set
//! - [`config`] - Validated engine configuration
//! - [`outcome`] - Probe outcomes and their line format

pub mod config;
pub mod outcome;
pub mod target;

pub use config::{DEFAULT_CONCURRENCY, DEFAULT_CYCLE_DELAY, EngineConfig, MAX_CONCURRENCY};
pub use outcome::{ProbeOutcome, ProbeResult};
pub use target::{Target, TargetSet};
