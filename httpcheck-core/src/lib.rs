// Lint configuration for this crate
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::must_use_candidate)]

//! # httpcheck Core
//!
//! Core types shared by the probe engine and the command-line tool:
//!
//! - [`Target`] / [`TargetSet`] - endpoints to probe, loaded once
//! - [`EngineConfig`] - validated concurrency, delay and keep-alive settings
//! - [`ProbeOutcome`] / [`ProbeResult`] - the result of a single probe
//! - [`format_duration`] / [`parse_duration`] - duration notation used in
//!   flags and output
//! - [`CoreError`] - conditions that stop the engine from starting

pub mod duration;
pub mod error;
pub mod models;

pub use duration::{format_duration, parse_duration};
pub use error::CoreError;
pub use models::{
    DEFAULT_CONCURRENCY, DEFAULT_CYCLE_DELAY, EngineConfig, MAX_CONCURRENCY, ProbeOutcome,
    ProbeResult, Target, TargetSet,
};
