//! Run configuration derived from command-line flags.
//!
//! Everything here is validated before the engine starts; a rejected value
//! is fatal.

use httpcheck_core::{CoreError, EngineConfig};
use httpcheck_probe::TransportSettings;

use crate::Cli;

impl Cli {
    /// Builds the engine configuration, rejecting a zero concurrency limit
    /// or a zero cycle delay.
    pub fn engine_config(&self) -> Result<EngineConfig, CoreError> {
        if self.delay.is_zero() {
            return Err(CoreError::InvalidConfig(
                "delay between cycles must be positive".to_string(),
            ));
        }
        EngineConfig::new(self.concurrency, self.delay, self.no_keep_alive)
    }

    /// Builds the transport settings for `config`.
    pub fn transport_settings(
        &self,
        config: &EngineConfig,
    ) -> Result<TransportSettings, CoreError> {
        if self.timeout.is_zero() {
            return Err(CoreError::InvalidConfig(
                "request timeout must be positive".to_string(),
            ));
        }
        Ok(TransportSettings::from_config(config).with_timeout(Some(self.timeout)))
    }
}

/// Flag default for `--delay`. Matches `httpcheck_core::DEFAULT_CYCLE_DELAY`.
pub const DEFAULT_DELAY: &str = "30s";

/// Flag default for `--timeout`. Matches `httpcheck_probe::DEFAULT_TIMEOUT`.
pub const DEFAULT_TIMEOUT: &str = "30s";
