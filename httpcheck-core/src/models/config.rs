//! Engine configuration.

use std::time::Duration;

use crate::error::CoreError;

/// Default number of concurrent probes.
pub const DEFAULT_CONCURRENCY: usize = 10;

/// Largest accepted concurrency limit, the permit ceiling of tokio's
/// semaphore.
pub const MAX_CONCURRENCY: usize = usize::MAX >> 3;

/// Default idle delay between cycles.
pub const DEFAULT_CYCLE_DELAY: Duration = Duration::from_secs(30);

/// Validated engine configuration. Immutable once built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EngineConfig {
    concurrency_limit: usize,
    cycle_delay: Duration,
    disable_keep_alive: bool,
}

impl EngineConfig {
    /// Creates a configuration, rejecting a concurrency limit below one or
    /// above [`MAX_CONCURRENCY`].
    pub fn new(
        concurrency_limit: usize,
        cycle_delay: Duration,
        disable_keep_alive: bool,
    ) -> Result<Self, CoreError> {
        if concurrency_limit == 0 {
            return Err(CoreError::InvalidConfig(
                "concurrency limit must be at least 1".to_string(),
            ));
        }
        if concurrency_limit > MAX_CONCURRENCY {
            return Err(CoreError::InvalidConfig(format!(
                "concurrency limit must be at most {MAX_CONCURRENCY}"
            )));
        }
        Ok(Self {
            concurrency_limit,
            cycle_delay,
            disable_keep_alive,
        })
    }

    /// Maximum number of probes admitted at once. Always at least 1.
    pub fn concurrency_limit(&self) -> usize {
        self.concurrency_limit
    }

    /// Idle time between the end of one cycle and the start of the next.
    pub fn cycle_delay(&self) -> Duration {
        self.cycle_delay
    }

    /// Whether the transport must open a fresh connection per request.
    pub fn disable_keep_alive(&self) -> bool {
        self.disable_keep_alive
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            concurrency_limit: DEFAULT_CONCURRENCY,
            cycle_delay: DEFAULT_CYCLE_DELAY,
            disable_keep_alive: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_zero_concurrency_rejected() {
        let err = EngineConfig::new(0, Duration::from_secs(1), false).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));
    }

    #[test]
    fn test_oversized_concurrency_rejected() {
        let err = EngineConfig::new(usize::MAX, Duration::from_secs(1), false).unwrap_err();
        assert!(matches!(err, CoreError::InvalidConfig(_)));

        let config = EngineConfig::new(MAX_CONCURRENCY, Duration::from_secs(1), false).unwrap();
        assert_eq!(config.concurrency_limit(), MAX_CONCURRENCY);
    }

    #[test]
    fn test_zero_delay_allowed() {
        let config = EngineConfig::new(1, Duration::ZERO, true).unwrap();
        assert_eq!(config.concurrency_limit(), 1);
        assert_eq!(config.cycle_delay(), Duration::ZERO);
        assert!(config.disable_keep_alive());
    }

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.concurrency_limit(), 10);
        assert_eq!(config.cycle_delay(), Duration::from_secs(30));
        assert!(!config.disable_keep_alive());
    }
}
