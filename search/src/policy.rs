//! Search budget.
//!
//! The engine consults [`SearchLimits`] at every iteration boundary and
//! stops with `BudgetExhausted` once a limit is reached. Stopping never
//! leaves partial state behind that needs cleanup.

use std::time::Duration;

use crate::error::ConfigError;

/// Expansion and wall-clock limits. `None` means unlimited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SearchLimits {
    /// Hard cap on node expansions.
    pub max_expansions: Option<u64>,
    /// Hard cap on elapsed time since the search started.
    pub max_time: Option<Duration>,
}

impl SearchLimits {
    #[must_use]
    pub fn unlimited() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_max_expansions(mut self, max: u64) -> Self {
        self.max_expansions = Some(max);
        self
    }

    #[must_use]
    pub fn with_max_time(mut self, max: Duration) -> Self {
        self.max_time = Some(max);
        self
    }

    /// Reject limits that can never allow a single expansion.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLimit`] for a zero expansion cap or a
    /// zero time budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_expansions == Some(0) {
            return Err(ConfigError::InvalidLimit {
                detail: "max_expansions must be at least 1".into(),
            });
        }
        if self.max_time == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidLimit {
                detail: "max_time must be positive".into(),
            });
        }
        Ok(())
    }

    /// Whether a run with `expanded` expansions after `elapsed` must stop.
    #[must_use]
    pub fn exhausted(&self, expanded: u64, elapsed: Duration) -> bool {
        self.max_expansions.is_some_and(|max| expanded >= max)
            || self.max_time.is_some_and(|max| elapsed >= max)
    }
}
