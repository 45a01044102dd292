//! Run configuration, loaded from JSON.
//!
//! Every field has a default, so `{}` is a valid configuration: unlimited
//! budget, true operator costs, no lazy evaluator, caching on.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use waymark_search::astar::{LazyEvaluatorKind, ShortestAstarOptions};
use waymark_search::cache::EvaluatorOptions;
use waymark_search::error::ConfigError;
use waymark_search::evaluator::CostType;
use waymark_search::policy::SearchLimits;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct SearchConfigV1 {
    pub max_expansions: Option<u64>,
    pub max_time_ms: Option<u64>,
    pub cost_type: CostType,
    pub lazy: LazyEvaluatorKind,
    pub cache_estimates: bool,
}

impl Default for SearchConfigV1 {
    fn default() -> Self {
        Self {
            max_expansions: None,
            max_time_ms: None,
            cost_type: CostType::Normal,
            lazy: LazyEvaluatorKind::None,
            cache_estimates: true,
        }
    }
}

impl SearchConfigV1 {
    /// Parse a configuration from JSON text.
    ///
    /// # Errors
    ///
    /// Returns the `serde_json` error for malformed JSON, unknown fields or
    /// mistyped values.
    pub fn from_json_str(text: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(text)
    }

    /// Reject budgets that can never allow an expansion.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidLimit`] for a zero expansion or time
    /// budget.
    pub fn validate(&self) -> Result<(), ConfigError> {
        self.limits().validate()
    }

    #[must_use]
    pub fn limits(&self) -> SearchLimits {
        SearchLimits {
            max_expansions: self.max_expansions,
            max_time: self.max_time_ms.map(Duration::from_millis),
        }
    }

    #[must_use]
    pub fn to_options(&self) -> ShortestAstarOptions {
        ShortestAstarOptions {
            lazy: self.lazy,
            cost_type: self.cost_type,
            limits: self.limits(),
            evaluator_options: EvaluatorOptions {
                cache_estimates: self.cache_estimates,
            },
        }
    }

    /// JSON form bound into reports. Integer-only, so it canonicalizes.
    #[must_use]
    pub fn to_json_value(&self) -> Value {
        // Serializing a plain struct of integers, enums and bools cannot fail.
        serde_json::to_value(self).unwrap_or_else(|_| json!({}))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_is_default() {
        let config = SearchConfigV1::from_json_str("{}").unwrap();
        assert_eq!(config, SearchConfigV1::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn fields_parse() {
        let config = SearchConfigV1::from_json_str(
            r#"{"max_expansions": 10, "max_time_ms": 500, "cost_type": "one", "lazy": "d", "cache_estimates": false}"#,
        )
        .unwrap();
        assert_eq!(config.max_expansions, Some(10));
        assert_eq!(config.cost_type, CostType::One);
        assert_eq!(config.lazy, LazyEvaluatorKind::Distance);
        let options = config.to_options();
        assert_eq!(options.limits.max_time, Some(Duration::from_millis(500)));
        assert!(!options.evaluator_options.cache_estimates);
    }

    #[test]
    fn unknown_field_rejected() {
        assert!(SearchConfigV1::from_json_str(r#"{"max_depth": 3}"#).is_err());
    }

    #[test]
    fn zero_budgets_rejected() {
        let config = SearchConfigV1 {
            max_expansions: Some(0),
            ..SearchConfigV1::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidLimit { .. })
        ));
        let config = SearchConfigV1 {
            max_time_ms: Some(0),
            ..SearchConfigV1::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn json_value_round_trips_lazy_names() {
        let config = SearchConfigV1 {
            lazy: LazyEvaluatorKind::Heuristic,
            ..SearchConfigV1::default()
        };
        let v = config.to_json_value();
        assert_eq!(v["lazy"], "h");
        assert_eq!(v["cost_type"], "normal");
        assert!(v["max_expansions"].is_null());
    }
}
