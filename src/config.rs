//! Scheduler configuration.
//!
//! Weights and the fallback threshold are tied together: with the defaults a
//! single High conflict (100) outweighs the worst case of every item taking a
//! Medium conflict (`N × 10` for `N < 10`), which is what makes "minimum score
//! ≥ 100" mean "every assignment hits a High conflict".

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constraints::Severity;

/// Score at or above which the overflow slot is opened up.
pub const DEFAULT_FALLBACK_THRESHOLD: u64 = 100;

/// Largest accepted severity weight. Keeps summed conflict costs well inside
/// the integer range of every search strategy.
pub const MAX_SEVERITY_WEIGHT: u64 = 1 << 32;

/// Conflict cost per severity tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct SeverityWeights {
    pub low: u64,
    pub medium: u64,
    pub high: u64,
}

impl SeverityWeights {
    pub fn weight(&self, severity: Severity) -> u64 {
        match severity {
            Severity::Low => self.low,
            Severity::Medium => self.medium,
            Severity::High => self.high,
        }
    }
}

impl Default for SeverityWeights {
    fn default() -> Self {
        Self {
            low: 1,
            medium: 10,
            high: 100,
        }
    }
}

/// Which search backs each scheduling phase.
///
/// Both strategies return the same assignment for the same input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "snake_case"))]
pub enum SearchStrategy {
    /// Enumerate every slot combination and item ordering.
    #[default]
    Exhaustive,
    /// Hungarian-algorithm matching, then a lexicographic reconstruction of
    /// the first optimal assignment in enumeration order.
    Matching,
}

/// Configuration for the two-phase [`Scheduler`](crate::scheduler::Scheduler).
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SchedulerConfig {
    /// Cost of a conflict per severity tier.
    pub weights: SeverityWeights,
    /// Phase-1 score at or above which Phase 2 runs.
    pub fallback_threshold: u64,
    /// Search used for each phase.
    pub strategy: SearchStrategy,
    /// Maximum search nodes per exhaustive phase; `None` searches everything.
    pub node_budget: Option<u64>,
}

impl SchedulerConfig {
    pub fn with_weights(mut self, weights: SeverityWeights) -> Self {
        self.weights = weights;
        self
    }

    pub fn with_fallback_threshold(mut self, threshold: u64) -> Self {
        self.fallback_threshold = threshold;
        self
    }

    pub fn with_strategy(mut self, strategy: SearchStrategy) -> Self {
        self.strategy = strategy;
        self
    }

    pub fn with_node_budget(mut self, budget: u64) -> Self {
        self.node_budget = Some(budget);
        self
    }

    /// Checks that weights keep their severity order and stay below
    /// [`MAX_SEVERITY_WEIGHT`], and that the budget is usable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let w = self.weights;
        if !(w.low < w.medium && w.medium < w.high) {
            return Err(ConfigError::WeightsNotIncreasing {
                low: w.low,
                medium: w.medium,
                high: w.high,
            });
        }
        if w.high > MAX_SEVERITY_WEIGHT {
            return Err(ConfigError::WeightTooLarge {
                weight: w.high,
                max: MAX_SEVERITY_WEIGHT,
            });
        }
        if self.node_budget == Some(0) {
            return Err(ConfigError::ZeroBudget);
        }
        Ok(())
    }

    /// Parses and validates a JSON configuration. Missing fields take their
    /// defaults.
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}

impl Default for SchedulerConfig {
    fn default() -> Self {
        Self {
            weights: SeverityWeights::default(),
            fallback_threshold: DEFAULT_FALLBACK_THRESHOLD,
            strategy: SearchStrategy::default(),
            node_budget: None,
        }
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Severity weights must increase from Low to High (got {low}, {medium}, {high})")]
    WeightsNotIncreasing { low: u64, medium: u64, high: u64 },

    #[error("Severity weight {weight} exceeds the maximum of {max}")]
    WeightTooLarge { weight: u64, max: u64 },

    #[error("Node budget must be greater than zero")]
    ZeroBudget,

    #[cfg(feature = "serde")]
    #[error("Invalid configuration: {0}")]
    Parse(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let cfg = SchedulerConfig::default();
        assert_eq!(cfg.validate(), Ok(()));
        assert_eq!(cfg.fallback_threshold, 100);
        assert_eq!(cfg.strategy, SearchStrategy::Exhaustive);
        assert_eq!(cfg.node_budget, None);
    }

    #[test]
    fn default_weights() {
        let w = SeverityWeights::default();
        assert_eq!(w.weight(Severity::Low), 1);
        assert_eq!(w.weight(Severity::Medium), 10);
        assert_eq!(w.weight(Severity::High), 100);
    }

    #[test]
    fn one_high_outweighs_six_mediums() {
        let w = SeverityWeights::default();
        assert!(6 * w.medium < w.high);
    }

    #[test]
    fn unordered_weights_rejected() {
        let cfg = SchedulerConfig::default().with_weights(SeverityWeights {
            low: 5,
            medium: 5,
            high: 100,
        });
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::WeightsNotIncreasing { .. })
        ));
    }

    #[test]
    fn oversized_weight_rejected() {
        let cfg = SchedulerConfig::default().with_weights(SeverityWeights {
            low: 1,
            medium: 2,
            high: 1 << 62,
        });
        assert_eq!(
            cfg.validate(),
            Err(ConfigError::WeightTooLarge {
                weight: 1 << 62,
                max: MAX_SEVERITY_WEIGHT,
            })
        );

        let at_limit = SchedulerConfig::default().with_weights(SeverityWeights {
            low: 1,
            medium: 2,
            high: MAX_SEVERITY_WEIGHT,
        });
        assert_eq!(at_limit.validate(), Ok(()));
    }

    #[test]
    fn zero_budget_rejected() {
        let cfg = SchedulerConfig::default().with_node_budget(0);
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroBudget));
    }

    #[cfg(feature = "serde")]
    #[test]
    fn partial_json_uses_defaults() {
        let cfg = SchedulerConfig::from_json(r#"{"strategy":"matching","node_budget":5000}"#)
            .unwrap();
        assert_eq!(cfg.strategy, SearchStrategy::Matching);
        assert_eq!(cfg.node_budget, Some(5000));
        assert_eq!(cfg.weights, SeverityWeights::default());
    }

    #[cfg(feature = "serde")]
    #[test]
    fn invalid_json_weights_rejected() {
        let json = r#"{"weights":{"low":10,"medium":1,"high":100}}"#;
        assert!(matches!(
            SchedulerConfig::from_json(json),
            Err(ConfigError::WeightsNotIncreasing { .. })
        ));
    }
}
