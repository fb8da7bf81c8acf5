//! Nudge trigger scoring configuration

use engagement_core::TriggerWeights;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Nudge engine configuration loaded from the `nudges` section
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NudgeConfig {
    /// Weights used by triggers that do not override them
    #[serde(default)]
    pub default_weights: TriggerWeights,
    #[serde(default)]
    pub normalization: ScoreNormalization,
    #[serde(default)]
    pub adaptive: AdaptiveThresholds,
    /// Per-trigger overrides keyed by trigger id
    #[serde(default)]
    pub overrides: BTreeMap<String, TriggerOverride>,
}

impl NudgeConfig {
    pub fn override_for(&self, trigger_id: &str) -> Option<&TriggerOverride> {
        self.overrides.get(trigger_id)
    }
}

/// Saturation points used to normalize raw signals into 0-1 weights
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScoreNormalization {
    /// Time on site at which the time weight saturates
    pub time_saturation_seconds: f64,
    pub modules_saturation: f64,
    pub steps_saturation: f64,
    /// Share of the engagement weight driven by modules (rest by steps)
    pub modules_share: f64,
    pub calculator_intent_bonus: f64,
    pub pricing_intent_bonus: f64,
}

impl Default for ScoreNormalization {
    fn default() -> Self {
        Self {
            time_saturation_seconds: 600.0,
            modules_saturation: 6.0,
            steps_saturation: 5.0,
            modules_share: 0.7,
            calculator_intent_bonus: 0.3,
            pricing_intent_bonus: 0.2,
        }
    }
}

/// Per-evaluation threshold that adapts to the visitor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptiveThresholds {
    /// Threshold for high-ICP, engaged visitors
    pub engaged_high_value: f64,
    /// Threshold for passive first-time visitors
    pub passive_first_visit: f64,
    pub default: f64,
    pub high_value_min_icp: u32,
    pub engaged_min_modules: usize,
    pub passive_max_seconds: u64,
}

impl Default for AdaptiveThresholds {
    fn default() -> Self {
        Self {
            engaged_high_value: 0.5,
            passive_first_visit: 0.8,
            default: 0.7,
            high_value_min_icp: 70,
            engaged_min_modules: 2,
            passive_max_seconds: 60,
        }
    }
}

/// Override of a declared trigger's metadata
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TriggerOverride {
    #[serde(default)]
    pub enabled: Option<bool>,
    #[serde(default)]
    pub priority: Option<u8>,
    #[serde(default)]
    pub cooldown_minutes: Option<u32>,
    #[serde(default)]
    pub max_occurrences: Option<u32>,
}
