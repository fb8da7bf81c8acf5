//! Journey paths and next-best-action thresholds

use engagement_core::Industry;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::modules::{
    AD_BUILDER, ANALYTICS, BRAND_VOICE, CAMPAIGN_MANAGER, CONTENT_ENGINE, PUBLISHING,
};

/// Journey configuration for the next-best-action predictor
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JourneyConfig {
    /// Modules a complete journey covers
    #[serde(default = "default_target_modules")]
    pub target_modules: Vec<String>,
    /// industry → last viewed module → ordered next-module suggestions
    #[serde(default = "default_paths")]
    pub paths: BTreeMap<Industry, BTreeMap<String, Vec<String>>>,
    #[serde(default = "default_minutes_per_module")]
    pub minutes_per_module: f64,
    /// Share of progress (0-100) earned by viewing all target modules
    #[serde(default = "default_modules_weight")]
    pub modules_weight: u32,
    #[serde(default = "default_bonus")]
    pub calculator_bonus: u32,
    #[serde(default = "default_bonus")]
    pub demo_bonus: u32,
    #[serde(default)]
    pub thresholds: PredictorThresholds,
}

impl Default for JourneyConfig {
    fn default() -> Self {
        Self {
            target_modules: default_target_modules(),
            paths: default_paths(),
            minutes_per_module: default_minutes_per_module(),
            modules_weight: default_modules_weight(),
            calculator_bonus: default_bonus(),
            demo_bonus: default_bonus(),
            thresholds: PredictorThresholds::default(),
        }
    }
}

impl JourneyConfig {
    /// Next-module suggestions after `module_id`.
    ///
    /// Falls back to the `other` table when the industry is unknown or has
    /// no entry for the module.
    pub fn next_modules(&self, industry: Option<Industry>, module_id: &str) -> &[String] {
        let lookup = |industry: Industry| {
            self.paths
                .get(&industry)
                .and_then(|table| table.get(module_id))
                .map(|next| next.as_slice())
        };

        industry
            .and_then(lookup)
            .or_else(|| lookup(Industry::Other))
            .unwrap_or(&[])
    }
}

/// Heuristic thresholds for candidate generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PredictorThresholds {
    /// ICP score above which a calculator-complete visitor is pushed to a demo
    pub demo_min_icp: u32,
    pub calculator_min_modules: usize,
    pub calculator_min_seconds: u64,
    /// Exact module count that earns an encouragement
    pub milestone_modules: usize,
    pub chat_min_seconds: u64,
    pub chat_max_modules: usize,
    pub resume_min_inactivity_seconds: u64,
}

impl Default for PredictorThresholds {
    fn default() -> Self {
        Self {
            demo_min_icp: 70,
            calculator_min_modules: 2,
            calculator_min_seconds: 120,
            milestone_modules: 3,
            chat_min_seconds: 180,
            chat_max_modules: 1,
            resume_min_inactivity_seconds: 120,
        }
    }
}

fn default_target_modules() -> Vec<String> {
    [
        CONTENT_ENGINE,
        AD_BUILDER,
        CAMPAIGN_MANAGER,
        ANALYTICS,
        PUBLISHING,
        BRAND_VOICE,
    ]
    .iter()
    .map(|m| m.to_string())
    .collect()
}

fn path(entries: &[(&str, &[&str])]) -> BTreeMap<String, Vec<String>> {
    entries
        .iter()
        .map(|(from, to)| {
            (
                from.to_string(),
                to.iter().map(|m| m.to_string()).collect(),
            )
        })
        .collect()
}

fn default_paths() -> BTreeMap<Industry, BTreeMap<String, Vec<String>>> {
    BTreeMap::from([
        (
            Industry::Ecommerce,
            path(&[
                (CONTENT_ENGINE, &[AD_BUILDER, CAMPAIGN_MANAGER]),
                (AD_BUILDER, &[CAMPAIGN_MANAGER, ANALYTICS]),
                (CAMPAIGN_MANAGER, &[ANALYTICS, PUBLISHING]),
                (ANALYTICS, &[PUBLISHING, BRAND_VOICE]),
                (PUBLISHING, &[BRAND_VOICE, CONTENT_ENGINE]),
                (BRAND_VOICE, &[CONTENT_ENGINE, AD_BUILDER]),
            ]),
        ),
        (
            Industry::Saas,
            path(&[
                (CONTENT_ENGINE, &[BRAND_VOICE, PUBLISHING]),
                (BRAND_VOICE, &[PUBLISHING, ANALYTICS]),
                (PUBLISHING, &[ANALYTICS, CAMPAIGN_MANAGER]),
                (ANALYTICS, &[CAMPAIGN_MANAGER, AD_BUILDER]),
                (CAMPAIGN_MANAGER, &[AD_BUILDER, CONTENT_ENGINE]),
                (AD_BUILDER, &[CONTENT_ENGINE, BRAND_VOICE]),
            ]),
        ),
        (
            Industry::Agency,
            path(&[
                (CAMPAIGN_MANAGER, &[ANALYTICS, AD_BUILDER]),
                (ANALYTICS, &[AD_BUILDER, CONTENT_ENGINE]),
                (AD_BUILDER, &[CONTENT_ENGINE, BRAND_VOICE]),
                (CONTENT_ENGINE, &[BRAND_VOICE, PUBLISHING]),
                (BRAND_VOICE, &[PUBLISHING, CAMPAIGN_MANAGER]),
                (PUBLISHING, &[CAMPAIGN_MANAGER, ANALYTICS]),
            ]),
        ),
        (
            Industry::Other,
            path(&[
                (CONTENT_ENGINE, &[AD_BUILDER, BRAND_VOICE]),
                (AD_BUILDER, &[CAMPAIGN_MANAGER, CONTENT_ENGINE]),
                (CAMPAIGN_MANAGER, &[ANALYTICS, AD_BUILDER]),
                (ANALYTICS, &[PUBLISHING, CAMPAIGN_MANAGER]),
                (PUBLISHING, &[BRAND_VOICE, ANALYTICS]),
                (BRAND_VOICE, &[CONTENT_ENGINE, PUBLISHING]),
            ]),
        ),
    ])
}

fn default_minutes_per_module() -> f64 {
    3.0
}

fn default_modules_weight() -> u32 {
    70
}

fn default_bonus() -> u32 {
    15
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_industry_has_a_full_path_table() {
        let config = JourneyConfig::default();
        for industry in Industry::ALL {
            let table = &config.paths[&industry];
            for module in &config.target_modules {
                assert!(table.contains_key(module), "{:?} missing {}", industry, module);
            }
        }
    }

    #[test]
    fn test_next_modules_falls_back_to_other() {
        let config = JourneyConfig::default();
        assert_eq!(
            config.next_modules(Some(Industry::Ecommerce), CONTENT_ENGINE),
            &[AD_BUILDER.to_string(), CAMPAIGN_MANAGER.to_string()]
        );
        assert_eq!(
            config.next_modules(None, CONTENT_ENGINE),
            config.next_modules(Some(Industry::Other), CONTENT_ENGINE)
        );
        assert!(config.next_modules(None, "unknown-module").is_empty());
    }

    #[test]
    fn test_progress_weights_sum_to_100() {
        let config = JourneyConfig::default();
        assert_eq!(config.modules_weight + config.calculator_bonus + config.demo_bonus, 100);
    }
}
