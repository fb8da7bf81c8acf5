//! Question matcher configuration

use serde::{Deserialize, Serialize};

use crate::constants::confidence;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchingConfig {
    #[serde(default = "default_keyword_weight")]
    pub keyword_weight: f64,
    #[serde(default = "default_question_weight")]
    pub question_weight: f64,
    #[serde(default)]
    pub boosts: ContextBoosts,
    #[serde(default)]
    pub bands: ConfidenceBands,
    /// Shorter side of a fuzzy keyword comparison must have at least this many chars
    #[serde(default = "default_min_fuzzy_len")]
    pub min_fuzzy_len: usize,
    /// Raw-query phrases that route to a human regardless of confidence
    #[serde(default = "default_escalation_keywords")]
    pub escalation_keywords: Vec<String>,
}

impl Default for MatchingConfig {
    fn default() -> Self {
        Self {
            keyword_weight: default_keyword_weight(),
            question_weight: default_question_weight(),
            boosts: ContextBoosts::default(),
            bands: ConfidenceBands::default(),
            min_fuzzy_len: default_min_fuzzy_len(),
            escalation_keywords: default_escalation_keywords(),
        }
    }
}

/// Multiplicative context boosts
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextBoosts {
    pub pricing: f64,
    pub pricing_min_modules: usize,
    /// Page path marker identifying the calculator page
    pub calculator_page_marker: String,
    pub implementation: f64,
    pub implementation_min_icp: u32,
    pub use_case: f64,
    pub related_module: f64,
}

impl Default for ContextBoosts {
    fn default() -> Self {
        Self {
            pricing: 1.5,
            pricing_min_modules: 3,
            calculator_page_marker: "calculator".to_string(),
            implementation: 1.3,
            implementation_min_icp: 70,
            use_case: 1.2,
            related_module: 1.4,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfidenceBands {
    pub direct_answer: f64,
    pub disclaimer: f64,
    pub soft_fallback: f64,
    /// Default `min_confidence` for `find_match`
    pub min_confidence: f64,
}

impl Default for ConfidenceBands {
    fn default() -> Self {
        Self {
            direct_answer: confidence::DIRECT_ANSWER,
            disclaimer: confidence::DISCLAIMER,
            soft_fallback: confidence::SOFT_FALLBACK,
            min_confidence: confidence::DEFAULT_MIN,
        }
    }
}

fn default_keyword_weight() -> f64 {
    0.7
}

fn default_question_weight() -> f64 {
    0.3
}

fn default_min_fuzzy_len() -> usize {
    3
}

fn default_escalation_keywords() -> Vec<String> {
    [
        "medewerker",
        "met iemand spreken",
        "echt persoon",
        "mens spreken",
        "bel me",
        "terugbellen",
        "klacht",
        "human",
        "real person",
        "speak to someone",
        "call me",
        "complaint",
    ]
    .iter()
    .map(|k| k.to_string())
    .collect()
}
