//! Response-tier routing
//!
//! The cascade is an ordered list of `(predicate, tier)` rules evaluated top
//! down; the first rule that holds decides the tier. Escalation comes first
//! and looks only at the raw query, so a visitor asking for a human is
//! escalated even when a confident answer exists.

use engagement_config::{ConfidenceBands, MatchingConfig};
use engagement_core::ResponseTier;

use crate::text::normalize_phrase;

/// Inputs the routing rules look at
#[derive(Debug, Clone, Copy)]
pub struct RoutingSignals<'a> {
    /// Best candidate score, 0.0 when the knowledge base has no candidate
    pub confidence: f64,
    pub escalate: bool,
    pub bands: &'a ConfidenceBands,
}

#[derive(Clone, Copy)]
pub struct FallbackRule {
    pub name: &'static str,
    pub tier: ResponseTier,
    pub predicate: fn(&RoutingSignals<'_>) -> bool,
}

impl std::fmt::Debug for FallbackRule {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FallbackRule")
            .field("name", &self.name)
            .field("tier", &self.tier)
            .finish()
    }
}

/// Ordered routing rules
#[derive(Debug, Clone)]
pub struct FallbackCascade {
    rules: Vec<FallbackRule>,
}

impl Default for FallbackCascade {
    fn default() -> Self {
        Self {
            rules: vec![
                FallbackRule {
                    name: "escalation",
                    tier: ResponseTier::Escalation,
                    predicate: |s| s.escalate,
                },
                FallbackRule {
                    name: "direct_answer",
                    tier: ResponseTier::DirectAnswer,
                    predicate: |s| s.confidence >= s.bands.direct_answer,
                },
                FallbackRule {
                    name: "answer_with_disclaimer",
                    tier: ResponseTier::AnswerWithDisclaimer,
                    predicate: |s| s.confidence >= s.bands.disclaimer,
                },
                FallbackRule {
                    name: "soft_fallback",
                    tier: ResponseTier::SoftFallback,
                    predicate: |s| s.confidence >= s.bands.soft_fallback,
                },
                FallbackRule {
                    name: "hard_fallback",
                    tier: ResponseTier::HardFallback,
                    predicate: |_| true,
                },
            ],
        }
    }
}

impl FallbackCascade {
    pub fn new(rules: Vec<FallbackRule>) -> Self {
        Self { rules }
    }

    pub fn rules(&self) -> &[FallbackRule] {
        &self.rules
    }

    /// First matching tier; hard fallback when no rule holds
    pub fn route(&self, signals: &RoutingSignals<'_>) -> ResponseTier {
        self.rules
            .iter()
            .find(|rule| (rule.predicate)(signals))
            .map(|rule| {
                tracing::trace!(rule = rule.name, confidence = signals.confidence, "Routed query");
                rule.tier
            })
            .unwrap_or(ResponseTier::HardFallback)
    }
}

/// Detects requests for a human in the raw query
#[derive(Debug, Clone)]
pub struct EscalationDetector {
    /// Normalized phrases, matched as substrings so inflections still hit
    phrases: Vec<String>,
}

impl EscalationDetector {
    pub fn new<I, S>(keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let phrases = keywords
            .into_iter()
            .map(|k| normalize_phrase(k.as_ref()))
            .filter(|k| !k.is_empty())
            .collect();
        Self { phrases }
    }

    pub fn from_config(config: &MatchingConfig) -> Self {
        Self::new(&config.escalation_keywords)
    }

    pub fn detects(&self, query: &str) -> bool {
        let normalized = normalize_phrase(query);
        self.phrases
            .iter()
            .any(|phrase| normalized.contains(phrase.as_str()))
    }
}

const INTERROGATIVES: &[&str] = &[
    "wat", "hoe", "hoeveel", "waarom", "wanneer", "waar", "wie", "welke", "welk", "kan", "kun",
    "kunnen", "is", "zijn", "heeft", "hebben", "werkt", "doet", "moet", "what", "how", "why",
    "when", "where", "who", "which", "can", "could", "does", "do", "is", "are", "will", "should",
];

/// Whether free text reads like a question the LLM collaborator could answer
pub fn looks_like_question(text: &str) -> bool {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.ends_with('?') {
        return true;
    }

    normalize_phrase(trimmed)
        .split(' ')
        .next()
        .map(|first| INTERROGATIVES.contains(&first))
        .unwrap_or(false)
}
