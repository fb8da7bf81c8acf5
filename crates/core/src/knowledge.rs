//! Knowledge-base answer types

use serde::{Deserialize, Serialize};

use crate::action::CallToAction;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum KnowledgeCategory {
    Pricing,
    Features,
    Implementation,
    UseCase,
    General,
}

impl KnowledgeCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pricing => "pricing",
            Self::Features => "features",
            Self::Implementation => "implementation",
            Self::UseCase => "use-case",
            Self::General => "general",
        }
    }
}

/// A knowledge-base entry matched against a visitor question
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuestionMatch {
    pub question_id: String,
    pub answer: String,
    /// 0.0-1.0
    pub confidence: f64,
    pub category: KnowledgeCategory,
    pub cta: Option<CallToAction>,
}

/// Tier and match derived from one scoring pass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoutedAnswer {
    pub tier: ResponseTier,
    /// `None` for fallback tiers and below the minimum confidence
    pub matched: Option<QuestionMatch>,
}

/// How the caller should respond, given match confidence and query content
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResponseTier {
    /// Confidence >= 0.5: answer directly
    DirectAnswer,
    /// 0.3 <= confidence < 0.5: answer, flagged as possibly off-target
    AnswerWithDisclaimer,
    /// 0.2 <= confidence < 0.3
    SoftFallback,
    /// Confidence < 0.2
    HardFallback,
    /// Query asks for a human, regardless of confidence
    Escalation,
}

impl ResponseTier {
    /// Whether the matched answer should be shown
    pub fn shows_answer(&self) -> bool {
        matches!(self, Self::DirectAnswer | Self::AnswerWithDisclaimer)
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::SoftFallback | Self::HardFallback)
    }
}
