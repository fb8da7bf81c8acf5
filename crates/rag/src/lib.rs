//! Knowledge-base question matching
//!
//! Features:
//! - Versioned knowledge base loaded from YAML/JSON (embedded default)
//! - Unicode word tokenization with Dutch/English stop words
//! - Fuzzy keyword containment plus canonical-question token overlap
//! - Multiplicative context boosts from the visitor snapshot
//! - Ordered fallback cascade (escalation, direct, disclaimer, soft, hard)
//! - Core `AnswerSource` trait implementation

pub mod fallback;
pub mod knowledge_loader;
pub mod matcher;
pub mod text;

pub use fallback::{looks_like_question, EscalationDetector, FallbackCascade, FallbackRule, RoutingSignals};
pub use knowledge_loader::{KnowledgeBase, KnowledgeEntry, KnowledgeFile, KnowledgeGroup};
pub use matcher::{MatchOutcome, QuestionMatcher};
pub use text::{fuzzy_contains, tokenize, token_set};

use thiserror::Error;

/// Knowledge base errors
#[derive(Error, Debug)]
pub enum RagError {
    #[error("Failed to read knowledge file: {0}")]
    Io(String),

    #[error("Failed to parse knowledge file: {0}")]
    Parse(String),

    #[error("Invalid knowledge base: {0}")]
    Invalid(String),

    #[error("Not found: {0}")]
    NotFound(String),
}
