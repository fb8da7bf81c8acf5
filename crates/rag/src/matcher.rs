//! Question matcher
//!
//! Scores every knowledge-base entry against a free-text query:
//!
//! - `keyword_score`: fraction of the entry's keywords that fuzzily appear
//!   among the query tokens
//! - `question_score`: fraction of the canonical question's tokens present in
//!   the query
//! - `base = keyword_weight * keyword_score + question_weight * question_score`
//! - context boosts multiply the base; the result is capped at 1.0
//!
//! The best entry wins. Confidence bands only decide how the caller responds
//! (see [`crate::fallback`]).
//!
//! # Example
//!
//! ```ignore
//! let matcher = QuestionMatcher::new(KnowledgeBase::embedded()?, MatchingConfig::default());
//! let outcome = matcher.answer("hoeveel kost het platform", &snapshot);
//! assert_eq!(outcome.tier, ResponseTier::DirectAnswer);
//! ```

use engagement_config::MatchingConfig;
use engagement_core::{
    AnswerSource, BehaviorSnapshot, KnowledgeCategory, QuestionMatch, ResponseTier, RoutedAnswer,
};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::fallback::{looks_like_question, EscalationDetector, FallbackCascade, RoutingSignals};
use crate::knowledge_loader::{KnowledgeBase, KnowledgeEntry};
use crate::text::{fuzzy_contains, normalize_phrase, token_set};

/// Entry with its keywords and question tokens pre-normalized
#[derive(Debug, Clone)]
struct IndexedEntry {
    entry: KnowledgeEntry,
    keywords: Vec<String>,
    question_tokens: BTreeSet<String>,
}

/// Routed answer for one query
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub tier: ResponseTier,
    /// Best entry at or above the minimum confidence; `None` for fallback tiers
    pub matched: Option<QuestionMatch>,
    /// The raw query asked for a human
    pub escalate: bool,
    /// No usable answer and the text reads like a question
    pub consult_llm: bool,
}

pub struct QuestionMatcher {
    base_version: String,
    entries: Vec<IndexedEntry>,
    config: MatchingConfig,
    escalation: EscalationDetector,
    cascade: FallbackCascade,
}

impl QuestionMatcher {
    pub fn new(base: KnowledgeBase, config: MatchingConfig) -> Self {
        let entries = base
            .entries()
            .iter()
            .cloned()
            .map(|entry| IndexedEntry {
                keywords: entry
                    .keywords
                    .iter()
                    .map(|k| normalize_phrase(k))
                    .filter(|k| !k.is_empty())
                    .collect(),
                question_tokens: token_set(&entry.question),
                entry,
            })
            .collect();

        Self {
            base_version: base.version().to_string(),
            entries,
            escalation: EscalationDetector::from_config(&config),
            cascade: FallbackCascade::default(),
            config,
        }
    }

    pub fn with_cascade(mut self, cascade: FallbackCascade) -> Self {
        self.cascade = cascade;
        self
    }

    pub fn knowledge_version(&self) -> &str {
        &self.base_version
    }

    pub fn config(&self) -> &MatchingConfig {
        &self.config
    }

    /// Highest-scoring entry regardless of confidence; ties keep base order
    pub fn best_candidate(&self, query: &str, context: &BehaviorSnapshot) -> Option<QuestionMatch> {
        let query_tokens = token_set(query);
        if query_tokens.is_empty() {
            return None;
        }
        let query_phrase = normalize_phrase(query);

        let mut best: Option<(&IndexedEntry, f64)> = None;
        for indexed in &self.entries {
            let score = self.score_entry(indexed, &query_tokens, &query_phrase, context);
            if best.map_or(true, |(_, top)| score > top) {
                best = Some((indexed, score));
            }
        }

        best.filter(|(_, score)| *score > 0.0)
            .map(|(indexed, score)| to_match(&indexed.entry, score))
    }

    /// Best match at or above `min_confidence`
    pub fn find_match(
        &self,
        query: &str,
        context: &BehaviorSnapshot,
        min_confidence: f64,
    ) -> Option<QuestionMatch> {
        let candidate = self.best_candidate(query, context)?;
        if candidate.confidence < min_confidence {
            tracing::debug!(
                best = %candidate.question_id,
                confidence = candidate.confidence,
                min_confidence,
                "No knowledge match above threshold"
            );
            return None;
        }

        tracing::debug!(
            question = %candidate.question_id,
            confidence = candidate.confidence,
            category = candidate.category.as_str(),
            "Knowledge match"
        );
        Some(candidate)
    }

    /// Match and route a query in one pass
    pub fn answer(&self, query: &str, context: &BehaviorSnapshot) -> MatchOutcome {
        self.answer_with_min(query, context, self.config.bands.min_confidence)
    }

    /// [`answer`](Self::answer) with a caller-chosen minimum confidence
    pub fn answer_with_min(
        &self,
        query: &str,
        context: &BehaviorSnapshot,
        min_confidence: f64,
    ) -> MatchOutcome {
        let candidate = self.best_candidate(query, context);
        let confidence = candidate.as_ref().map(|c| c.confidence).unwrap_or(0.0);
        let escalate = self.escalation.detects(query);

        let tier = self.cascade.route(&RoutingSignals {
            confidence,
            escalate,
            bands: &self.config.bands,
        });

        let matched =
            candidate.filter(|c| c.confidence >= min_confidence && !tier.is_fallback());
        let consult_llm = tier.is_fallback() && looks_like_question(query);

        if escalate {
            tracing::info!(tier = ?tier, "Visitor asked for a human");
        }

        MatchOutcome {
            tier,
            matched,
            escalate,
            consult_llm,
        }
    }

    /// Curated follow-ups sharing a category or a related module
    pub fn related_questions(&self, question_id: &str, limit: usize) -> Vec<QuestionMatch> {
        let Some(source) = self.entries.iter().find(|e| e.entry.id == question_id) else {
            return Vec::new();
        };
        let source = &source.entry;

        self.entries
            .iter()
            .map(|indexed| &indexed.entry)
            .filter(|entry| entry.id != source.id)
            .filter(|entry| {
                entry.category == source.category
                    || entry
                        .related_modules
                        .iter()
                        .any(|m| source.related_modules.contains(m))
            })
            .take(limit)
            .map(|entry| to_match(entry, 1.0))
            .collect()
    }

    fn score_entry(
        &self,
        indexed: &IndexedEntry,
        query_tokens: &BTreeSet<String>,
        query_phrase: &str,
        context: &BehaviorSnapshot,
    ) -> f64 {
        let min_len = self.config.min_fuzzy_len;

        let keyword_score = if indexed.keywords.is_empty() {
            0.0
        } else {
            let hits = indexed
                .keywords
                .iter()
                .filter(|keyword| {
                    if keyword.contains(' ') {
                        query_phrase.contains(keyword.as_str())
                    } else {
                        query_tokens
                            .iter()
                            .any(|token| fuzzy_contains(token, keyword, min_len))
                    }
                })
                .count();
            hits as f64 / indexed.keywords.len() as f64
        };

        let question_score = if indexed.question_tokens.is_empty() {
            0.0
        } else {
            let hits = indexed
                .question_tokens
                .iter()
                .filter(|token| query_tokens.contains(*token))
                .count();
            hits as f64 / indexed.question_tokens.len() as f64
        };

        let base = self.config.keyword_weight * keyword_score
            + self.config.question_weight * question_score;

        (base * self.context_boost(&indexed.entry, context)).min(1.0)
    }

    /// Product of every context boost that applies to `entry`
    fn context_boost(&self, entry: &KnowledgeEntry, context: &BehaviorSnapshot) -> f64 {
        let boosts = &self.config.boosts;
        let mut boost = 1.0;

        match entry.category {
            KnowledgeCategory::Pricing
                if context.modules_viewed_count() >= boosts.pricing_min_modules
                    || context.current_page_contains(&boosts.calculator_page_marker) =>
            {
                boost *= boosts.pricing;
            },
            KnowledgeCategory::Implementation
                if context.icp_score >= boosts.implementation_min_icp =>
            {
                boost *= boosts.implementation;
            },
            KnowledgeCategory::UseCase if context.industry.is_some() => {
                boost *= boosts.use_case;
            },
            _ => {},
        }

        if entry
            .related_modules
            .iter()
            .any(|module| context.current_page_contains(module))
        {
            boost *= boosts.related_module;
        }

        boost
    }
}

impl AnswerSource for QuestionMatcher {
    fn find_match(
        &self,
        query: &str,
        context: &BehaviorSnapshot,
        min_confidence: f64,
    ) -> Option<QuestionMatch> {
        QuestionMatcher::find_match(self, query, context, min_confidence)
    }

    fn respond(&self, query: &str, context: &BehaviorSnapshot, min_confidence: f64) -> RoutedAnswer {
        let outcome = self.answer_with_min(query, context, min_confidence);
        RoutedAnswer {
            tier: outcome.tier,
            matched: outcome.matched,
        }
    }

    fn related_questions(&self, question_id: &str, limit: usize) -> Vec<QuestionMatch> {
        QuestionMatcher::related_questions(self, question_id, limit)
    }
}

fn to_match(entry: &KnowledgeEntry, confidence: f64) -> QuestionMatch {
    QuestionMatch {
        question_id: entry.id.clone(),
        answer: entry.answer.clone(),
        confidence,
        category: entry.category,
        cta: entry.cta.clone(),
    }
}
