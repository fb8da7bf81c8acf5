//! Answer lookup trait

use crate::knowledge::{QuestionMatch, RoutedAnswer};
use crate::snapshot::BehaviorSnapshot;

/// Source of curated answers for visitor questions
pub trait AnswerSource: Send + Sync {
    /// Best match at or above `min_confidence`, or `None`
    fn find_match(
        &self,
        query: &str,
        context: &BehaviorSnapshot,
        min_confidence: f64,
    ) -> Option<QuestionMatch>;

    /// Response tier and shown answer, from a single scoring pass
    fn respond(
        &self,
        query: &str,
        context: &BehaviorSnapshot,
        min_confidence: f64,
    ) -> RoutedAnswer;

    /// Curated follow-up questions for an answered question
    fn related_questions(&self, question_id: &str, limit: usize) -> Vec<QuestionMatch>;
}
