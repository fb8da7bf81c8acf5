//! Evaluation facade
//!
//! Runs one evaluation cycle: ICP Scorer first (its total feeds the
//! snapshot), then the nudge engine, achievement evaluator and predictor
//! independently. Inputs are borrowed, outputs are new values; the caller
//! stores the returned history and unlocked set.

use chrono::{DateTime, Utc};
use engagement_config::{DomainConfig, EngineSettings, Settings};
use engagement_core::{
    AnswerSource, BehaviorSnapshot, IcpScoringStrategy, NextBestAction, Nudge, NudgeHistory,
    ProfileInput, QuestionMatch, ResponseTier, RoutedAnswer, ScoreBreakdown, UnlockedSet,
};
use engagement_rag::{looks_like_question, KnowledgeBase, QuestionMatcher};
use serde::Serialize;
use std::sync::Arc;

use crate::achievements::{Achievement, AchievementEvaluator, AchievementProgress};
use crate::icp_scoring::IcpScorer;
use crate::next_action::NextActionPredictor;
use crate::nudges::NudgeEngine;
use crate::timing::typing_delay;
use crate::AgentError;

/// Decisions for one evaluation cycle
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationOutcome {
    /// Present when a profile was supplied
    pub icp: Option<ScoreBreakdown>,
    pub nudge: Option<Nudge>,
    pub new_achievements: Vec<Achievement>,
    /// Input set plus `new_achievements`
    pub unlocked: UnlockedSet,
    pub achievement_progress: AchievementProgress,
    pub suggested_achievement: Option<Achievement>,
    pub next_action: Option<NextBestAction>,
    pub journey_progress: u32,
}

/// Routed answer for a visitor question
#[derive(Debug, Clone, Serialize)]
pub struct AnswerOutcome {
    pub tier: ResponseTier,
    pub matched: Option<QuestionMatch>,
    pub related: Vec<QuestionMatch>,
    /// The caller should hand the question to the LLM collaborator
    pub consult_llm: bool,
    pub typing_delay_ms: u64,
}

pub struct EngagementEngine {
    scorer: Arc<dyn IcpScoringStrategy>,
    nudges: NudgeEngine,
    achievements: AchievementEvaluator,
    predictor: NextActionPredictor,
    answers: Arc<dyn AnswerSource>,
    settings: EngineSettings,
}

impl EngagementEngine {
    /// Engine over built-in tables and the given answer source
    pub fn new(domain: &DomainConfig, answers: Arc<dyn AnswerSource>) -> Self {
        Self {
            scorer: Arc::new(IcpScorer::from_config(&domain.icp)),
            nudges: NudgeEngine::from_config(&domain.nudges),
            achievements: AchievementEvaluator::from_config(&domain.achievements),
            predictor: NextActionPredictor::from_config(&domain.journeys),
            answers,
            settings: EngineSettings::default(),
        }
    }

    /// Load domain tables and knowledge base named by `settings`
    pub fn from_settings(settings: &Settings) -> Result<Self, AgentError> {
        let domain = match &settings.domain_config_path {
            Some(path) => DomainConfig::load(path)?,
            None => DomainConfig::default(),
        };
        let base = KnowledgeBase::load_or_embedded(settings.knowledge_base_path.as_deref())?;

        tracing::info!(
            environment = ?settings.environment,
            knowledge_version = %base.version(),
            knowledge_entries = base.len(),
            "Engagement engine initialized"
        );

        let matcher = QuestionMatcher::new(base, domain.matching.clone());
        Ok(Self::new(&domain, Arc::new(matcher)).with_settings(settings.engine.clone()))
    }

    pub fn with_settings(mut self, settings: EngineSettings) -> Self {
        self.settings = settings;
        self
    }

    pub fn with_scorer(mut self, scorer: Arc<dyn IcpScoringStrategy>) -> Self {
        self.scorer = scorer;
        self
    }

    pub fn nudges(&self) -> &NudgeEngine {
        &self.nudges
    }

    pub fn achievements(&self) -> &AchievementEvaluator {
        &self.achievements
    }

    pub fn predictor(&self) -> &NextActionPredictor {
        &self.predictor
    }

    pub fn score_profile(&self, profile: &ProfileInput) -> ScoreBreakdown {
        self.scorer.score(profile)
    }

    pub fn evaluate(
        &self,
        profile: Option<&ProfileInput>,
        snapshot: &BehaviorSnapshot,
        history: &NudgeHistory,
        unlocked: &UnlockedSet,
    ) -> EvaluationOutcome {
        let icp = profile.map(|p| self.scorer.score(p));
        let scored;
        let snapshot = match &icp {
            Some(breakdown) => {
                scored = snapshot.clone().with_icp_score(breakdown.total_score);
                &scored
            },
            None => snapshot,
        };

        let nudge = self.nudges.select_nudge(snapshot, history);
        let new_achievements = self.achievements.check_all(snapshot, unlocked);
        let unlocked = unlocked.with_unlocked(new_achievements.iter().map(|a| a.id));
        let achievement_progress = self.achievements.progress(&unlocked);
        let suggested_achievement = self.achievements.next_suggested_achievement(snapshot, &unlocked);
        let next_action = self.predictor.predict(snapshot);
        let journey_progress = self.predictor.calculate_journey_progress(snapshot);

        tracing::debug!(
            icp_score = snapshot.icp_score,
            nudge = nudge.as_ref().map(|n| n.trigger_id.as_str()),
            new_achievements = new_achievements.len(),
            next_action = next_action.as_ref().map(|a| a.id.as_str()),
            journey_progress,
            "Evaluation cycle complete"
        );

        EvaluationOutcome {
            icp,
            nudge,
            new_achievements,
            unlocked,
            achievement_progress,
            suggested_achievement,
            next_action,
            journey_progress,
        }
    }

    /// History after the caller displayed `nudge`
    pub fn record_nudge_shown(
        &self,
        nudge: &Nudge,
        history: &NudgeHistory,
        shown_at: DateTime<Utc>,
    ) -> NudgeHistory {
        self.nudges.update_history(&nudge.trigger_id, history, shown_at)
    }

    /// Match and route a visitor question. `seed` drives the typing jitter.
    pub fn answer(&self, query: &str, snapshot: &BehaviorSnapshot, seed: u64) -> AnswerOutcome {
        let RoutedAnswer { tier, matched } =
            self.answers.respond(query, snapshot, self.settings.min_answer_confidence);

        let related = match (&matched, tier.shows_answer()) {
            (Some(m), true) => self
                .answers
                .related_questions(&m.question_id, self.settings.related_questions_limit),
            _ => Vec::new(),
        };

        let reply_len = matched.as_ref().map(|m| m.answer.chars().count()).unwrap_or(0);
        let delay = typing_delay(reply_len, seed, &self.settings.typing);

        AnswerOutcome {
            consult_llm: tier.is_fallback() && looks_like_question(query),
            tier,
            matched,
            related,
            typing_delay_ms: delay.as_millis() as u64,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engagement_core::{ChannelsCount, Industry, PainPoint, TeamSize};
    use engagement_config::MatchingConfig;

    fn engine() -> EngagementEngine {
        let matcher = QuestionMatcher::new(KnowledgeBase::embedded().unwrap(), MatchingConfig::default());
        EngagementEngine::new(&DomainConfig::default(), Arc::new(matcher))
    }

    fn weekday() -> BehaviorSnapshot {
        BehaviorSnapshot::new(DateTime::parse_from_rfc3339("2024-06-11T14:00:00+02:00").unwrap())
    }

    #[test]
    fn test_profile_score_feeds_snapshot() {
        let profile = ProfileInput::new(
            TeamSize::Medium,
            ChannelsCount::Many,
            [PainPoint::AgencyCost, PainPoint::ScalingProblem],
            Industry::Ecommerce,
        );
        let snapshot = weekday().with_module("analytics");

        let outcome = engine().evaluate(Some(&profile), &snapshot, &NudgeHistory::new(), &UnlockedSet::new());

        assert_eq!(outcome.icp.unwrap().total_score, 100);
        let ids: Vec<_> = outcome.new_achievements.iter().map(|a| a.id).collect();
        assert!(ids.contains(&"perfect_fit"));
        assert!(outcome.unlocked.contains("perfect_fit"));
        assert_eq!(outcome.nudge.unwrap().trigger_id, "first_module_viewed");
    }

    #[test]
    fn test_evaluate_without_profile_keeps_snapshot_score() {
        let snapshot = weekday().with_icp_score(40);
        let outcome = engine().evaluate(None, &snapshot, &NudgeHistory::new(), &UnlockedSet::new());
        assert!(outcome.icp.is_none());
        assert!(outcome.nudge.is_none());
        assert!(outcome.new_achievements.is_empty());
        assert_eq!(outcome.journey_progress, 0);
    }

    #[test]
    fn test_record_nudge_shown() {
        let engine = engine();
        let snapshot = weekday().with_module("analytics");
        let outcome = engine.evaluate(None, &snapshot, &NudgeHistory::new(), &UnlockedSet::new());
        let nudge = outcome.nudge.unwrap();

        let history = engine.record_nudge_shown(&nudge, &NudgeHistory::new(), snapshot.captured_at_utc());
        assert_eq!(history.count(&nudge.trigger_id), 1);

        let again = engine.evaluate(None, &snapshot, &history, &outcome.unlocked);
        assert!(again.nudge.is_none());
        assert!(again.new_achievements.is_empty());
    }

    #[test]
    fn test_answer_with_related_questions() {
        let outcome = engine().answer("hoeveel kost het platform", &weekday(), 1);
        assert_eq!(outcome.tier, ResponseTier::DirectAnswer);
        assert_eq!(outcome.matched.unwrap().question_id, "pricing_cost");
        assert_eq!(outcome.related.len(), 3);
        assert!(!outcome.consult_llm);
        assert!(outcome.typing_delay_ms >= 600);
    }

    #[test]
    fn test_unknown_question_consults_llm() {
        let outcome = engine().answer("Hebben jullie een kantoor in Gent?", &weekday(), 1);
        assert!(outcome.matched.is_none());
        assert!(outcome.related.is_empty());
        assert!(outcome.consult_llm);
    }

    #[test]
    fn test_tier_and_match_agree_with_low_minimum() {
        let base = KnowledgeBase::new(
            "test",
            vec![engagement_rag::KnowledgeEntry {
                id: "support_hours".to_string(),
                question: "Hoe werkt onze helpdesk?".to_string(),
                keywords: vec![
                    "support".to_string(),
                    "helpdesk".to_string(),
                    "service".to_string(),
                    "contact".to_string(),
                ],
                answer: "Elke werkdag van 9 tot 17 uur.".to_string(),
                category: engagement_core::KnowledgeCategory::General,
                related_modules: Vec::new(),
                cta: None,
            }],
        )
        .unwrap();
        let matcher = QuestionMatcher::new(base, MatchingConfig::default());
        let settings = EngineSettings {
            min_answer_confidence: 0.1,
            ..EngineSettings::default()
        };
        let engine = EngagementEngine::new(&DomainConfig::default(), Arc::new(matcher))
            .with_settings(settings);

        // confidence 0.175: above the caller minimum, inside the hard fallback band
        let outcome = engine.answer("support", &weekday(), 1);
        assert_eq!(outcome.tier, ResponseTier::HardFallback);
        assert!(outcome.matched.is_none());
        assert!(outcome.related.is_empty());
    }
}
