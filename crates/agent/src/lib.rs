//! Engagement decision engine
//!
//! Features:
//! - ICP Scorer: profile attributes to a 0-100 score and tier
//! - Nudge Trigger Engine: at most one proactive nudge per cycle, with
//!   multi-signal scoring, milestone-first resolution, cooldowns and caps
//! - Achievement Evaluator: idempotent unlocks, points, tier ladder, next goal
//! - Next-Best-Action Predictor: prioritized heuristics over the journey
//! - Seeded typing delay for assistant replies
//! - [`EngagementEngine`] facade running a full evaluation cycle
//!
//! Every decision is a pure function of its inputs. State that survives a
//! cycle (`NudgeHistory`, `UnlockedSet`) is passed in and returned as a new
//! value; the engine reads no clock and holds no mutable state.

pub mod achievements;
pub mod engine;
pub mod icp_scoring;
pub mod next_action;
pub mod nudges;
pub mod timing;

pub use achievements::{Achievement, AchievementEvaluator, AchievementProgress, UnlockRule};
pub use engine::{AnswerOutcome, EngagementEngine, EvaluationOutcome};
pub use icp_scoring::IcpScorer;
pub use next_action::NextActionPredictor;
pub use nudges::{
    adaptive_threshold, calculate_trigger_score, Ineligibility, NudgeEngine, NudgeTrigger,
    ScoreThreshold, ScoringRule,
};
pub use timing::typing_delay;

use thiserror::Error;

/// Engine construction errors
#[derive(Error, Debug)]
pub enum AgentError {
    #[error("Configuration error: {0}")]
    Config(#[from] engagement_config::ConfigError),

    #[error("Knowledge base error: {0}")]
    Knowledge(#[from] engagement_rag::RagError),
}
