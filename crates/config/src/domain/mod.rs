//! Domain rule tables
//!
//! Each section maps to one decision component:
//! - `icp` → ICP Scorer
//! - `nudges` → Nudge Trigger Engine
//! - `achievements` → Achievement Evaluator
//! - `journeys` → Next-Best-Action Predictor
//! - `matching` → Question Matcher
//!
//! [`DomainConfig`] aggregates them and loads from one YAML file.

mod achievements;
mod icp;
mod journeys;
mod master;
mod matching;
mod nudges;

pub use achievements::{AchievementsConfig, TierLadder};
pub use icp::{IcpConfig, TierThresholds};
pub use journeys::{JourneyConfig, PredictorThresholds};
pub use master::DomainConfig;
pub use matching::{ConfidenceBands, ContextBoosts, MatchingConfig};
pub use nudges::{AdaptiveThresholds, NudgeConfig, ScoreNormalization, TriggerOverride};
