//! Core traits and types for the engagement engine
//!
//! This crate provides the value types shared by every other crate:
//! - Visitor profile and ICP score breakdown
//! - Behavior snapshots taken once per evaluation cycle
//! - Decision objects (nudges, achievements, next-best-actions, answers)
//! - Persistent-across-cycles state (nudge history, unlocked achievements)
//! - Strategy traits for pluggable scoring and answer lookup
//! - Error types
//!
//! Every type here is a plain value. Nothing holds a reference to caller
//! state across cycles; state that must survive a cycle is passed in and a
//! new value is returned.

pub mod achievement;
pub mod action;
pub mod error;
pub mod knowledge;
pub mod nudge;
pub mod profile;
pub mod snapshot;
pub mod traits;

pub use achievement::{AchievementCategory, AchievementTier, Rarity, UnlockedSet};
pub use action::{ActionType, CallToAction, NextBestAction};
pub use error::{Error, Result};
pub use knowledge::{KnowledgeCategory, QuestionMatch, ResponseTier, RoutedAnswer};
pub use nudge::{HistoryEntry, Nudge, NudgeHistory, TriggerScore, TriggerType, TriggerWeights};
pub use profile::{ChannelsCount, IcpTier, Industry, PainPoint, ProfileInput, ScoreBreakdown, TeamSize};
pub use snapshot::BehaviorSnapshot;

pub use traits::{AnswerSource, IcpScoringStrategy};
