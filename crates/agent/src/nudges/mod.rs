//! Nudge Trigger Engine
//!
//! Picks at most one proactive nudge per evaluation cycle.
//!
//! 1. **Eligibility**: condition holds, score passes (when the trigger
//!    declares a scoring rule), not in cooldown, below `max_occurrences`.
//! 2. **Resolution**: milestone triggers outrank every other type; within a
//!    type bucket the highest declared priority wins, then table order.
//!
//! History is never mutated: [`NudgeEngine::update_history`] returns a new
//! value for the caller to store.
//!
//! # Example
//!
//! ```ignore
//! let engine = NudgeEngine::from_config(&domain.nudges);
//! if let Some(nudge) = engine.select_nudge(&snapshot, &history) {
//!     render(&nudge);
//!     history = engine.update_history(&nudge.trigger_id, &history, snapshot.captured_at_utc());
//! }
//! ```

pub mod scoring;
pub mod triggers;

pub use scoring::{adaptive_threshold, calculate_trigger_score};
pub use triggers::{default_triggers, NudgeTrigger, ScoreThreshold, ScoringRule};

use chrono::{DateTime, Utc};
use engagement_config::NudgeConfig;
use engagement_core::{BehaviorSnapshot, Nudge, NudgeHistory, TriggerScore};

/// Why a declared trigger did not make it into the eligible set
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Ineligibility {
    Condition,
    BelowThreshold(TriggerScore),
    Cooldown { remaining_minutes: f64 },
    MaxOccurrences(u32),
}

#[derive(Debug, Clone)]
pub struct NudgeEngine {
    triggers: Vec<NudgeTrigger>,
    config: NudgeConfig,
}

impl Default for NudgeEngine {
    fn default() -> Self {
        Self::from_config(&NudgeConfig::default())
    }
}

impl NudgeEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Built-in trigger table with config overrides applied
    pub fn from_config(config: &NudgeConfig) -> Self {
        Self::with_triggers(default_triggers(), config)
    }

    pub fn with_triggers(triggers: Vec<NudgeTrigger>, config: &NudgeConfig) -> Self {
        for id in config.overrides.keys() {
            if !triggers.iter().any(|t| t.id == id) {
                tracing::warn!(trigger = %id, "Override for undeclared nudge trigger ignored");
            }
        }

        let triggers = triggers
            .into_iter()
            .filter_map(|mut trigger| {
                let Some(over) = config.override_for(trigger.id) else {
                    return Some(trigger);
                };
                if over.enabled == Some(false) {
                    tracing::debug!(trigger = trigger.id, "Nudge trigger disabled by config");
                    return None;
                }
                if let Some(priority) = over.priority {
                    trigger.priority = priority;
                }
                if let Some(cooldown) = over.cooldown_minutes {
                    trigger.cooldown_minutes = cooldown;
                }
                if let Some(max) = over.max_occurrences {
                    trigger.max_occurrences = Some(max);
                }
                Some(trigger)
            })
            .collect();

        Self {
            triggers,
            config: config.clone(),
        }
    }

    pub fn triggers(&self) -> &[NudgeTrigger] {
        &self.triggers
    }

    pub fn trigger(&self, id: &str) -> Option<&NudgeTrigger> {
        self.triggers.iter().find(|t| t.id == id)
    }

    /// Stage 1 for one trigger
    pub fn check_trigger(
        &self,
        trigger: &NudgeTrigger,
        snapshot: &BehaviorSnapshot,
        history: &NudgeHistory,
    ) -> Result<Nudge, Ineligibility> {
        if !(trigger.condition)(snapshot) {
            return Err(Ineligibility::Condition);
        }

        let score = trigger.scoring.map(|rule| self.score(&rule, snapshot));
        if let Some(score) = score {
            if !score.passes() {
                return Err(Ineligibility::BelowThreshold(score));
            }
        }

        if let Some(max) = trigger.max_occurrences {
            let count = history.count(trigger.id);
            if count >= max {
                return Err(Ineligibility::MaxOccurrences(count));
            }
        }

        if let Some(elapsed) = history.minutes_since_shown(trigger.id, snapshot.captured_at_utc()) {
            let cooldown = trigger.cooldown_minutes as f64;
            if elapsed < cooldown {
                return Err(Ineligibility::Cooldown {
                    remaining_minutes: cooldown - elapsed,
                });
            }
        }

        Ok(Nudge {
            trigger_id: trigger.id.to_string(),
            trigger_type: trigger.trigger_type,
            priority: trigger.priority,
            score,
            cta: trigger.call_to_action(),
        })
    }

    /// Every eligible trigger, in resolution order
    pub fn eligible_triggers(&self, snapshot: &BehaviorSnapshot, history: &NudgeHistory) -> Vec<Nudge> {
        let mut eligible: Vec<Nudge> = self
            .triggers
            .iter()
            .filter_map(|trigger| match self.check_trigger(trigger, snapshot, history) {
                Ok(nudge) => Some(nudge),
                Err(reason) => {
                    tracing::trace!(trigger = trigger.id, ?reason, "Nudge trigger not eligible");
                    None
                },
            })
            .collect();

        // Stable: equal keys keep table order
        eligible.sort_by(|a, b| {
            a.trigger_type
                .resolution_rank()
                .cmp(&b.trigger_type.resolution_rank())
                .then_with(|| b.priority.cmp(&a.priority))
        });
        eligible
    }

    /// At most one nudge for this cycle
    pub fn select_nudge(&self, snapshot: &BehaviorSnapshot, history: &NudgeHistory) -> Option<Nudge> {
        for (id, _) in history.iter() {
            if self.trigger(id).is_none() {
                tracing::trace!(trigger = id, "Ignoring history for undeclared trigger");
            }
        }

        let selected = self.eligible_triggers(snapshot, history).into_iter().next();

        if let Some(nudge) = &selected {
            tracing::debug!(
                trigger = %nudge.trigger_id,
                trigger_type = nudge.trigger_type.as_str(),
                priority = nudge.priority,
                score = nudge.score.map(|s| s.total_score),
                "Selected nudge"
            );
        }
        selected
    }

    /// New history with one firing of `trigger_id` recorded at `shown_at`
    ///
    /// Undeclared ids leave the history unchanged.
    pub fn update_history(
        &self,
        trigger_id: &str,
        history: &NudgeHistory,
        shown_at: DateTime<Utc>,
    ) -> NudgeHistory {
        if self.trigger(trigger_id).is_none() {
            tracing::warn!(trigger = %trigger_id, "Not recording undeclared nudge trigger");
            return history.clone();
        }
        history.recorded(trigger_id, shown_at)
    }

    /// History without entries for triggers no longer declared
    pub fn prune_history(&self, history: &NudgeHistory) -> NudgeHistory {
        history.pruned(self.triggers.iter().map(|t| t.id))
    }

    fn score(&self, rule: &ScoringRule, snapshot: &BehaviorSnapshot) -> TriggerScore {
        let weights = rule.weights.unwrap_or(self.config.default_weights);
        let threshold = match rule.threshold {
            ScoreThreshold::Fixed(threshold) => threshold,
            ScoreThreshold::Adaptive => adaptive_threshold(snapshot, &self.config.adaptive),
        };
        calculate_trigger_score(snapshot, &weights, threshold, &self.config.normalization)
    }
}
