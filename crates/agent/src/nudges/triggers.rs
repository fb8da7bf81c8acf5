//! Declarative nudge trigger table
//!
//! Each trigger is a record: metadata, a boolean condition over the snapshot
//! and an optional scoring rule. Adding a nudge means adding a row here;
//! the engine iterates the table generically.

use engagement_config::constants::pages;
use engagement_core::{BehaviorSnapshot, CallToAction, TriggerType, TriggerWeights};

/// Bar a trigger score must reach
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScoreThreshold {
    Fixed(f64),
    /// Per-visitor bar from [`adaptive_threshold`](super::scoring::adaptive_threshold)
    Adaptive,
}

/// Optional second gate: the snapshot must also score above a threshold
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScoringRule {
    /// `None` uses the configured default weights
    pub weights: Option<TriggerWeights>,
    pub threshold: ScoreThreshold,
}

#[derive(Clone)]
pub struct NudgeTrigger {
    pub id: &'static str,
    pub trigger_type: TriggerType,
    /// 1-10, higher wins within a trigger-type bucket
    pub priority: u8,
    pub cooldown_minutes: u32,
    pub max_occurrences: Option<u32>,
    pub condition: fn(&BehaviorSnapshot) -> bool,
    pub scoring: Option<ScoringRule>,
    /// (label, target)
    pub cta: Option<(&'static str, &'static str)>,
}

impl NudgeTrigger {
    pub fn call_to_action(&self) -> Option<CallToAction> {
        self.cta.map(|(label, target)| CallToAction::new(label, target))
    }
}

impl std::fmt::Debug for NudgeTrigger {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("NudgeTrigger")
            .field("id", &self.id)
            .field("trigger_type", &self.trigger_type)
            .field("priority", &self.priority)
            .field("cooldown_minutes", &self.cooldown_minutes)
            .field("max_occurrences", &self.max_occurrences)
            .field("scoring", &self.scoring)
            .finish()
    }
}

const INTENT_WEIGHTS: TriggerWeights = TriggerWeights {
    time: 0.1,
    engagement: 0.3,
    intent: 0.6,
};

const PRICING_WEIGHTS: TriggerWeights = TriggerWeights {
    time: 0.2,
    engagement: 0.3,
    intent: 0.5,
};

/// Built-in trigger table
pub fn default_triggers() -> Vec<NudgeTrigger> {
    vec![
        NudgeTrigger {
            id: "first_module_viewed",
            trigger_type: TriggerType::Milestone,
            priority: 5,
            cooldown_minutes: 0,
            max_occurrences: Some(1),
            condition: |s| s.modules_viewed_count() >= 1,
            scoring: None,
            cta: Some(("Bekijk hoe anderen het gebruiken", pages::CASES)),
        },
        NudgeTrigger {
            id: "three_modules_viewed",
            trigger_type: TriggerType::Milestone,
            priority: 6,
            cooldown_minutes: 0,
            max_occurrences: Some(1),
            condition: |s| s.modules_viewed_count() >= 3,
            scoring: None,
            cta: Some(("Bereken je besparing", pages::CALCULATOR)),
        },
        NudgeTrigger {
            id: "all_modules_explored",
            trigger_type: TriggerType::Milestone,
            priority: 8,
            cooldown_minutes: 0,
            max_occurrences: Some(1),
            condition: |s| s.modules_viewed_count() >= 6,
            scoring: None,
            cta: Some(("Plan een demo", pages::DEMO)),
        },
        NudgeTrigger {
            id: "calculator_completed",
            trigger_type: TriggerType::Milestone,
            priority: 9,
            cooldown_minutes: 0,
            max_occurrences: Some(1),
            condition: |s| s.calculator_completed && !s.has_scheduled_demo,
            scoring: None,
            cta: Some(("Bespreek je resultaat in een demo", pages::DEMO)),
        },
        NudgeTrigger {
            id: "calculator_prompt",
            trigger_type: TriggerType::Intent,
            priority: 7,
            cooldown_minutes: 10,
            max_occurrences: Some(2),
            condition: |s| {
                s.modules_viewed_count() >= 2 && !s.calculator_completed && s.time_on_site_seconds >= 120
            },
            scoring: None,
            cta: Some(("Bereken je besparing", pages::CALCULATOR)),
        },
        NudgeTrigger {
            id: "high_intent_demo",
            trigger_type: TriggerType::Intent,
            priority: 9,
            cooldown_minutes: 30,
            max_occurrences: Some(2),
            condition: |s| {
                s.icp_score >= 70 && !s.has_scheduled_demo && s.modules_viewed_count() >= 2
            },
            scoring: Some(ScoringRule {
                weights: Some(INTENT_WEIGHTS),
                threshold: ScoreThreshold::Adaptive,
            }),
            cta: Some(("Plan een demo", pages::DEMO)),
        },
        NudgeTrigger {
            id: "pricing_interest",
            trigger_type: TriggerType::Intent,
            priority: 6,
            cooldown_minutes: 20,
            max_occurrences: Some(2),
            condition: |s| s.has_seen_pricing && !s.calculator_completed,
            scoring: Some(ScoringRule {
                weights: Some(PRICING_WEIGHTS),
                threshold: ScoreThreshold::Fixed(0.4),
            }),
            cta: Some(("Bereken wat het jou kost", pages::CALCULATOR)),
        },
        NudgeTrigger {
            id: "extended_visit",
            trigger_type: TriggerType::TimeBased,
            priority: 4,
            cooldown_minutes: 15,
            max_occurrences: Some(2),
            condition: |s| s.time_on_site_seconds >= 300 && !s.has_scheduled_demo,
            scoring: Some(ScoringRule {
                weights: None,
                threshold: ScoreThreshold::Adaptive,
            }),
            cta: Some(("Stel je vraag", pages::CHAT)),
        },
        NudgeTrigger {
            id: "idle_return",
            trigger_type: TriggerType::Inactivity,
            priority: 3,
            cooldown_minutes: 5,
            max_occurrences: Some(3),
            condition: |s| {
                s.inactivity_seconds >= 60 && s.modules_viewed_count() >= 1 && !s.has_scheduled_demo
            },
            scoring: None,
            cta: Some(("Hulp nodig?", pages::CHAT)),
        },
    ]
}
