//! Achievement catalog
//!
//! Every achievement is a row: metadata plus an [`UnlockRule`]. Rules are
//! data rather than closures so proximity ("one step away") can be computed
//! generically.

use engagement_core::{AchievementCategory, BehaviorSnapshot, Rarity};
use serde::Serialize;

/// Unlock predicate over a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum UnlockRule {
    ModulesViewed { at_least: u64 },
    MessagesSent { at_least: u64 },
    QuestionsAsked { at_least: u64 },
    StepsCompleted { at_least: u64 },
    TimeOnSite { seconds: u64 },
    IcpScore { at_least: u32 },
    CalculatorCompleted,
    DemoScheduled,
    PricingSeen,
    /// Local hour in `[from, until)`; wraps past midnight when `from > until`
    LocalHour { from: u32, until: u32 },
    Weekend,
}

impl UnlockRule {
    pub fn is_met(&self, snapshot: &BehaviorSnapshot) -> bool {
        match *self {
            Self::IcpScore { at_least } => snapshot.icp_score >= at_least,
            Self::CalculatorCompleted => snapshot.calculator_completed,
            Self::DemoScheduled => snapshot.has_scheduled_demo,
            Self::PricingSeen => snapshot.has_seen_pricing,
            Self::LocalHour { from, until } => {
                let hour = snapshot.local_hour();
                if from <= until {
                    (from..until).contains(&hour)
                } else {
                    hour >= from || hour < until
                }
            },
            Self::Weekend => snapshot.is_weekend(),
            _ => self.remaining(snapshot) == Some(0),
        }
    }

    /// Units left before a counter rule unlocks; `None` for non-counter rules
    pub fn remaining(&self, snapshot: &BehaviorSnapshot) -> Option<u64> {
        let (current, target) = match *self {
            Self::ModulesViewed { at_least } => (snapshot.modules_viewed_count() as u64, at_least),
            Self::MessagesSent { at_least } => (snapshot.messages_count as u64, at_least),
            Self::QuestionsAsked { at_least } => (snapshot.questions_asked as u64, at_least),
            Self::StepsCompleted { at_least } => (snapshot.completed_steps as u64, at_least),
            Self::TimeOnSite { seconds } => (snapshot.time_on_site_seconds, seconds),
            _ => return None,
        };
        Some(target.saturating_sub(current))
    }

    pub fn is_timed(&self) -> bool {
        matches!(self, Self::TimeOnSite { .. })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Achievement {
    pub id: &'static str,
    pub title: &'static str,
    pub category: AchievementCategory,
    pub points: u32,
    pub rarity: Rarity,
    pub rule: UnlockRule,
}

impl Achievement {
    pub fn is_unlocked_by(&self, snapshot: &BehaviorSnapshot) -> bool {
        self.rule.is_met(snapshot)
    }
}

const fn achievement(
    id: &'static str,
    title: &'static str,
    category: AchievementCategory,
    points: u32,
    rarity: Rarity,
    rule: UnlockRule,
) -> Achievement {
    Achievement {
        id,
        title,
        category,
        points,
        rarity,
        rule,
    }
}

/// Built-in catalog
pub fn default_catalog() -> Vec<Achievement> {
    use AchievementCategory::*;
    use UnlockRule::*;

    vec![
        achievement("demo_booked", "Demo gepland", Conversion, 150, Rarity::Legendary, DemoScheduled),
        achievement("pricing_scout", "Prijsbewust", Conversion, 20, Rarity::Common, PricingSeen),
        achievement("number_cruncher", "Rekenwonder", Mastery, 50, Rarity::Rare, CalculatorCompleted),
        achievement("step_master", "Stap voor stap", Mastery, 50, Rarity::Rare, StepsCompleted { at_least: 5 }),
        achievement("curious_mind", "Nieuwsgierig", Engagement, 15, Rarity::Common, QuestionsAsked { at_least: 1 }),
        achievement("conversationalist", "Gesprekspartner", Engagement, 30, Rarity::Rare, MessagesSent { at_least: 5 }),
        achievement("deep_diver", "Diepgraver", Engagement, 40, Rarity::Rare, TimeOnSite { seconds: 600 }),
        achievement("first_steps", "Eerste stap", Exploration, 10, Rarity::Common, ModulesViewed { at_least: 1 }),
        achievement("explorer", "Ontdekker", Exploration, 25, Rarity::Common, ModulesViewed { at_least: 3 }),
        achievement("completionist", "Alles gezien", Exploration, 75, Rarity::Epic, ModulesViewed { at_least: 6 }),
        achievement("perfect_fit", "Perfecte match", Special, 100, Rarity::Epic, IcpScore { at_least: 90 }),
        achievement("night_owl", "Nachtuil", Special, 25, Rarity::Rare, LocalHour { from: 22, until: 5 }),
        achievement("early_bird", "Vroege vogel", Special, 25, Rarity::Rare, LocalHour { from: 5, until: 8 }),
        achievement("weekend_warrior", "Weekendwerker", Special, 25, Rarity::Rare, Weekend),
    ]
}
