//! Next-Best-Action Predictor
//!
//! Independent heuristics each propose at most one candidate:
//!
//! | priority | action | fires when |
//! |---|---|---|
//! | 10 | schedule demo | calculator done, ICP above threshold, no demo yet |
//! | 9 | open calculator | 2+ modules, no calculator, over 2 minutes on site |
//! | 7 | suggest module | industry path table has an unviewed next module |
//! | 6 | encouragement | exactly the milestone number of modules viewed |
//! | 5 | open chat | long dwell, little exploration, no messages |
//! | 4 | resume | inactive for a while with partial progress |
//!
//! Candidates are sorted by priority, then confidence; the top one wins.

use engagement_config::constants::pages;
use engagement_config::JourneyConfig;
use engagement_core::{ActionType, BehaviorSnapshot, CallToAction, NextBestAction};

#[derive(Debug, Clone, Default)]
pub struct NextActionPredictor {
    config: JourneyConfig,
}

impl NextActionPredictor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &JourneyConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Every candidate that fired, best first
    pub fn candidates(&self, context: &BehaviorSnapshot) -> Vec<NextBestAction> {
        let heuristics = [
            self.demo_candidate(context),
            self.calculator_candidate(context),
            self.next_module_candidate(context),
            self.milestone_candidate(context),
            self.chat_candidate(context),
            self.resume_candidate(context),
        ];

        let mut candidates: Vec<NextBestAction> = heuristics.into_iter().flatten().collect();
        candidates.sort_by(|a, b| {
            b.priority
                .cmp(&a.priority)
                .then_with(|| b.confidence.total_cmp(&a.confidence))
        });
        candidates
    }

    pub fn predict(&self, context: &BehaviorSnapshot) -> Option<NextBestAction> {
        let best = self.candidates(context).into_iter().next();
        if let Some(action) = &best {
            tracing::debug!(
                action = %action.id,
                priority = action.priority,
                confidence = action.confidence,
                reason = %action.reason,
                "Predicted next best action"
            );
        }
        best
    }

    /// Journey completion, 0-100
    pub fn calculate_journey_progress(&self, context: &BehaviorSnapshot) -> u32 {
        let targets = &self.config.target_modules;
        let viewed = self.viewed_targets(context) as u32;

        let mut progress = if targets.is_empty() {
            0
        } else {
            viewed * self.config.modules_weight / targets.len() as u32
        };
        if context.calculator_completed {
            progress += self.config.calculator_bonus;
        }
        if context.has_scheduled_demo {
            progress += self.config.demo_bonus;
        }
        progress.min(100)
    }

    /// Minutes left to view every target module
    pub fn estimate_time_to_completion(&self, context: &BehaviorSnapshot) -> f64 {
        let remaining = self
            .config
            .target_modules
            .len()
            .saturating_sub(self.viewed_targets(context));
        remaining as f64 * self.config.minutes_per_module
    }

    fn viewed_targets(&self, context: &BehaviorSnapshot) -> usize {
        self.config
            .target_modules
            .iter()
            .filter(|m| context.has_viewed(m))
            .count()
    }

    fn demo_candidate(&self, context: &BehaviorSnapshot) -> Option<NextBestAction> {
        let min_icp = self.config.thresholds.demo_min_icp;
        if !(context.calculator_completed && context.icp_score > min_icp && !context.has_scheduled_demo) {
            return None;
        }
        Some(action(
            "schedule_demo",
            ActionType::ScheduleDemo,
            10,
            0.9,
            format!("calculator completed with ICP score {}", context.icp_score),
            CallToAction::new("Plan een demo", pages::DEMO),
        ))
    }

    fn calculator_candidate(&self, context: &BehaviorSnapshot) -> Option<NextBestAction> {
        let t = &self.config.thresholds;
        if context.modules_viewed_count() < t.calculator_min_modules
            || context.calculator_completed
            || context.time_on_site_seconds <= t.calculator_min_seconds
        {
            return None;
        }
        Some(action(
            "open_calculator",
            ActionType::OpenCalculator,
            9,
            0.8,
            format!(
                "{} modules viewed, calculator not used",
                context.modules_viewed_count()
            ),
            CallToAction::new("Bereken je besparing", pages::CALCULATOR),
        ))
    }

    fn next_module_candidate(&self, context: &BehaviorSnapshot) -> Option<NextBestAction> {
        let last = context.last_viewed_module()?;
        let next = self
            .config
            .next_modules(context.industry, last)
            .iter()
            .find(|m| !context.has_viewed(m))?;

        let confidence = if context.industry.is_some() { 0.75 } else { 0.65 };
        Some(action(
            "suggest_module",
            ActionType::SuggestModule,
            7,
            confidence,
            format!("path after {} leads to {}", last, next),
            CallToAction::new("Bekijk de volgende module", pages::module(next)),
        ))
    }

    fn milestone_candidate(&self, context: &BehaviorSnapshot) -> Option<NextBestAction> {
        if context.modules_viewed_count() != self.config.thresholds.milestone_modules {
            return None;
        }
        Some(action(
            "milestone_encouragement",
            ActionType::Navigate,
            6,
            0.6,
            format!("{} modules viewed", context.modules_viewed_count()),
            CallToAction::new("Bekijk wat anderen bereikten", pages::CASES),
        ))
    }

    fn chat_candidate(&self, context: &BehaviorSnapshot) -> Option<NextBestAction> {
        let t = &self.config.thresholds;
        if context.time_on_site_seconds <= t.chat_min_seconds
            || context.modules_viewed_count() > t.chat_max_modules
            || context.messages_count > 0
        {
            return None;
        }
        Some(action(
            "open_chat",
            ActionType::OpenChat,
            5,
            0.5,
            format!(
                "{}s on site with {} modules viewed",
                context.time_on_site_seconds,
                context.modules_viewed_count()
            ),
            CallToAction::new("Stel je vraag", pages::CHAT),
        ))
    }

    fn resume_candidate(&self, context: &BehaviorSnapshot) -> Option<NextBestAction> {
        if context.inactivity_seconds <= self.config.thresholds.resume_min_inactivity_seconds {
            return None;
        }
        let viewed = self.viewed_targets(context);
        if viewed == 0 || viewed >= self.config.target_modules.len() {
            return None;
        }
        let next = self
            .config
            .target_modules
            .iter()
            .find(|m| !context.has_viewed(m))?;

        Some(action(
            "resume_journey",
            ActionType::Navigate,
            4,
            0.4,
            format!(
                "inactive for {}s at {}/{} modules",
                context.inactivity_seconds,
                viewed,
                self.config.target_modules.len()
            ),
            CallToAction::new("Ga verder waar je was", pages::module(next)),
        ))
    }
}

fn action(
    id: &str,
    action_type: ActionType,
    priority: u8,
    confidence: f64,
    reason: String,
    cta: CallToAction,
) -> NextBestAction {
    NextBestAction {
        id: id.to_string(),
        action_type,
        priority,
        confidence,
        reason,
        action: Some(cta),
    }
}
