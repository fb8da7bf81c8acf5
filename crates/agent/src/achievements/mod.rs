//! Achievement Evaluator
//!
//! Evaluates the catalog against a snapshot and the set of ids already
//! granted. Evaluation is idempotent: an id in `unlocked` is never emitted
//! again, so feeding the result back in yields nothing new.

pub mod catalog;

pub use catalog::{default_catalog, Achievement, UnlockRule};

use engagement_config::AchievementsConfig;
use engagement_core::{AchievementTier, BehaviorSnapshot, UnlockedSet};
use serde::Serialize;

/// Cumulative points and tier standing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AchievementProgress {
    pub total_points: u32,
    pub tier: AchievementTier,
    pub next_tier: Option<AchievementTier>,
    /// `None` at the top tier
    pub points_to_next: Option<u32>,
}

#[derive(Debug, Clone)]
pub struct AchievementEvaluator {
    catalog: Vec<Achievement>,
    config: AchievementsConfig,
}

impl Default for AchievementEvaluator {
    fn default() -> Self {
        Self::from_config(&AchievementsConfig::default())
    }
}

impl AchievementEvaluator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &AchievementsConfig) -> Self {
        Self::with_catalog(default_catalog(), config)
    }

    pub fn with_catalog(catalog: Vec<Achievement>, config: &AchievementsConfig) -> Self {
        Self {
            catalog,
            config: config.clone(),
        }
    }

    pub fn catalog(&self) -> &[Achievement] {
        &self.catalog
    }

    pub fn get(&self, id: &str) -> Option<&Achievement> {
        self.catalog.iter().find(|a| a.id == id)
    }

    /// Achievements newly unlocked by `snapshot`, in catalog order
    pub fn check_all(&self, snapshot: &BehaviorSnapshot, unlocked: &UnlockedSet) -> Vec<Achievement> {
        let newly: Vec<Achievement> = self
            .catalog
            .iter()
            .filter(|a| !unlocked.contains(a.id))
            .filter(|a| a.is_unlocked_by(snapshot))
            .cloned()
            .collect();

        if !newly.is_empty() {
            tracing::debug!(
                unlocked = ?newly.iter().map(|a| a.id).collect::<Vec<_>>(),
                points = newly.iter().map(|a| a.points).sum::<u32>(),
                "Achievements unlocked"
            );
        }
        newly
    }

    /// Points of every catalog achievement in `unlocked`; unknown ids count 0
    pub fn total_points(&self, unlocked: &UnlockedSet) -> u32 {
        self.catalog
            .iter()
            .filter(|a| unlocked.contains(a.id))
            .map(|a| a.points)
            .sum()
    }

    pub fn tier(&self, total_points: u32) -> AchievementTier {
        self.config.tiers.tier_for(total_points)
    }

    pub fn progress(&self, unlocked: &UnlockedSet) -> AchievementProgress {
        let total_points = self.total_points(unlocked);
        let tier = self.tier(total_points);
        let next_tier = tier.next();
        let points_to_next = next_tier
            .map(|next| self.config.tiers.min_points(next).saturating_sub(total_points));

        AchievementProgress {
            total_points,
            tier,
            next_tier,
            points_to_next,
        }
    }

    /// Counter rules are close one unit away; time-on-site rules within the
    /// configured proximity window. Other rules are never close.
    pub fn is_close(&self, achievement: &Achievement, snapshot: &BehaviorSnapshot) -> bool {
        match achievement.rule.remaining(snapshot) {
            Some(0) | None => false,
            Some(left) if achievement.rule.is_timed() => left <= self.config.timed_proximity_seconds,
            Some(left) => left == 1,
        }
    }

    /// Next goal to show the visitor
    ///
    /// Candidates are achievements neither unlocked nor already met, ranked by
    /// category (conversion first). The first close one wins; otherwise the
    /// first candidate.
    pub fn next_suggested_achievement(
        &self,
        snapshot: &BehaviorSnapshot,
        unlocked: &UnlockedSet,
    ) -> Option<Achievement> {
        let mut candidates: Vec<&Achievement> = self
            .catalog
            .iter()
            .filter(|a| !unlocked.contains(a.id) && !a.is_unlocked_by(snapshot))
            .collect();
        candidates.sort_by_key(|a| a.category.suggestion_rank());

        candidates
            .iter()
            .find(|a| self.is_close(a, snapshot))
            .or_else(|| candidates.first())
            .map(|a| (*a).clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::DateTime;
    use engagement_core::AchievementCategory;

    /// Tuesday midday, so no time-of-day or weekend achievement applies
    fn weekday_noon() -> BehaviorSnapshot {
        BehaviorSnapshot::new(DateTime::parse_from_rfc3339("2024-06-11T12:00:00+02:00").unwrap())
    }

    fn ids(achievements: &[Achievement]) -> Vec<&'static str> {
        achievements.iter().map(|a| a.id).collect()
    }

    #[test]
    fn test_check_all_unlocks_several() {
        let evaluator = AchievementEvaluator::new();
        let snapshot = BehaviorSnapshot {
            questions_asked: 1,
            ..weekday_noon()
        }
        .with_module("content-engine")
        .with_module("ad-builder")
        .with_module("analytics");

        let unlocked = evaluator.check_all(&snapshot, &UnlockedSet::new());
        assert_eq!(ids(&unlocked), vec!["curious_mind", "first_steps", "explorer"]);
    }

    #[test]
    fn test_check_all_is_idempotent() {
        let evaluator = AchievementEvaluator::new();
        let snapshot = BehaviorSnapshot {
            calculator_completed: true,
            icp_score: 95,
            ..weekday_noon()
        }
        .with_module("analytics");

        let first = evaluator.check_all(&snapshot, &UnlockedSet::new());
        assert!(!first.is_empty());

        let unlocked = UnlockedSet::new().with_unlocked(first.iter().map(|a| a.id));
        assert!(evaluator.check_all(&snapshot, &unlocked).is_empty());
    }

    #[test]
    fn test_repeated_module_views_count_once() {
        let evaluator = AchievementEvaluator::new();
        let snapshot = BehaviorSnapshot {
            modules_viewed: vec!["analytics".into(), "analytics".into(), "analytics".into()],
            ..weekday_noon()
        };

        let unlocked = evaluator.check_all(&snapshot, &UnlockedSet::new());
        assert_eq!(ids(&unlocked), vec!["first_steps"]);
    }

    #[test]
    fn test_time_based_achievements() {
        let evaluator = AchievementEvaluator::new();
        let saturday_night =
            BehaviorSnapshot::new(DateTime::parse_from_rfc3339("2024-06-15T23:30:00+02:00").unwrap());

        let unlocked = evaluator.check_all(&saturday_night, &UnlockedSet::new());
        assert_eq!(ids(&unlocked), vec!["night_owl", "weekend_warrior"]);
    }

    #[test]
    fn test_progress_and_tiers() {
        let evaluator = AchievementEvaluator::new();

        let progress = evaluator.progress(&UnlockedSet::new());
        assert_eq!(progress.total_points, 0);
        assert_eq!(progress.tier, AchievementTier::Bronze);
        assert_eq!(progress.points_to_next, Some(100));

        // 150 + 100
        let unlocked: UnlockedSet = ["demo_booked", "perfect_fit", "retired_badge"].into_iter().collect();
        let progress = evaluator.progress(&unlocked);
        assert_eq!(progress.total_points, 250);
        assert_eq!(progress.tier, AchievementTier::Gold);
        assert_eq!(progress.next_tier, Some(AchievementTier::Platinum));
        assert_eq!(progress.points_to_next, Some(250));
    }

    #[test]
    fn test_suggestion_prefers_close_achievement() {
        let evaluator = AchievementEvaluator::new();
        // Two modules viewed: explorer is one module away
        let snapshot = BehaviorSnapshot {
            questions_asked: 1,
            ..weekday_noon()
        }
        .with_module("analytics")
        .with_module("publishing");
        let unlocked = UnlockedSet::new().with_unlocked(["first_steps"]);

        let next = evaluator.next_suggested_achievement(&snapshot, &unlocked).unwrap();
        assert_eq!(next.id, "explorer");
    }

    #[test]
    fn test_suggestion_ranks_category_before_proximity_order() {
        let evaluator = AchievementEvaluator::new();
        // Four steps: step_master (mastery) one away; four messages: conversationalist one away
        let snapshot = BehaviorSnapshot {
            completed_steps: 4,
            messages_count: 4,
            ..weekday_noon()
        };

        let next = evaluator
            .next_suggested_achievement(&snapshot, &UnlockedSet::new())
            .unwrap();
        assert_eq!(next.id, "step_master");
        assert_eq!(next.category, AchievementCategory::Mastery);
    }

    #[test]
    fn test_suggestion_timed_proximity() {
        let evaluator = AchievementEvaluator::new();
        let snapshot = BehaviorSnapshot {
            time_on_site_seconds: 560,
            ..weekday_noon()
        };
        assert!(evaluator.is_close(evaluator.get("deep_diver").unwrap(), &snapshot));

        let early = BehaviorSnapshot {
            time_on_site_seconds: 500,
            ..weekday_noon()
        };
        assert!(!evaluator.is_close(evaluator.get("deep_diver").unwrap(), &early));
    }

    #[test]
    fn test_suggestion_falls_back_to_first_unachieved() {
        let evaluator = AchievementEvaluator::new();
        let snapshot = BehaviorSnapshot {
            questions_asked: 1,
            ..weekday_noon()
        }
        .with_module("analytics");

        let next = evaluator
            .next_suggested_achievement(&snapshot, &UnlockedSet::new())
            .unwrap();
        // Nothing close; first conversion achievement
        assert_eq!(next.id, "demo_booked");
    }

    #[test]
    fn test_no_suggestion_when_everything_unlocked() {
        let evaluator = AchievementEvaluator::new();
        let all: UnlockedSet = evaluator.catalog().iter().map(|a| a.id).collect();
        assert!(evaluator.next_suggested_achievement(&weekday_noon(), &all).is_none());
        assert_eq!(evaluator.progress(&all).total_points, 640);
    }
}
