//! Achievement tier configuration

use engagement_core::AchievementTier;
use serde::{Deserialize, Serialize};

use crate::constants::achievement_tiers;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AchievementsConfig {
    #[serde(default)]
    pub tiers: TierLadder,
    /// Time-on-site achievements count as "close" within this many seconds
    #[serde(default = "default_timed_proximity")]
    pub timed_proximity_seconds: u64,
}

impl Default for AchievementsConfig {
    fn default() -> Self {
        Self {
            tiers: TierLadder::default(),
            timed_proximity_seconds: default_timed_proximity(),
        }
    }
}

fn default_timed_proximity() -> u64 {
    60
}

/// Cumulative point breakpoints; bronze starts at zero
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierLadder {
    pub silver: u32,
    pub gold: u32,
    pub platinum: u32,
    pub diamond: u32,
}

impl Default for TierLadder {
    fn default() -> Self {
        Self {
            silver: achievement_tiers::SILVER,
            gold: achievement_tiers::GOLD,
            platinum: achievement_tiers::PLATINUM,
            diamond: achievement_tiers::DIAMOND,
        }
    }
}

impl TierLadder {
    pub fn tier_for(&self, points: u32) -> AchievementTier {
        if points >= self.diamond {
            AchievementTier::Diamond
        } else if points >= self.platinum {
            AchievementTier::Platinum
        } else if points >= self.gold {
            AchievementTier::Gold
        } else if points >= self.silver {
            AchievementTier::Silver
        } else {
            AchievementTier::Bronze
        }
    }

    /// Points needed to enter `tier`
    pub fn min_points(&self, tier: AchievementTier) -> u32 {
        match tier {
            AchievementTier::Bronze => 0,
            AchievementTier::Silver => self.silver,
            AchievementTier::Gold => self.gold,
            AchievementTier::Platinum => self.platinum,
            AchievementTier::Diamond => self.diamond,
        }
    }

    pub fn is_ascending(&self) -> bool {
        0 < self.silver && self.silver < self.gold && self.gold < self.platinum
            && self.platinum < self.diamond
    }
}
