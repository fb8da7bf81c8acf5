//! Achievement classification types and the unlocked set

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Achievement category, in suggestion priority order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementCategory {
    Conversion,
    Mastery,
    Engagement,
    Exploration,
    Special,
}

impl AchievementCategory {
    /// Lower value = suggested first
    pub fn suggestion_rank(&self) -> u8 {
        match self {
            Self::Conversion => 0,
            Self::Mastery => 1,
            Self::Engagement => 2,
            Self::Exploration => 3,
            Self::Special => 4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Rarity {
    Common,
    Rare,
    Epic,
    Legendary,
}

/// Tier reached from cumulative achievement points
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AchievementTier {
    Bronze,
    Silver,
    Gold,
    Platinum,
    Diamond,
}

impl AchievementTier {
    pub fn next(&self) -> Option<Self> {
        match self {
            Self::Bronze => Some(Self::Silver),
            Self::Silver => Some(Self::Gold),
            Self::Gold => Some(Self::Platinum),
            Self::Platinum => Some(Self::Diamond),
            Self::Diamond => None,
        }
    }
}

/// Ids of achievements already granted
///
/// Only grows. Adding ids produces a new set.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UnlockedSet {
    ids: BTreeSet<String>,
}

impl UnlockedSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.ids.contains(id)
    }

    /// Copy of this set with `ids` added
    pub fn with_unlocked<I, S>(&self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut next = self.ids.clone();
        next.extend(ids.into_iter().map(Into::into));
        Self { ids: next }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.ids.iter().map(|s| s.as_str())
    }
}

impl<S: Into<String>> FromIterator<S> for UnlockedSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().map(Into::into).collect(),
        }
    }
}
