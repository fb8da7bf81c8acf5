//! ICP scoring tables

use engagement_core::{ChannelsCount, Industry, PainPoint, TeamSize};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::constants::icp;

/// Per-band score tables for the ICP scorer
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IcpConfig {
    #[serde(default = "default_team_size_scores")]
    pub team_size: BTreeMap<TeamSize, u32>,
    #[serde(default = "default_channels_scores")]
    pub channels: BTreeMap<ChannelsCount, u32>,
    #[serde(default = "default_pain_point_scores")]
    pub pain_points: BTreeMap<PainPoint, u32>,
    #[serde(default = "default_industry_scores")]
    pub industry: BTreeMap<Industry, u32>,
    /// Summed pain-point scores are capped here
    #[serde(default = "default_pain_points_cap")]
    pub pain_points_cap: u32,
    #[serde(default)]
    pub thresholds: TierThresholds,
}

impl Default for IcpConfig {
    fn default() -> Self {
        Self {
            team_size: default_team_size_scores(),
            channels: default_channels_scores(),
            pain_points: default_pain_point_scores(),
            industry: default_industry_scores(),
            pain_points_cap: default_pain_points_cap(),
            thresholds: TierThresholds::default(),
        }
    }
}

impl IcpConfig {
    /// Largest score any single profile can reach with these tables
    pub fn max_total(&self) -> u32 {
        let max_of = |values: Vec<u32>| values.into_iter().max().unwrap_or(0);
        max_of(self.team_size.values().copied().collect())
            .saturating_add(max_of(self.channels.values().copied().collect()))
            .saturating_add(self.pain_points_cap)
            .saturating_add(max_of(self.industry.values().copied().collect()))
    }

    /// First `(table, band, score)` whose score exceeds `limit`
    pub fn band_above(&self, limit: u32) -> Option<(&'static str, &'static str, u32)> {
        let team = self
            .team_size
            .iter()
            .map(|(band, score)| ("team_size", band.as_str(), *score));
        let channels = self
            .channels
            .iter()
            .map(|(band, score)| ("channels", band.as_str(), *score));
        let pains = self
            .pain_points
            .iter()
            .map(|(band, score)| ("pain_points", band.as_str(), *score));
        let industry = self
            .industry
            .iter()
            .map(|(band, score)| ("industry", band.as_str(), *score));

        team.chain(channels)
            .chain(pains)
            .chain(industry)
            .find(|(_, _, score)| *score > limit)
    }
}

/// Tier breakpoints; a score equal to a breakpoint belongs to the higher tier
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TierThresholds {
    pub primary: u32,
    pub secondary: u32,
}

impl Default for TierThresholds {
    fn default() -> Self {
        Self {
            primary: icp::PRIMARY_MIN,
            secondary: icp::SECONDARY_MIN,
        }
    }
}

fn default_team_size_scores() -> BTreeMap<TeamSize, u32> {
    BTreeMap::from([
        (TeamSize::Solo, 15),
        (TeamSize::Small, 25),
        (TeamSize::Medium, 30),
        (TeamSize::Large, 10),
    ])
}

fn default_channels_scores() -> BTreeMap<ChannelsCount, u32> {
    BTreeMap::from([
        (ChannelsCount::Few, 10),
        (ChannelsCount::Several, 20),
        (ChannelsCount::Many, 25),
        (ChannelsCount::Extensive, 15),
    ])
}

fn default_pain_point_scores() -> BTreeMap<PainPoint, u32> {
    BTreeMap::from([
        (PainPoint::AgencyCost, 15),
        (PainPoint::ScalingProblem, 12),
        (PainPoint::ContentQuality, 10),
        (PainPoint::TimeConsuming, 8),
        (PainPoint::LowRoi, 10),
        (PainPoint::NoStrategy, 5),
    ])
}

fn default_industry_scores() -> BTreeMap<Industry, u32> {
    BTreeMap::from([
        (Industry::Ecommerce, 20),
        (Industry::Saas, 15),
        (Industry::Agency, 10),
        (Industry::Other, 5),
    ])
}

fn default_pain_points_cap() -> u32 {
    icp::PAIN_POINTS_CAP
}
