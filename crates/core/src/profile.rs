//! Visitor profile input and ICP score breakdown
//!
//! The profile comes from the calculator/qualification form. All enums are
//! closed sets; parsing from raw form values happens here, at the boundary,
//! so the scorer itself never sees an unknown band.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Team size band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum TeamSize {
    #[serde(rename = "1-5")]
    Solo,
    #[serde(rename = "5-15")]
    Small,
    #[serde(rename = "15-50")]
    Medium,
    #[serde(rename = "50+")]
    Large,
}

impl TeamSize {
    pub const ALL: [TeamSize; 4] = [Self::Solo, Self::Small, Self::Medium, Self::Large];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Solo => "1-5",
            Self::Small => "5-15",
            Self::Medium => "15-50",
            Self::Large => "50+",
        }
    }
}

impl FromStr for TeamSize {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|band| band.as_str() == s.trim())
            .ok_or_else(|| Error::UnknownBand {
                field: "team_size",
                value: s.to_string(),
            })
    }
}

/// Number of marketing channels the visitor runs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum ChannelsCount {
    #[serde(rename = "1-2")]
    Few,
    #[serde(rename = "3-5")]
    Several,
    #[serde(rename = "6-10")]
    Many,
    #[serde(rename = "10+")]
    Extensive,
}

impl ChannelsCount {
    pub const ALL: [ChannelsCount; 4] = [Self::Few, Self::Several, Self::Many, Self::Extensive];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Few => "1-2",
            Self::Several => "3-5",
            Self::Many => "6-10",
            Self::Extensive => "10+",
        }
    }
}

impl FromStr for ChannelsCount {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|band| band.as_str() == s.trim())
            .ok_or_else(|| Error::UnknownBand {
                field: "channels_count",
                value: s.to_string(),
            })
    }
}

/// Pain points a visitor can select on the qualification form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum PainPoint {
    AgencyCost,
    ScalingProblem,
    ContentQuality,
    TimeConsuming,
    LowRoi,
    NoStrategy,
}

impl PainPoint {
    pub const ALL: [PainPoint; 6] = [
        Self::AgencyCost,
        Self::ScalingProblem,
        Self::ContentQuality,
        Self::TimeConsuming,
        Self::LowRoi,
        Self::NoStrategy,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::AgencyCost => "agency-cost",
            Self::ScalingProblem => "scaling-problem",
            Self::ContentQuality => "content-quality",
            Self::TimeConsuming => "time-consuming",
            Self::LowRoi => "low-roi",
            Self::NoStrategy => "no-strategy",
        }
    }
}

impl FromStr for PainPoint {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|point| point.as_str() == s.trim())
            .ok_or_else(|| Error::UnknownBand {
                field: "pain_point",
                value: s.to_string(),
            })
    }
}

/// Visitor industry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Industry {
    Ecommerce,
    Saas,
    Agency,
    Other,
}

impl Industry {
    pub const ALL: [Industry; 4] = [Self::Ecommerce, Self::Saas, Self::Agency, Self::Other];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Ecommerce => "ecommerce",
            Self::Saas => "saas",
            Self::Agency => "agency",
            Self::Other => "other",
        }
    }
}

impl FromStr for Industry {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|industry| industry.as_str() == s.trim())
            .ok_or_else(|| Error::UnknownBand {
                field: "industry",
                value: s.to_string(),
            })
    }
}

/// Qualification form answers
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProfileInput {
    pub team_size: TeamSize,
    pub channels_count: ChannelsCount,
    /// Distinct pain points; a set, so duplicates cannot inflate the score
    pub pain_points: BTreeSet<PainPoint>,
    pub industry: Industry,
}

impl ProfileInput {
    pub fn new(
        team_size: TeamSize,
        channels_count: ChannelsCount,
        pain_points: impl IntoIterator<Item = PainPoint>,
        industry: Industry,
    ) -> Self {
        Self {
            team_size,
            channels_count,
            pain_points: pain_points.into_iter().collect(),
            industry,
        }
    }

    /// Parse raw form values.
    ///
    /// Repeated pain points collapse into one; the set can never exceed the
    /// closed list of pain points.
    pub fn parse(
        team_size: &str,
        channels_count: &str,
        pain_points: &[&str],
        industry: &str,
    ) -> Result<Self> {
        let pain_points = pain_points
            .iter()
            .map(|p| p.parse())
            .collect::<Result<BTreeSet<PainPoint>>>()?;

        Ok(Self {
            team_size: team_size.parse()?,
            channels_count: channels_count.parse()?,
            pain_points,
            industry: industry.parse()?,
        })
    }
}

/// Lead qualification tier derived from the ICP total
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IcpTier {
    Primary,
    Secondary,
    Nurture,
}

impl IcpTier {
    /// Classify using default thresholds (primary >= 70, secondary >= 50)
    pub fn from_score(score: u32) -> Self {
        Self::from_score_with_thresholds(score, 70, 50)
    }

    /// Boundary values belong to the higher tier
    pub fn from_score_with_thresholds(score: u32, primary_min: u32, secondary_min: u32) -> Self {
        if score >= primary_min {
            IcpTier::Primary
        } else if score >= secondary_min {
            IcpTier::Secondary
        } else {
            IcpTier::Nurture
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Primary => "primary",
            Self::Secondary => "secondary",
            Self::Nurture => "nurture",
        }
    }
}

/// ICP score with per-attribute breakdown
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScoreBreakdown {
    pub team_size_score: u32,
    pub channels_score: u32,
    pub pain_points_score: u32,
    pub industry_score: u32,
    /// Sum of the sub-scores, clamped to 0-100
    pub total_score: u32,
    pub tier: IcpTier,
}

impl ScoreBreakdown {
    pub fn tier_label(&self) -> &'static str {
        self.tier.as_str()
    }

    pub fn is_primary(&self) -> bool {
        self.tier == IcpTier::Primary
    }
}
