//! ICP Scorer
//!
//! Table lookup per profile attribute:
//! - team size, channel count and industry each map a band to a fixed score
//! - pain-point scores are summed, then capped (the one nonlinearity)
//! - the total is clamped to 0-100 and classified into a tier
//!
//! Tables come from the `icp` section of the domain config, so this is a
//! pure function of `(config, profile)`.

use engagement_config::IcpConfig;
use engagement_core::{IcpScoringStrategy, IcpTier, ProfileInput, ScoreBreakdown};
use std::collections::BTreeMap;

use engagement_config::constants::icp::MAX_SCORE;

/// Config-driven [`IcpScoringStrategy`]
#[derive(Debug, Clone, Default)]
pub struct IcpScorer {
    config: IcpConfig,
}

impl IcpScorer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: &IcpConfig) -> Self {
        Self {
            config: config.clone(),
        }
    }

    pub fn config(&self) -> &IcpConfig {
        &self.config
    }

    /// Pain-point sub-score after the cap
    pub fn pain_points_score(&self, input: &ProfileInput) -> u32 {
        let raw = input
            .pain_points
            .iter()
            .map(|p| lookup(&self.config.pain_points, p, "pain_points", p.as_str()))
            .fold(0u32, u32::saturating_add);
        raw.min(self.config.pain_points_cap)
    }
}

impl IcpScoringStrategy for IcpScorer {
    fn score(&self, input: &ProfileInput) -> ScoreBreakdown {
        let team_size_score = lookup(
            &self.config.team_size,
            &input.team_size,
            "team_size",
            input.team_size.as_str(),
        );
        let channels_score = lookup(
            &self.config.channels,
            &input.channels_count,
            "channels",
            input.channels_count.as_str(),
        );
        let pain_points_score = self.pain_points_score(input);
        let industry_score = lookup(
            &self.config.industry,
            &input.industry,
            "industry",
            input.industry.as_str(),
        );

        let total_score = team_size_score
            .saturating_add(channels_score)
            .saturating_add(pain_points_score)
            .saturating_add(industry_score)
            .min(MAX_SCORE);
        let tier = self.tier(total_score);

        tracing::debug!(
            team_size_score,
            channels_score,
            pain_points_score,
            industry_score,
            total_score,
            tier = tier.as_str(),
            "Scored profile"
        );

        ScoreBreakdown {
            team_size_score,
            channels_score,
            pain_points_score,
            industry_score,
            total_score,
            tier,
        }
    }

    fn tier(&self, total_score: u32) -> IcpTier {
        IcpTier::from_score_with_thresholds(
            total_score,
            self.config.thresholds.primary,
            self.config.thresholds.secondary,
        )
    }
}

/// Band score, or 0 with a warning when a custom table omits the band
fn lookup<K: Ord>(table: &BTreeMap<K, u32>, key: &K, table_name: &'static str, band: &str) -> u32 {
    match table.get(key) {
        Some(score) => *score,
        None => {
            tracing::warn!(table = table_name, band, "Band missing from ICP score table");
            0
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use engagement_core::{ChannelsCount, Industry, PainPoint, TeamSize};

    fn profile(pain_points: &[PainPoint]) -> ProfileInput {
        ProfileInput::new(
            TeamSize::Medium,
            ChannelsCount::Many,
            pain_points.iter().copied(),
            Industry::Ecommerce,
        )
    }

    #[test]
    fn test_ideal_profile_scores_100() {
        let breakdown = IcpScorer::new().score(&profile(&[
            PainPoint::AgencyCost,
            PainPoint::ScalingProblem,
        ]));

        assert_eq!(breakdown.team_size_score, 30);
        assert_eq!(breakdown.channels_score, 25);
        assert_eq!(breakdown.pain_points_score, 25);
        assert_eq!(breakdown.industry_score, 20);
        assert_eq!(breakdown.total_score, 100);
        assert_eq!(breakdown.tier, IcpTier::Primary);
    }

    #[test]
    fn test_pain_points_capped() {
        let scorer = IcpScorer::new();
        // 15 + 12 + 10 + 8 = 45 raw
        let input = profile(&[
            PainPoint::AgencyCost,
            PainPoint::ScalingProblem,
            PainPoint::ContentQuality,
            PainPoint::TimeConsuming,
        ]);
        assert_eq!(scorer.pain_points_score(&input), 25);

        let single = profile(&[PainPoint::NoStrategy]);
        assert_eq!(scorer.pain_points_score(&single), 5);
        assert_eq!(scorer.pain_points_score(&profile(&[])), 0);
    }

    #[test]
    fn test_tier_boundaries_belong_to_higher_tier() {
        let scorer = IcpScorer::new();
        assert_eq!(scorer.tier(70), IcpTier::Primary);
        assert_eq!(scorer.tier(69), IcpTier::Secondary);
        assert_eq!(scorer.tier(50), IcpTier::Secondary);
        assert_eq!(scorer.tier(49), IcpTier::Nurture);
    }

    #[test]
    fn test_nurture_profile() {
        let input = ProfileInput::new(
            TeamSize::Large,
            ChannelsCount::Few,
            [PainPoint::NoStrategy],
            Industry::Other,
        );
        let breakdown = IcpScorer::new().score(&input);
        // 10 + 10 + 5 + 5
        assert_eq!(breakdown.total_score, 30);
        assert_eq!(breakdown.tier_label(), "nurture");
    }

    #[test]
    fn test_missing_band_contributes_zero() {
        let mut config = IcpConfig::default();
        config.industry.remove(&Industry::Ecommerce);
        let scorer = IcpScorer::from_config(&config);

        let breakdown = scorer.score(&profile(&[PainPoint::AgencyCost]));
        assert_eq!(breakdown.industry_score, 0);
        assert_eq!(breakdown.total_score, 30 + 25 + 15);
    }

    #[test]
    fn test_total_clamped_with_generous_tables() {
        let mut config = IcpConfig::default();
        config.team_size.insert(TeamSize::Medium, 60);
        config.pain_points_cap = 50;
        let scorer = IcpScorer::from_config(&config);

        let breakdown = scorer.score(&profile(&[PainPoint::AgencyCost, PainPoint::ScalingProblem]));
        assert_eq!(breakdown.total_score, 100);
        assert_eq!(scorer.total(&profile(&[])), 100);
    }

    #[test]
    fn test_oversized_table_values_saturate() {
        let mut config = IcpConfig::default();
        config.team_size.insert(TeamSize::Medium, u32::MAX);
        config.pain_points.insert(PainPoint::AgencyCost, u32::MAX);
        config.pain_points_cap = u32::MAX;
        let scorer = IcpScorer::from_config(&config);

        let breakdown = scorer.score(&profile(&[PainPoint::AgencyCost, PainPoint::ScalingProblem]));
        assert_eq!(breakdown.total_score, 100);
        assert_eq!(breakdown.tier, IcpTier::Primary);
    }
}
