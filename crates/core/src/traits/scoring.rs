//! ICP scoring strategy trait
//!
//! # Example
//!
//! ```ignore
//! use engagement_core::traits::IcpScoringStrategy;
//!
//! let scorer = IcpScorer::from_config(&domain.icp);
//! let breakdown = scorer.score(&profile);
//! assert!(breakdown.total_score <= 100);
//! ```

use crate::profile::{IcpTier, ProfileInput, ScoreBreakdown};

/// Qualifies a visitor profile into a 0-100 score and tier
pub trait IcpScoringStrategy: Send + Sync {
    /// Score a profile. Pure; never fails for a valid profile.
    fn score(&self, input: &ProfileInput) -> ScoreBreakdown;

    /// Tier for an already computed total
    fn tier(&self, total_score: u32) -> IcpTier;

    /// Total only
    fn total(&self, input: &ProfileInput) -> u32 {
        self.score(input).total_score
    }
}
