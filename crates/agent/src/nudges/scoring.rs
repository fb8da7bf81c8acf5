//! Multi-signal trigger scoring
//!
//! Three normalized signals, each in 0-1:
//! - time: `min(time_on_site / 600, 1)`
//! - engagement: `0.7 * min(modules / 6, 1) + 0.3 * min(steps / 5, 1)`
//! - intent: `min(icp / 100 + calculator bonus + pricing bonus, 1)`
//!
//! The total is their weighted sum. Saturation points and bonuses come from
//! [`ScoreNormalization`].

use engagement_config::{AdaptiveThresholds, ScoreNormalization};
use engagement_core::{BehaviorSnapshot, TriggerScore, TriggerWeights};

fn ratio(value: f64, saturation: f64) -> f64 {
    if saturation <= 0.0 {
        return 1.0;
    }
    (value / saturation).clamp(0.0, 1.0)
}

/// Score a snapshot against `threshold` with the given weights
pub fn calculate_trigger_score(
    snapshot: &BehaviorSnapshot,
    weights: &TriggerWeights,
    threshold: f64,
    normalization: &ScoreNormalization,
) -> TriggerScore {
    let time_weight = ratio(
        snapshot.time_on_site_seconds as f64,
        normalization.time_saturation_seconds,
    );

    let modules = ratio(
        snapshot.modules_viewed_count() as f64,
        normalization.modules_saturation,
    );
    let steps = ratio(snapshot.completed_steps as f64, normalization.steps_saturation);
    let engagement_weight =
        normalization.modules_share * modules + (1.0 - normalization.modules_share) * steps;

    let mut intent = snapshot.icp_score as f64 / 100.0;
    if snapshot.calculator_completed {
        intent += normalization.calculator_intent_bonus;
    }
    if snapshot.has_seen_pricing {
        intent += normalization.pricing_intent_bonus;
    }
    let intent_weight = intent.clamp(0.0, 1.0);

    let total_score = weights.time * time_weight
        + weights.engagement * engagement_weight
        + weights.intent * intent_weight;

    TriggerScore {
        time_weight,
        engagement_weight,
        intent_weight,
        total_score,
        threshold,
    }
}

/// Per-visitor threshold.
///
/// High-ICP visitors who explored several modules get the low bar; visitors
/// who have seen nothing yet and only just arrived get the high bar.
pub fn adaptive_threshold(snapshot: &BehaviorSnapshot, adaptive: &AdaptiveThresholds) -> f64 {
    let modules = snapshot.modules_viewed_count();

    if snapshot.icp_score >= adaptive.high_value_min_icp && modules >= adaptive.engaged_min_modules
    {
        adaptive.engaged_high_value
    } else if modules == 0 && snapshot.time_on_site_seconds < adaptive.passive_max_seconds {
        adaptive.passive_first_visit
    } else {
        adaptive.default
    }
}
