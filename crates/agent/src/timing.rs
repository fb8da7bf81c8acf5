//! Simulated typing delay for assistant replies
//!
//! The delay grows with reply length up to a cap, plus jitter. Jitter is a
//! pure function of the seed so callers and tests get repeatable values;
//! pass a fresh seed per reply for variation.

use engagement_config::TypingConfig;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::Duration;

/// Delay before showing a reply of `text_len` chars.
///
/// Always within `[min(base + per_char * len, max), that + jitter_ms]`.
pub fn typing_delay(text_len: usize, seed: u64, config: &TypingConfig) -> Duration {
    let length_ms = config
        .per_char_ms
        .saturating_mul(text_len as u64)
        .saturating_add(config.base_ms);
    let capped = length_ms.min(config.max_ms);

    let jitter = if config.jitter_ms == 0 {
        0
    } else {
        let mut rng = StdRng::seed_from_u64(seed);
        rng.gen_range(0..=config.jitter_ms)
    };

    Duration::from_millis(capped + jitter)
}
