//! Centralized constants for the engagement engine
//!
//! Single source of truth for module ids, page paths and the fixed
//! thresholds the rule tables default to.

/// Product module ids, in the order the site presents them
pub mod modules {
    pub const CONTENT_ENGINE: &str = "content-engine";
    pub const AD_BUILDER: &str = "ad-builder";
    pub const CAMPAIGN_MANAGER: &str = "campaign-manager";
    pub const ANALYTICS: &str = "analytics";
    pub const PUBLISHING: &str = "publishing";
    pub const BRAND_VOICE: &str = "brand-voice";

    pub const ALL: [&str; 6] = [
        CONTENT_ENGINE,
        AD_BUILDER,
        CAMPAIGN_MANAGER,
        ANALYTICS,
        PUBLISHING,
        BRAND_VOICE,
    ];
}

/// Site paths used as call-to-action targets
pub mod pages {
    pub const CALCULATOR: &str = "/calculator";
    pub const DEMO: &str = "/demo";
    pub const PRICING: &str = "/pricing";
    pub const CASES: &str = "/cases";
    pub const CHAT: &str = "#chat";

    /// Path of a module detail page
    pub fn module(module_id: &str) -> String {
        format!("/modules/{}", module_id)
    }
}

/// ICP tier breakpoints
pub mod icp {
    pub const PRIMARY_MIN: u32 = 70;
    pub const SECONDARY_MIN: u32 = 50;
    pub const PAIN_POINTS_CAP: u32 = 25;
    pub const MAX_SCORE: u32 = 100;
}

/// Answer confidence bands
pub mod confidence {
    pub const DIRECT_ANSWER: f64 = 0.5;
    pub const DISCLAIMER: f64 = 0.3;
    pub const SOFT_FALLBACK: f64 = 0.2;
    pub const DEFAULT_MIN: f64 = 0.3;
}

/// Achievement tier breakpoints (cumulative points)
pub mod achievement_tiers {
    pub const SILVER: u32 = 100;
    pub const GOLD: u32 = 250;
    pub const PLATINUM: u32 = 500;
    pub const DIAMOND: u32 = 1000;
}
