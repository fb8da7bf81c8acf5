//! Configuration management for the engagement engine
//!
//! Supports loading configuration from:
//! - YAML/TOML files (`config/default`, `config/{env}`)
//! - Environment variables (ENGAGEMENT__ prefix)
//!
//! # Domain Configuration
//!
//! Rule tables (ICP score tables, nudge weights, achievement tiers, journey
//! paths, matcher boosts) live in a single domain YAML file loaded into
//! [`DomainConfig`]. Every section has defaults, so a partial file only
//! overrides what it names.

pub mod constants;
pub mod domain;
pub mod settings;

pub use domain::{
    AchievementsConfig, AdaptiveThresholds, ConfidenceBands, ContextBoosts, DomainConfig,
    IcpConfig, JourneyConfig, MatchingConfig, NudgeConfig, PredictorThresholds,
    ScoreNormalization, TierLadder, TierThresholds, TriggerOverride,
};
pub use settings::{load_settings, EngineSettings, RuntimeEnvironment, Settings, TypingConfig};

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Missing required field: {0}")]
    MissingField(String),

    #[error("Invalid value for {field}: {message}")]
    InvalidValue { field: String, message: String },
}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}
