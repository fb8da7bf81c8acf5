//! Main settings module

use config::{Config, Environment, File};
use serde::{Deserialize, Serialize};

use crate::constants::confidence;
use crate::ConfigError;

/// Runtime environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum RuntimeEnvironment {
    /// Relaxed validation
    #[default]
    Development,
    Staging,
    /// All validations enforced
    Production,
}

impl RuntimeEnvironment {
    pub fn is_production(&self) -> bool {
        matches!(self, Self::Production)
    }

    /// Check if strict validation should be applied
    pub fn is_strict(&self) -> bool {
        matches!(self, Self::Production | Self::Staging)
    }
}

/// Main application settings
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct Settings {
    #[serde(default)]
    pub environment: RuntimeEnvironment,

    /// Evaluation loop settings, consumed by the caller's scheduler
    #[serde(default)]
    pub engine: EngineSettings,

    /// Path to the domain rule tables (YAML). Built-in tables when unset.
    #[serde(default)]
    pub domain_config_path: Option<String>,

    /// Path to the knowledge base (YAML/JSON). Embedded base when unset.
    #[serde(default)]
    pub knowledge_base_path: Option<String>,
}

/// Evaluation cycle settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EngineSettings {
    /// Periodic re-evaluation interval
    #[serde(default = "default_evaluation_interval")]
    pub evaluation_interval_secs: u64,
    /// Debounce window for activity-driven re-evaluation
    #[serde(default = "default_activity_debounce")]
    pub activity_debounce_ms: u64,
    #[serde(default = "default_min_answer_confidence")]
    pub min_answer_confidence: f64,
    #[serde(default = "default_related_questions_limit")]
    pub related_questions_limit: usize,
    #[serde(default)]
    pub typing: TypingConfig,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            evaluation_interval_secs: default_evaluation_interval(),
            activity_debounce_ms: default_activity_debounce(),
            min_answer_confidence: default_min_answer_confidence(),
            related_questions_limit: default_related_questions_limit(),
            typing: TypingConfig::default(),
        }
    }
}

fn default_evaluation_interval() -> u64 {
    30
}

fn default_activity_debounce() -> u64 {
    500
}

fn default_min_answer_confidence() -> f64 {
    confidence::DEFAULT_MIN
}

fn default_related_questions_limit() -> usize {
    3
}

/// Simulated typing delay before an assistant reply is shown
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TypingConfig {
    pub base_ms: u64,
    pub per_char_ms: u64,
    /// Upper bound before jitter
    pub max_ms: u64,
    /// Jitter is drawn from [0, jitter_ms]
    pub jitter_ms: u64,
}

impl Default for TypingConfig {
    fn default() -> Self {
        Self {
            base_ms: 600,
            per_char_ms: 15,
            max_ms: 2500,
            jitter_ms: 400,
        }
    }
}

impl Settings {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate settings
    pub fn validate(&self) -> Result<(), ConfigError> {
        let engine = &self.engine;

        if engine.evaluation_interval_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "engine.evaluation_interval_secs".to_string(),
                message: "Must be greater than 0".to_string(),
            });
        }

        if !(0.0..=1.0).contains(&engine.min_answer_confidence) {
            return Err(ConfigError::InvalidValue {
                field: "engine.min_answer_confidence".to_string(),
                message: format!(
                    "Must be between 0.0 and 1.0, got {}",
                    engine.min_answer_confidence
                ),
            });
        }

        if engine.typing.base_ms > engine.typing.max_ms {
            return Err(ConfigError::InvalidValue {
                field: "engine.typing.base_ms".to_string(),
                message: format!(
                    "base_ms ({}) exceeds max_ms ({})",
                    engine.typing.base_ms, engine.typing.max_ms
                ),
            });
        }

        if self.environment.is_strict() && self.domain_config_path.is_none() {
            tracing::warn!(
                environment = ?self.environment,
                "No domain_config_path set; using built-in rule tables"
            );
        }

        Ok(())
    }
}

/// Load settings from `config/default`, `config/{env}` and `ENGAGEMENT__*` variables
pub fn load_settings(env: Option<&str>) -> Result<Settings, ConfigError> {
    let mut builder = Config::builder();

    builder = builder.add_source(File::with_name("config/default").required(false));

    if let Some(env_name) = env {
        builder =
            builder.add_source(File::with_name(&format!("config/{}", env_name)).required(false));
    }

    builder = builder.add_source(
        Environment::with_prefix("ENGAGEMENT")
            .separator("__")
            .try_parsing(true),
    );

    let config = builder.build()?;
    let settings: Settings = config.try_deserialize()?;

    settings.validate()?;

    Ok(settings)
}
