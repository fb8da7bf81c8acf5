//! Aggregated domain configuration
//!
//! Loads every rule table from one YAML file. Sections missing from the
//! file keep their defaults, so an empty file yields the built-in tables.

use serde::{Deserialize, Serialize};
use std::path::Path;

use super::{AchievementsConfig, IcpConfig, JourneyConfig, MatchingConfig, NudgeConfig};
use crate::constants::icp;
use crate::ConfigError;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DomainConfig {
    #[serde(default)]
    pub icp: IcpConfig,
    #[serde(default)]
    pub nudges: NudgeConfig,
    #[serde(default)]
    pub achievements: AchievementsConfig,
    #[serde(default)]
    pub journeys: JourneyConfig,
    #[serde(default)]
    pub matching: MatchingConfig,
}

impl DomainConfig {
    /// Load and validate a domain YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ParseError(format!("Failed to read domain config: {}", e)))?;

        let config = Self::from_yaml(&content)?;

        tracing::info!(
            path = %path.display(),
            trigger_overrides = config.nudges.overrides.len(),
            escalation_keywords = config.matching.escalation_keywords.len(),
            "Loaded domain config"
        );

        Ok(config)
    }

    pub fn from_yaml(content: &str) -> Result<Self, ConfigError> {
        // An empty document deserializes to unit, not a map
        if content.trim().is_empty() {
            return Ok(Self::default());
        }

        let config: Self = serde_yaml::from_str(content)
            .map_err(|e| ConfigError::ParseError(format!("Failed to parse domain config: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let thresholds = &self.icp.thresholds;
        if thresholds.secondary > thresholds.primary || thresholds.primary > 100 {
            return Err(ConfigError::InvalidValue {
                field: "icp.thresholds".to_string(),
                message: format!(
                    "Expected secondary <= primary <= 100, got {} / {}",
                    thresholds.secondary, thresholds.primary
                ),
            });
        }

        if let Some((table, band, score)) = self.icp.band_above(icp::MAX_SCORE) {
            return Err(ConfigError::InvalidValue {
                field: format!("icp.{}.{}", table, band),
                message: format!("Band score {} exceeds {}", score, icp::MAX_SCORE),
            });
        }
        if self.icp.pain_points_cap > icp::MAX_SCORE {
            return Err(ConfigError::InvalidValue {
                field: "icp.pain_points_cap".to_string(),
                message: format!("Must be at most {}", icp::MAX_SCORE),
            });
        }

        let w = &self.nudges.default_weights;
        let sum = w.time + w.engagement + w.intent;
        if (sum - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidValue {
                field: "nudges.default_weights".to_string(),
                message: format!("Weights must sum to 1.0, got {:.3}", sum),
            });
        }

        let adaptive = &self.nudges.adaptive;
        for (field, value) in [
            ("engaged_high_value", adaptive.engaged_high_value),
            ("passive_first_visit", adaptive.passive_first_visit),
            ("default", adaptive.default),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ConfigError::InvalidValue {
                    field: format!("nudges.adaptive.{}", field),
                    message: format!("Must be between 0.0 and 1.0, got {}", value),
                });
            }
        }

        if !self.achievements.tiers.is_ascending() {
            return Err(ConfigError::InvalidValue {
                field: "achievements.tiers".to_string(),
                message: "Tier breakpoints must be strictly ascending".to_string(),
            });
        }

        if self.journeys.target_modules.is_empty() {
            return Err(ConfigError::MissingField("journeys.target_modules".to_string()));
        }

        let matching = &self.matching;
        if (matching.keyword_weight + matching.question_weight - 1.0).abs() > 0.01 {
            return Err(ConfigError::InvalidValue {
                field: "matching.keyword_weight".to_string(),
                message: "keyword_weight + question_weight must equal 1.0".to_string(),
            });
        }

        let bands = &matching.bands;
        if !(bands.soft_fallback <= bands.disclaimer && bands.disclaimer <= bands.direct_answer)
            || bands.direct_answer > 1.0
            || bands.soft_fallback < 0.0
        {
            return Err(ConfigError::InvalidValue {
                field: "matching.bands".to_string(),
                message: "Expected 0 <= soft_fallback <= disclaimer <= direct_answer <= 1"
                    .to_string(),
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_yaml_is_default() {
        let config = DomainConfig::from_yaml("").unwrap();
        assert_eq!(config.icp.pain_points_cap, 25);
        assert_eq!(config.matching.bands.direct_answer, 0.5);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
icp:
  pain_points_cap: 20
journeys:
  minutes_per_module: 4.5
"#
        )
        .unwrap();

        let config = DomainConfig::load(file.path()).unwrap();
        assert_eq!(config.icp.pain_points_cap, 20);
        assert_eq!(config.journeys.minutes_per_module, 4.5);
        assert_eq!(config.journeys.target_modules.len(), 6);
    }

    #[test]
    fn test_missing_file() {
        let err = DomainConfig::load("/nonexistent/domain.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::FileNotFound(_)));
    }

    #[test]
    fn test_rejects_bad_weights() {
        let yaml = r#"
nudges:
  default_weights:
    time: 0.5
    engagement: 0.5
    intent: 0.5
"#;
        let err = DomainConfig::from_yaml(yaml).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidValue { .. }));
    }

    #[test]
    fn test_rejects_oversized_band_score() {
        let yaml = r#"
icp:
  team_size:
    "1-5": 15
    "5-15": 25
    "15-50": 4294967295
    "50+": 10
"#;
        let err = DomainConfig::from_yaml(yaml).unwrap_err();
        match err {
            ConfigError::InvalidValue { field, .. } => assert_eq!(field, "icp.team_size.15-50"),
            other => panic!("unexpected error: {:?}", other),
        }
    }

    #[test]
    fn test_rejects_inverted_tiers() {
        let yaml = r#"
icp:
  thresholds:
    primary: 40
    secondary: 60
"#;
        assert!(DomainConfig::from_yaml(yaml).is_err());
    }
}
