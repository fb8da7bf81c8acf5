//! Behavior snapshot: read-only session state for one evaluation cycle

use chrono::{DateTime, Datelike, FixedOffset, Timelike, Utc, Weekday};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::HashSet;

use crate::profile::Industry;

/// Session state captured by the caller at evaluation time
///
/// Built fresh every cycle. `modules_viewed` keeps first-view order.
/// Duplicates are dropped on deserialization and by [`BehaviorSnapshot::with_module`];
/// counts always use distinct ids.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BehaviorSnapshot {
    pub time_on_site_seconds: u64,
    #[serde(deserialize_with = "distinct_in_order")]
    pub modules_viewed: Vec<String>,
    pub completed_steps: u32,
    pub messages_count: u32,
    pub questions_asked: u32,
    pub calculator_completed: bool,
    pub has_scheduled_demo: bool,
    pub has_seen_pricing: bool,
    pub inactivity_seconds: u64,
    pub icp_score: u32,
    #[serde(default)]
    pub industry: Option<Industry>,
    #[serde(default)]
    pub current_page: Option<String>,
    /// Capture time in the visitor's local offset
    pub captured_at: DateTime<FixedOffset>,
}

fn distinct_in_order<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Vec::<String>::deserialize(deserializer)?;
    let mut seen = HashSet::with_capacity(raw.len());
    Ok(raw.into_iter().filter(|m| seen.insert(m.clone())).collect())
}

impl Default for BehaviorSnapshot {
    fn default() -> Self {
        Self {
            time_on_site_seconds: 0,
            modules_viewed: Vec::new(),
            completed_steps: 0,
            messages_count: 0,
            questions_asked: 0,
            calculator_completed: false,
            has_scheduled_demo: false,
            has_seen_pricing: false,
            inactivity_seconds: 0,
            icp_score: 0,
            industry: None,
            current_page: None,
            captured_at: DateTime::<Utc>::default().into(),
        }
    }
}

impl BehaviorSnapshot {
    pub fn new(captured_at: DateTime<FixedOffset>) -> Self {
        Self {
            captured_at,
            ..Self::default()
        }
    }

    /// Append a module id, keeping first-view order
    pub fn with_module(mut self, module_id: impl Into<String>) -> Self {
        let module_id = module_id.into();
        if !self.modules_viewed.contains(&module_id) {
            self.modules_viewed.push(module_id);
        }
        self
    }

    pub fn with_icp_score(mut self, icp_score: u32) -> Self {
        self.icp_score = icp_score.min(100);
        self
    }

    /// Distinct modules viewed
    pub fn modules_viewed_count(&self) -> usize {
        self.modules_viewed
            .iter()
            .map(String::as_str)
            .collect::<HashSet<_>>()
            .len()
    }

    pub fn has_viewed(&self, module_id: &str) -> bool {
        self.modules_viewed.iter().any(|m| m == module_id)
    }

    pub fn last_viewed_module(&self) -> Option<&str> {
        self.modules_viewed.last().map(|m| m.as_str())
    }

    /// Capture time as UTC, for comparisons against history timestamps
    pub fn captured_at_utc(&self) -> DateTime<Utc> {
        self.captured_at.with_timezone(&Utc)
    }

    /// Hour of day (0-23) in the visitor's local time
    pub fn local_hour(&self) -> u32 {
        self.captured_at.hour()
    }

    pub fn is_weekend(&self) -> bool {
        matches!(self.captured_at.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// True when the visitor is on a page whose path mentions `needle`
    pub fn current_page_contains(&self, needle: &str) -> bool {
        self.current_page
            .as_deref()
            .map(|page| page.to_lowercase().contains(&needle.to_lowercase()))
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn at(rfc3339: &str) -> DateTime<FixedOffset> {
        DateTime::parse_from_rfc3339(rfc3339).unwrap()
    }

    #[test]
    fn test_with_module_dedups_and_keeps_order() {
        let snapshot = BehaviorSnapshot::default()
            .with_module("ad-builder")
            .with_module("analytics")
            .with_module("ad-builder");

        assert_eq!(snapshot.modules_viewed, vec!["ad-builder", "analytics"]);
        assert_eq!(snapshot.last_viewed_module(), Some("analytics"));
    }

    #[test]
    fn test_deserialize_drops_repeated_modules() {
        let json = r#"{
            "time_on_site_seconds": 90,
            "modules_viewed": ["analytics", "ad-builder", "analytics", "analytics"],
            "completed_steps": 0,
            "messages_count": 0,
            "questions_asked": 0,
            "calculator_completed": false,
            "has_scheduled_demo": false,
            "has_seen_pricing": false,
            "inactivity_seconds": 0,
            "icp_score": 0,
            "captured_at": "2024-06-11T10:00:00+02:00"
        }"#;
        let snapshot: BehaviorSnapshot = serde_json::from_str(json).unwrap();

        assert_eq!(snapshot.modules_viewed, vec!["analytics", "ad-builder"]);
        assert_eq!(snapshot.modules_viewed_count(), 2);
    }

    #[test]
    fn test_count_ignores_repeats_in_literal() {
        let snapshot = BehaviorSnapshot {
            modules_viewed: vec!["analytics".into(), "analytics".into(), "analytics".into()],
            ..Default::default()
        };
        assert_eq!(snapshot.modules_viewed_count(), 1);
        assert!(snapshot.has_viewed("analytics"));
    }

    #[test]
    fn test_local_time_helpers() {
        // Saturday 23:30 in UTC+2
        let snapshot = BehaviorSnapshot::new(at("2024-06-15T23:30:00+02:00"));
        assert_eq!(snapshot.local_hour(), 23);
        assert!(snapshot.is_weekend());
        assert_eq!(snapshot.captured_at_utc().hour(), 21);
    }

    #[test]
    fn test_current_page_contains() {
        let snapshot = BehaviorSnapshot {
            current_page: Some("/Modules/Ad-Builder".to_string()),
            ..Default::default()
        };
        assert!(snapshot.current_page_contains("ad-builder"));
        assert!(!snapshot.current_page_contains("calculator"));
    }

    #[test]
    fn test_icp_score_clamped() {
        let snapshot = BehaviorSnapshot::default().with_icp_score(140);
        assert_eq!(snapshot.icp_score, 100);
    }
}
