//! Nudge decision types and nudge history

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::action::CallToAction;

/// Trigger classes; milestone triggers outrank all others during resolution
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TriggerType {
    Milestone,
    TimeBased,
    Intent,
    Inactivity,
}

impl TriggerType {
    /// Resolution rank; lower ranks are resolved first.
    ///
    /// Milestones form their own bucket. Every other type shares one bucket
    /// ordered by declared priority alone.
    pub fn resolution_rank(&self) -> u8 {
        match self {
            Self::Milestone => 0,
            _ => 1,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Milestone => "milestone",
            Self::TimeBased => "time-based",
            Self::Intent => "intent",
            Self::Inactivity => "inactivity",
        }
    }
}

/// Weights for the three trigger score components
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerWeights {
    pub time: f64,
    pub engagement: f64,
    pub intent: f64,
}

impl Default for TriggerWeights {
    fn default() -> Self {
        Self {
            time: 0.3,
            engagement: 0.4,
            intent: 0.3,
        }
    }
}

/// Output of a trigger's scoring function
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TriggerScore {
    pub time_weight: f64,
    pub engagement_weight: f64,
    pub intent_weight: f64,
    pub total_score: f64,
    pub threshold: f64,
}

impl TriggerScore {
    pub fn passes(&self) -> bool {
        self.total_score >= self.threshold
    }
}

/// How often and when a trigger has fired
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub count: u32,
    pub last_shown_at: DateTime<Utc>,
}

/// Per-trigger firing history, owned by the caller
///
/// Recording a firing returns a new history; the original is untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NudgeHistory {
    entries: BTreeMap<String, HistoryEntry>,
}

impl NudgeHistory {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, trigger_id: &str) -> Option<&HistoryEntry> {
        self.entries.get(trigger_id)
    }

    pub fn count(&self, trigger_id: &str) -> u32 {
        self.entries.get(trigger_id).map(|e| e.count).unwrap_or(0)
    }

    /// Minutes elapsed since the trigger last fired, `None` if never shown
    pub fn minutes_since_shown(&self, trigger_id: &str, now: DateTime<Utc>) -> Option<f64> {
        self.entries.get(trigger_id).map(|entry| {
            let elapsed = now.signed_duration_since(entry.last_shown_at);
            elapsed.num_milliseconds() as f64 / 60_000.0
        })
    }

    /// Copy of this history with one more firing recorded for `trigger_id`
    pub fn recorded(&self, trigger_id: &str, shown_at: DateTime<Utc>) -> Self {
        let mut entries = self.entries.clone();
        let entry = entries.entry(trigger_id.to_string()).or_insert(HistoryEntry {
            count: 0,
            last_shown_at: shown_at,
        });
        entry.count = entry.count.saturating_add(1);
        entry.last_shown_at = shown_at;
        Self { entries }
    }

    /// Copy of this history without ids that are no longer declared
    pub fn pruned<'a>(&self, known_ids: impl IntoIterator<Item = &'a str>) -> Self {
        let known: Vec<&str> = known_ids.into_iter().collect();
        Self {
            entries: self
                .entries
                .iter()
                .filter(|(id, _)| known.contains(&id.as_str()))
                .map(|(id, entry)| (id.clone(), *entry))
                .collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &HistoryEntry)> {
        self.entries.iter().map(|(id, entry)| (id.as_str(), entry))
    }
}

/// A single proactive suggestion chosen for this cycle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Nudge {
    pub trigger_id: String,
    pub trigger_type: TriggerType,
    pub priority: u8,
    /// Present when the trigger declares a scoring rule
    pub score: Option<TriggerScore>,
    pub cta: Option<CallToAction>,
}
