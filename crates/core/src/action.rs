//! Next-best-action recommendation types

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Navigate,
    SuggestModule,
    OpenCalculator,
    ScheduleDemo,
    OpenChat,
}

/// Label plus navigation target the presentation layer can render as a button
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CallToAction {
    pub label: String,
    pub target: String,
}

impl CallToAction {
    pub fn new(label: impl Into<String>, target: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            target: target.into(),
        }
    }
}

/// One recommended next step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NextBestAction {
    pub id: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    pub priority: u8,
    /// 0.0-1.0
    pub confidence: f64,
    /// Diagnostic only, never shown to the visitor
    pub reason: String,
    pub action: Option<CallToAction>,
}
