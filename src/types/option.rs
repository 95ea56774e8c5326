//! Player options offered by a scene

use serde::{Deserialize, Serialize};

/// Kind of action an option performs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionType {
    Investigate,
    Talk,
    Fight,
    Hack,
    Move,
}

impl ActionType {
    /// Hack and Investigate need concentration
    pub fn is_complex(&self) -> bool {
        matches!(self, ActionType::Hack | ActionType::Investigate)
    }

    /// Fight and Move survive a BROKEN mind
    pub fn is_basic(&self) -> bool {
        matches!(self, ActionType::Fight | ActionType::Move)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ActionType::Investigate => "investigate",
            ActionType::Talk => "talk",
            ActionType::Fight => "fight",
            ActionType::Hack => "hack",
            ActionType::Move => "move",
        }
    }
}

impl std::fmt::Display for ActionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Risk hint attached by the generator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// One choice presented to the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerOption {
    /// Unique within a scene
    pub id: String,
    /// Display text, the only field the gate may rewrite
    pub text: String,
    #[serde(rename = "type")]
    pub action_type: ActionType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub risk_level: Option<RiskLevel>,
}

impl PlayerOption {
    pub fn new(id: impl Into<String>, text: impl Into<String>, action_type: ActionType) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            action_type,
            risk_level: None,
        }
    }

    pub fn with_risk(mut self, risk: RiskLevel) -> Self {
        self.risk_level = Some(risk);
        self
    }

    /// Low-risk options are exempt from random removal
    pub fn is_low_risk(&self) -> bool {
        self.risk_level == Some(RiskLevel::Low)
    }
}
