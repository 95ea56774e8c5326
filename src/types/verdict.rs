//! Game-over verdicts

use serde::{Deserialize, Serialize};

use crate::types::Notice;

/// Why the local evaluator ended the session
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameOverReason {
    /// hp reached zero
    Death,
    /// sanity reached zero
    SanityCollapse,
    /// suspicion reached the configured limit
    Exposed,
}

impl GameOverReason {
    /// Player-facing reason text
    pub fn message(&self) -> &'static str {
        match self {
            GameOverReason::Death => "Your body gives out on the wet concrete. The city keeps glowing.",
            GameOverReason::SanityCollapse => "You lost your mind for good in the flicker of the neon.",
            GameOverReason::Exposed => "Too many eyes on you. The syndicate closes the file, and you with it.",
        }
    }
}

/// Advisory result of the local evaluator
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverVerdict {
    pub is_over: bool,
    pub reason: Option<GameOverReason>,
}

impl GameOverVerdict {
    pub fn alive() -> Self {
        Self { is_over: false, reason: None }
    }

    pub fn over(reason: GameOverReason) -> Self {
        Self { is_over: true, reason: Some(reason) }
    }
}

/// Final game-over state for a turn: upstream flag, local cross-check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOverDecision {
    /// Always the upstream flag
    pub is_over: bool,
    /// Upstream reason, or the local one when upstream gave none
    pub reason: Option<String>,
    pub local: GameOverVerdict,
    /// Set when the local evaluator disagrees with upstream
    pub discrepancy: Option<Notice>,
}
