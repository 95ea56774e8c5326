//! Notice codes attached to a gated turn
//! Recoverable conditions: logged and reported, never fatal

use serde::{Deserialize, Serialize};

/// Notice codes for degraded or unusual turns
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(non_camel_case_types)]
pub enum NoticeCode {
    /// Local evaluator says game over, upstream says it is not
    N001_GAME_OVER_CONTRADICTED,
    /// A stat arrived outside [0, 100] and was clamped
    N002_STAT_CLAMPED,
    /// Debug override replaced authoritative values for this render
    N003_DEBUG_OVERRIDE_ACTIVE,
    /// The option gate removed every option
    N004_ALL_OPTIONS_GATED,
}

impl NoticeCode {
    /// Get the code string (for logging)
    pub fn code(&self) -> &'static str {
        match self {
            Self::N001_GAME_OVER_CONTRADICTED => "N001_GAME_OVER_CONTRADICTED",
            Self::N002_STAT_CLAMPED => "N002_STAT_CLAMPED",
            Self::N003_DEBUG_OVERRIDE_ACTIVE => "N003_DEBUG_OVERRIDE_ACTIVE",
            Self::N004_ALL_OPTIONS_GATED => "N004_ALL_OPTIONS_GATED",
        }
    }

    /// Get human-readable description
    pub fn description(&self) -> &'static str {
        match self {
            Self::N001_GAME_OVER_CONTRADICTED => "Local game-over check disagrees with upstream",
            Self::N002_STAT_CLAMPED => "Stat clamped into range",
            Self::N003_DEBUG_OVERRIDE_ACTIVE => "Debug override in effect",
            Self::N004_ALL_OPTIONS_GATED => "No options survived the gate",
        }
    }
}

impl std::fmt::Display for NoticeCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.code(), self.description())
    }
}

/// A notice with its context
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub code: NoticeCode,
    pub detail: String,
}

impl Notice {
    pub fn new(code: NoticeCode, detail: impl Into<String>) -> Self {
        Self { code, detail: detail.into() }
    }
}

impl std::fmt::Display for Notice {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.code.code(), self.detail)
    }
}
