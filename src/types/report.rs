//! Output structures for one gated turn

use chrono::{DateTime, Utc};
use colored::Colorize;
use serde::{Deserialize, Serialize};

use crate::types::{
    Atmosphere, GameOverDecision, Notice, ParsedNarrative, PlayerOption, SanityTier,
    StyleParameters, TensionLevel,
};

/// Everything the presentation layer needs for one scene
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnReport {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<String>,
    /// Effective sanity (override applied)
    pub sanity: u8,
    pub tier: SanityTier,
    /// Effective tension (override applied)
    pub tension: u8,
    pub tension_level: TensionLevel,
    pub atmosphere: Atmosphere,
    pub narrative: ParsedNarrative,
    /// Gated and annotated options
    pub options: Vec<PlayerOption>,
    /// Options offered by upstream before gating
    pub options_offered: usize,
    pub style: StyleParameters,
    /// Full-screen red overlay, decided from tension alone
    pub high_tension_overlay: bool,
    /// Show hallucination fragments in their own panel
    pub show_hallucination_panel: bool,
    pub game_over: GameOverDecision,
    pub notices: Vec<Notice>,
}

impl TurnReport {
    /// Format for terminal display (with colors)
    pub fn to_terminal_string(&self) -> String {
        format!("{} {}", self.tier.emoji(), self.to_parseable_string())
            .color(self.tier.color())
            .to_string()
    }

    /// Format for parseable output (no colors)
    pub fn to_parseable_string(&self) -> String {
        format!(
            "sanity={} | tier={} | tension={} ({}) | options={}/{} | atmosphere={} | game_over={}",
            self.sanity,
            self.tier,
            self.tension,
            self.tension_level,
            self.options.len(),
            self.options_offered,
            self.atmosphere,
            self.game_over.is_over
        )
    }
}

/// Timestamped report for CLI and HTTP output
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TurnEnvelope {
    pub evaluated_at: DateTime<Utc>,
    pub report: TurnReport,
}

impl TurnEnvelope {
    pub fn new(report: TurnReport) -> Self {
        Self {
            evaluated_at: Utc::now(),
            report,
        }
    }
}
