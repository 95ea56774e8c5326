//! Sanity tier and tension level definitions

use colored::Color;
use serde::{Deserialize, Serialize};

/// The four sanity tiers, least to most severe
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SanityTier {
    /// sanity >= 70, narration is reliable
    Lucid,
    /// 40 <= sanity < 70, reality starts to wobble
    Stressed,
    /// 20 <= sanity < 40, hallucinations are mandatory
    Breaking,
    /// sanity < 20, narration is mostly hallucination
    Broken,
}

impl SanityTier {
    /// All tiers in severity order
    pub const ALL: [SanityTier; 4] = [
        SanityTier::Lucid,
        SanityTier::Stressed,
        SanityTier::Breaking,
        SanityTier::Broken,
    ];

    /// Terminal color for this tier
    pub fn color(&self) -> Color {
        match self {
            SanityTier::Lucid => Color::Green,
            SanityTier::Stressed => Color::Yellow,
            SanityTier::Breaking => Color::Red,
            SanityTier::Broken => Color::BrightRed,
        }
    }

    /// Get emoji for tier
    pub fn emoji(&self) -> &'static str {
        match self {
            SanityTier::Lucid => "🟢",
            SanityTier::Stressed => "🟡",
            SanityTier::Breaking => "🔴",
            SanityTier::Broken => "💀",
        }
    }

    /// Sanity band covered by this tier, inclusive
    pub fn band(&self) -> (u8, u8) {
        match self {
            SanityTier::Lucid => (crate::SANITY_THRESHOLD_LUCID, crate::STAT_MAX),
            SanityTier::Stressed => (
                crate::SANITY_THRESHOLD_STRESSED,
                crate::SANITY_THRESHOLD_LUCID - 1,
            ),
            SanityTier::Breaking => (
                crate::SANITY_THRESHOLD_BREAKING,
                crate::SANITY_THRESHOLD_STRESSED - 1,
            ),
            SanityTier::Broken => (0, crate::SANITY_THRESHOLD_BREAKING - 1),
        }
    }
}

impl std::fmt::Display for SanityTier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            SanityTier::Lucid => "LUCID",
            SanityTier::Stressed => "STRESSED",
            SanityTier::Breaking => "BREAKING",
            SanityTier::Broken => "BROKEN",
        };
        write!(f, "{}", name)
    }
}

/// Coarse tension readout used by debug tooling
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TensionLevel {
    /// tension < 40
    Calm,
    /// 40 <= tension < 70
    Tense,
    /// 70 <= tension < 90
    Extreme,
    /// tension >= 90
    Critical,
}

impl std::fmt::Display for TensionLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            TensionLevel::Calm => "CALM",
            TensionLevel::Tense => "TENSE",
            TensionLevel::Extreme => "EXTREME",
            TensionLevel::Critical => "CRITICAL",
        };
        write!(f, "{}", name)
    }
}
