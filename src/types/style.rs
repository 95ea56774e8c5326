//! Visual style parameters derived per render

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

/// Tier-driven visual effect
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EffectTag {
    SlowPulse,
    Shake,
    SlightBlur,
    Glitch,
    HeavyBlur,
    FastPulse,
}

impl EffectTag {
    pub fn as_str(&self) -> &'static str {
        match self {
            EffectTag::SlowPulse => "slow-pulse",
            EffectTag::Shake => "shake",
            EffectTag::SlightBlur => "slight-blur",
            EffectTag::Glitch => "glitch",
            EffectTag::HeavyBlur => "heavy-blur",
            EffectTag::FastPulse => "fast-pulse",
        }
    }

    /// Utility class used by the web front-end
    pub fn css_class(&self) -> &'static str {
        match self {
            EffectTag::SlowPulse => "animate-pulse-slow",
            EffectTag::Shake => "animate-shake",
            EffectTag::SlightBlur => "filter-blur-sm",
            EffectTag::Glitch => "animate-glitch",
            EffectTag::HeavyBlur => "filter-blur-md",
            EffectTag::FastPulse => "animate-pulse-fast",
        }
    }
}

impl std::fmt::Display for EffectTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Rendering parameters for one (atmosphere, tier, tension) triple
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleParameters {
    /// Opaque background descriptor (CSS gradient)
    pub background: String,
    /// Opaque text color descriptor (CSS class)
    pub text_color: String,
    pub effects: BTreeSet<EffectTag>,
    /// Passed through untouched; overlay decisions belong to the caller
    pub tension: u8,
}

impl StyleParameters {
    pub fn has_effect(&self, tag: EffectTag) -> bool {
        self.effects.contains(&tag)
    }

    /// Space-separated classes for the effect set
    pub fn effect_classes(&self) -> String {
        self.effects
            .iter()
            .map(|e| e.css_class())
            .collect::<Vec<_>>()
            .join(" ")
    }
}
