//! Style deriver: (atmosphere, tier, tension) → rendering parameters
//!
//! Background and text color come from the atmosphere table, effects from
//! the tier. Tension is carried through untouched: the full-screen
//! high-tension overlay is a presentation decision made by the caller with
//! `high_tension_overlay`, never folded into the effect set here.

use std::collections::BTreeSet;

use crate::types::{Atmosphere, EffectTag, SanityTier, StyleParameters};
use crate::GateError;

/// Canonical (background, text color) for an atmosphere
pub fn atmosphere_palette(atmosphere: Atmosphere) -> (&'static str, &'static str) {
    match atmosphere {
        Atmosphere::NeonRain => (
            "linear-gradient(135deg, #1a1a2e 0%, #16213e 50%, #0f3460 100%)",
            "text-purple-100",
        ),
        Atmosphere::CyberSlums => (
            "linear-gradient(135deg, #2d2d2d 0%, #4a1919 100%)",
            "text-gray-200",
        ),
        Atmosphere::HighTechLab => (
            "linear-gradient(135deg, #e0e0e0 0%, #a8dadc 100%)",
            "text-gray-900",
        ),
        Atmosphere::NoirBar => (
            "linear-gradient(135deg, #0a0a0a 0%, #1a1a1a 50%, #2d2d2d 100%)",
            "text-gray-100",
        ),
        Atmosphere::DangerAlley => (
            "linear-gradient(135deg, #1a0000 0%, #4a0000 100%)",
            "text-red-100",
        ),
        Atmosphere::MatrixDigital => (
            "linear-gradient(135deg, #000000 0%, #001a00 100%)",
            "text-green-400",
        ),
    }
}

/// Effects for a tier; each tier's set is cumulative in severity
pub fn tier_effects(tier: SanityTier) -> BTreeSet<EffectTag> {
    let effects: &[EffectTag] = match tier {
        SanityTier::Lucid => &[],
        SanityTier::Stressed => &[EffectTag::SlowPulse],
        SanityTier::Breaking => &[EffectTag::Shake, EffectTag::SlightBlur],
        SanityTier::Broken => &[EffectTag::Glitch, EffectTag::HeavyBlur, EffectTag::FastPulse],
    };
    effects.iter().copied().collect()
}

pub fn derive_style(atmosphere: Atmosphere, tier: SanityTier, tension: u8) -> StyleParameters {
    let (background, text_color) = atmosphere_palette(atmosphere);
    StyleParameters {
        background: background.to_string(),
        text_color: text_color.to_string(),
        effects: tier_effects(tier),
        tension: tension.min(crate::STAT_MAX),
    }
}

/// Same as `derive_style` for a raw tag; unknown tags are a configuration error
pub fn style_for_tag(tag: &str, tier: SanityTier, tension: u8) -> Result<StyleParameters, GateError> {
    let atmosphere: Atmosphere = tag.parse()?;
    Ok(derive_style(atmosphere, tier, tension))
}

/// Caller-side overlay decision: tension strictly above `threshold`
pub fn high_tension_overlay(tension: u8, threshold: u8) -> bool {
    tension > threshold
}

// =============================================================================
// TESTS
// =============================================================================
