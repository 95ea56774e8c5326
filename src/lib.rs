//! sanitygate: sanity-driven content gate for LLM-narrated noir scenes
//!
//! Scene (upstream JSON) → classifier → narrative parser → option gate →
//! style deriver → game-over evaluator → TurnReport

pub mod core;
pub mod error;
pub mod server;
pub mod types;

pub use error::GateError;

// =============================================================================
// SANITY TIERS [C]
// =============================================================================

/// Sanity at or above this is LUCID
pub const SANITY_THRESHOLD_LUCID: u8 = 70;

/// Sanity at or above this (and below LUCID) is STRESSED
pub const SANITY_THRESHOLD_STRESSED: u8 = 40;

/// Sanity at or above this (and below STRESSED) is BREAKING; below is BROKEN
pub const SANITY_THRESHOLD_BREAKING: u8 = 20;

/// Upper bound for every clamped stat (hp, sanity, tension, suspicion)
pub const STAT_MAX: u8 = 100;

// =============================================================================
// OPTION GATE [C]
// =============================================================================

/// Retention probability for non-low-risk options while STRESSED
pub const STRESSED_RETENTION: f64 = 0.8;

/// Retention probability for non-low-risk options while BREAKING
pub const BREAKING_RETENTION: f64 = 0.3;

// =============================================================================
// PRESENTATION [C]
// =============================================================================

/// Tension strictly above this triggers the full-screen overlay (caller side)
pub const HIGH_TENSION_THRESHOLD: u8 = 80;

/// Hallucination side panel is shown below this sanity
pub const HALLUCINATION_PANEL_SANITY: u8 = 30;

/// Share of hallucinated characters that makes a BROKEN narrative saturated
pub const SATURATION_RATIO: f64 = 0.5;

/// Inline token that opens a hallucination run
pub const DEFAULT_HALLUCINATION_MARKER: &str = "[H]";

// =============================================================================
// VERSION
// =============================================================================

pub const VERSION: &str = "1.0.0";

/// Clamp any upstream number into [0, 100].
pub fn clamp_stat(value: i64) -> u8 {
    value.clamp(0, STAT_MAX as i64) as u8
}
