//! Runtime gate configuration

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::{
    GateError, BREAKING_RETENTION, DEFAULT_HALLUCINATION_MARKER, HIGH_TENSION_THRESHOLD,
    STRESSED_RETENTION,
};

/// Tunables loaded from a JSON file; every field falls back to the
/// compile-time default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GateConfig {
    /// Token that opens a hallucination run
    pub marker: String,
    /// Retention probability for non-low-risk options while STRESSED
    pub stressed_retention: f64,
    /// Retention probability for non-low-risk options while BREAKING
    pub breaking_retention: f64,
    /// Tension strictly above this raises the overlay flag
    pub high_tension_threshold: u8,
    /// Suspicion at or above this ends the game; disabled when absent
    pub suspicion_limit: Option<u8>,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            marker: DEFAULT_HALLUCINATION_MARKER.to_string(),
            stressed_retention: STRESSED_RETENTION,
            breaking_retention: BREAKING_RETENTION,
            high_tension_threshold: HIGH_TENSION_THRESHOLD,
            suspicion_limit: None,
        }
    }
}

impl GateConfig {
    /// Load from a JSON file and normalize
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GateError> {
        let json = std::fs::read_to_string(path)?;
        let config: GateConfig = serde_json::from_str(&json)?;
        Ok(config.normalized())
    }

    /// Clamp probabilities into [0, 1] and restore an empty marker
    pub fn normalized(mut self) -> Self {
        self.stressed_retention = clamp_probability(self.stressed_retention);
        self.breaking_retention = clamp_probability(self.breaking_retention);
        if self.marker.is_empty() {
            log::warn!("empty hallucination marker, using {}", DEFAULT_HALLUCINATION_MARKER);
            self.marker = DEFAULT_HALLUCINATION_MARKER.to_string();
        }
        self
    }
}

fn clamp_probability(p: f64) -> f64 {
    if p.is_nan() {
        0.0
    } else {
        p.clamp(0.0, 1.0)
    }
}
