//! Debug overrides passed explicitly alongside authoritative state

use serde::{Deserialize, Deserializer, Serialize};

use crate::types::Atmosphere;

/// Per-render substitution of sanity, tension and atmosphere.
///
/// Affects tier, options, style and the next directive. Never affects the
/// game-over check, which always reads the authoritative player state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DebugOverride {
    #[serde(default, deserialize_with = "clamped_stat")]
    pub sanity: Option<u8>,
    #[serde(default, deserialize_with = "clamped_stat")]
    pub tension: Option<u8>,
    #[serde(default)]
    pub atmosphere: Option<Atmosphere>,
}

/// Any JSON number is accepted and clamped into [0, 100]
fn clamped_stat<'de, D>(deserializer: D) -> Result<Option<u8>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<f64>::deserialize(deserializer)?;
    Ok(raw.map(|v| crate::clamp_stat(v.round() as i64)))
}

impl DebugOverride {
    pub fn is_empty(&self) -> bool {
        self.sanity.is_none() && self.tension.is_none() && self.atmosphere.is_none()
    }

    /// Effective sanity, override first
    pub fn sanity_or(&self, authoritative: u8) -> u8 {
        self.sanity.map(|s| s.min(crate::STAT_MAX)).unwrap_or(authoritative)
    }

    /// Effective tension, override first
    pub fn tension_or(&self, authoritative: u8) -> u8 {
        self.tension.map(|t| t.min(crate::STAT_MAX)).unwrap_or(authoritative)
    }

    /// Effective atmosphere, override first
    pub fn atmosphere_or(&self, authoritative: Atmosphere) -> Atmosphere {
        self.atmosphere.unwrap_or(authoritative)
    }

    /// Short description of the active fields
    pub fn describe(&self) -> String {
        let mut parts = Vec::new();
        if let Some(s) = self.sanity {
            parts.push(format!("sanity={}", s));
        }
        if let Some(t) = self.tension {
            parts.push(format!("tension={}", t));
        }
        if let Some(a) = self.atmosphere {
            parts.push(format!("atmosphere={}", a));
        }
        parts.join(", ")
    }
}

/// Canned override sets for play-testing
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum DebugPreset {
    /// High sanity, low tension, neon rain
    Normal,
    /// Mid sanity, mid tension, noir bar
    Stressed,
    /// Low sanity, high tension, danger alley
    Breaking,
    /// Very low sanity, very high tension, digital space
    Insane,
    /// Sanity gone, maximum tension, red screen
    Inferno,
}

impl DebugPreset {
    pub fn to_override(self) -> DebugOverride {
        let (sanity, tension, atmosphere) = match self {
            DebugPreset::Normal => (85, 30, Atmosphere::NeonRain),
            DebugPreset::Stressed => (55, 50, Atmosphere::NoirBar),
            DebugPreset::Breaking => (30, 70, Atmosphere::DangerAlley),
            DebugPreset::Insane => (15, 85, Atmosphere::MatrixDigital),
            DebugPreset::Inferno => (5, 100, Atmosphere::DangerAlley),
        };
        DebugOverride {
            sanity: Some(sanity),
            tension: Some(tension),
            atmosphere: Some(atmosphere),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::classify;
    use crate::types::SanityTier;

    #[test]
    fn test_empty_override_is_transparent() {
        let o = DebugOverride::default();
        assert!(o.is_empty());
        assert_eq!(o.sanity_or(64), 64);
        assert_eq!(o.tension_or(12), 12);
        assert_eq!(o.atmosphere_or(Atmosphere::NoirBar), Atmosphere::NoirBar);
    }

    #[test]
    fn test_override_values_are_capped() {
        let o = DebugOverride { sanity: Some(250), ..Default::default() };
        assert_eq!(o.sanity_or(10), 100);
        assert_eq!(o.describe(), "sanity=250");
    }

    #[test]
    fn test_wire_values_are_clamped_not_rejected() {
        let o: DebugOverride =
            serde_json::from_str(r#"{"sanity": -5, "tension": 130.6}"#).unwrap();
        assert_eq!(o.sanity, Some(0));
        assert_eq!(o.tension, Some(100));
        assert_eq!(o.atmosphere, None);

        let empty: DebugOverride = serde_json::from_str("{}").unwrap();
        assert!(empty.is_empty());
        let null: DebugOverride = serde_json::from_str(r#"{"sanity": null}"#).unwrap();
        assert!(null.is_empty());
    }

    #[test]
    fn test_presets_walk_down_the_tiers() {
        let tiers: Vec<SanityTier> = [
            DebugPreset::Normal,
            DebugPreset::Stressed,
            DebugPreset::Breaking,
            DebugPreset::Insane,
        ]
        .iter()
        .map(|p| classify(p.to_override().sanity.unwrap() as i64))
        .collect();
        assert_eq!(tiers, SanityTier::ALL.to_vec());
        assert_eq!(DebugPreset::Inferno.to_override().tension, Some(100));
    }
}
