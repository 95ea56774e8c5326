//! Scene atmosphere tags

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::GateError;

/// Scene mood selecting a fixed visual preset
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Atmosphere {
    /// Rain-soaked neon night (purple / blue)
    NeonRain,
    /// Crowded slums (dirty grey / dark red)
    CyberSlums,
    /// Sterile lab (cold white / cyan)
    HighTechLab,
    /// Smoky jazz bar (black and white)
    NoirBar,
    /// Oppressive back alley (deep red / black)
    DangerAlley,
    /// Inside the net (green code rain)
    MatrixDigital,
}

impl Atmosphere {
    pub const ALL: [Atmosphere; 6] = [
        Atmosphere::NeonRain,
        Atmosphere::CyberSlums,
        Atmosphere::HighTechLab,
        Atmosphere::NoirBar,
        Atmosphere::DangerAlley,
        Atmosphere::MatrixDigital,
    ];

    /// Wire tag
    pub fn as_str(&self) -> &'static str {
        match self {
            Atmosphere::NeonRain => "neon_rain",
            Atmosphere::CyberSlums => "cyber_slums",
            Atmosphere::HighTechLab => "high_tech_lab",
            Atmosphere::NoirBar => "noir_bar",
            Atmosphere::DangerAlley => "danger_alley",
            Atmosphere::MatrixDigital => "matrix_digital",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            Atmosphere::NeonRain => "Neon rain",
            Atmosphere::CyberSlums => "Cyber slums",
            Atmosphere::HighTechLab => "High-tech lab",
            Atmosphere::NoirBar => "Noir bar",
            Atmosphere::DangerAlley => "Danger alley",
            Atmosphere::MatrixDigital => "Digital space",
        }
    }
}

impl FromStr for Atmosphere {
    type Err = GateError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        Atmosphere::ALL
            .iter()
            .copied()
            .find(|a| a.as_str() == tag)
            .ok_or_else(|| GateError::UnknownAtmosphere(tag.to_string()))
    }
}

impl std::fmt::Display for Atmosphere {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
