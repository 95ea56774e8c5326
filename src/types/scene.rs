//! Upstream scene payload and its strict decode boundary
//!
//! The generator speaks loosely-typed JSON. Everything passes through
//! `RawScene` first; `Scene::try_from` then clamps numbers, resolves the
//! atmosphere tag and rejects payloads the gate cannot work with.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::types::{Atmosphere, PlayerOption};
use crate::{clamp_stat, GateError};

/// Tension assumed when the generator omits it
pub const DEFAULT_TENSION: u8 = 50;

/// Player state as reported by the generator, clamped
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerState {
    pub hp: u8,
    pub sanity: u8,
    pub inventory: Vec<String>,
    pub clues: Vec<String>,
    pub location: String,
    pub suspicion_level: u8,
}

/// A stat that arrived outside [0, 100] and was clamped
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClampedStat {
    pub field: &'static str,
    pub raw: f64,
    pub clamped: u8,
}

/// One generated scene, validated
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawScene")]
pub struct Scene {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scene_id: Option<String>,
    pub narrative: String,
    pub atmosphere: Atmosphere,
    pub visual_cues: Vec<String>,
    pub options: Vec<PlayerOption>,
    pub tension: u8,
    #[serde(rename = "player_state_update")]
    pub player_state: PlayerState,
    pub is_game_over: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_over_reason: Option<String>,
    /// Stats clamped during decode
    #[serde(skip)]
    pub clamped: Vec<ClampedStat>,
}

#[derive(Debug, Deserialize)]
struct RawPlayerState {
    hp: f64,
    sanity: f64,
    #[serde(default)]
    inventory: Vec<String>,
    #[serde(default)]
    clues: Vec<String>,
    #[serde(default)]
    location: String,
    #[serde(default)]
    suspicion_level: f64,
}

/// Wire shape before validation
#[derive(Debug, Deserialize)]
pub struct RawScene {
    #[serde(default)]
    scene_id: Option<String>,
    narrative: String,
    atmosphere: String,
    #[serde(default)]
    visual_cues: Vec<String>,
    options: Vec<PlayerOption>,
    #[serde(default)]
    tension: Option<f64>,
    player_state_update: RawPlayerState,
    #[serde(default)]
    is_game_over: bool,
    #[serde(default)]
    game_over_reason: Option<String>,
}

impl TryFrom<RawScene> for Scene {
    type Error = GateError;

    fn try_from(raw: RawScene) -> Result<Self, Self::Error> {
        let atmosphere: Atmosphere = raw.atmosphere.parse()?;

        let mut seen = HashSet::new();
        for option in &raw.options {
            if !seen.insert(option.id.as_str()) {
                return Err(GateError::InvalidScene(format!(
                    "duplicate option id {:?}",
                    option.id
                )));
            }
        }
        if raw.options.is_empty() && !raw.is_game_over {
            return Err(GateError::InvalidScene(
                "scene offers no options but is not game over".to_string(),
            ));
        }

        let mut clamped = Vec::new();
        let mut stat = |field: &'static str, value: f64| -> u8 {
            let result = clamp_stat(value.round() as i64);
            if value < 0.0 || value > crate::STAT_MAX as f64 {
                log::warn!("{} = {} out of range, clamped to {}", field, value, result);
                clamped.push(ClampedStat { field, raw: value, clamped: result });
            }
            result
        };

        let tension = raw
            .tension
            .map(|t| stat("tension", t))
            .unwrap_or(DEFAULT_TENSION);
        let ps = raw.player_state_update;
        let player_state = PlayerState {
            hp: stat("hp", ps.hp),
            sanity: stat("sanity", ps.sanity),
            suspicion_level: stat("suspicion_level", ps.suspicion_level),
            inventory: ps.inventory,
            clues: ps.clues,
            location: ps.location,
        };

        Ok(Scene {
            scene_id: raw.scene_id,
            narrative: raw.narrative,
            atmosphere,
            visual_cues: raw.visual_cues,
            options: raw.options,
            tension,
            player_state,
            is_game_over: raw.is_game_over,
            game_over_reason: raw.game_over_reason,
            clamped,
        })
    }
}

impl Scene {
    /// Decode and validate a scene from JSON text
    pub fn from_json(json: &str) -> Result<Self, GateError> {
        let raw: RawScene = serde_json::from_str(json)?;
        Scene::try_from(raw)
    }

    /// Decode and validate a scene from an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, GateError> {
        let raw: RawScene = serde_json::from_value(value)?;
        Scene::try_from(raw)
    }

    /// Load a scene file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, GateError> {
        let json = std::fs::read_to_string(path)?;
        Scene::from_json(&json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ActionType;
    use serde_json::json;

    fn base() -> serde_json::Value {
        json!({
            "scene_id": "s-001",
            "narrative": "Rain hammers the neon sign above the noodle bar.",
            "atmosphere": "neon_rain",
            "visual_cues": ["flickering sign"],
            "options": [
                {"id": "a", "text": "Question the cook", "type": "talk", "risk_level": "low"},
                {"id": "b", "text": "Slice into the cam feed", "type": "hack", "risk_level": "high"}
            ],
            "tension": 42,
            "player_state_update": {
                "hp": 90, "sanity": 64, "inventory": ["decryptor"], "clues": [],
                "location": "Kowloon Walled City", "suspicion_level": 5
            },
            "is_game_over": false
        })
    }

    #[test]
    fn test_decode_valid_scene() {
        let scene = Scene::from_value(base()).unwrap();
        assert_eq!(scene.atmosphere, Atmosphere::NeonRain);
        assert_eq!(scene.options[1].action_type, ActionType::Hack);
        assert_eq!(scene.player_state.sanity, 64);
        assert_eq!(scene.tension, 42);
        assert!(scene.clamped.is_empty());
    }

    #[test]
    fn test_out_of_range_values_are_clamped() {
        let mut value = base();
        value["tension"] = json!(140);
        value["player_state_update"]["hp"] = json!(-20);
        value["player_state_update"]["sanity"] = json!(55.6);
        let scene = Scene::from_value(value).unwrap();
        assert_eq!(scene.tension, 100);
        assert_eq!(scene.player_state.hp, 0);
        assert_eq!(scene.player_state.sanity, 56);
        let fields: Vec<_> = scene.clamped.iter().map(|c| c.field).collect();
        assert_eq!(fields, vec!["tension", "hp"]);
    }

    #[test]
    fn test_missing_tension_uses_default() {
        let mut value = base();
        value.as_object_mut().unwrap().remove("tension");
        let scene = Scene::from_value(value).unwrap();
        assert_eq!(scene.tension, DEFAULT_TENSION);
    }

    #[test]
    fn test_unknown_atmosphere_rejected() {
        let mut value = base();
        value["atmosphere"] = json!("sunny_beach");
        let err = Scene::from_value(value).unwrap_err();
        assert!(err.is_configuration_error());
    }

    #[test]
    fn test_duplicate_option_ids_rejected() {
        let mut value = base();
        value["options"][1]["id"] = json!("a");
        let err = Scene::from_value(value).unwrap_err();
        assert!(matches!(err, GateError::InvalidScene(_)));
    }

    #[test]
    fn test_empty_options_only_allowed_on_game_over() {
        let mut value = base();
        value["options"] = json!([]);
        assert!(Scene::from_value(value.clone()).is_err());

        value["is_game_over"] = json!(true);
        value["game_over_reason"] = json!("The neon swallowed you whole.");
        let scene = Scene::from_value(value).unwrap();
        assert!(scene.is_game_over);
    }

    #[test]
    fn test_bad_action_type_is_decode_error() {
        let mut value = base();
        value["options"][0]["type"] = json!("dance");
        let err = Scene::from_value(value).unwrap_err();
        assert_eq!(err.code(), "E003_DECODE");
    }

    #[test]
    fn test_serde_entry_point_validates_too() {
        let mut value = base();
        value["atmosphere"] = json!("nowhere");
        let result: Result<Scene, _> = serde_json::from_value(value);
        assert!(result.is_err());
    }
}
