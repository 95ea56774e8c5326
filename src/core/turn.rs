//! Turn gate: one pass of the content gate over a decoded scene
//!
//! scene → tier → narrative → options → style → game over → TurnReport
//!
//! The debug override (if any) is applied to sanity, tension and atmosphere
//! for this render only. Game over always reads the authoritative state.

use crate::core::game_over::{reconcile, GameOverPolicy};
use crate::core::narrative::NarrativeParser;
use crate::core::option_gate::OptionGate;
use crate::core::rng::RetentionSource;
use crate::core::style::{derive_style, high_tension_overlay};
use crate::core::{build_directive, classify, classify_tension};
use crate::types::{
    DebugOverride, GateConfig, Notice, NoticeCode, SanityTier, Scene, TurnReport,
};
use crate::HALLUCINATION_PANEL_SANITY;

/// Wires the gate components together for one turn
#[derive(Debug, Clone)]
pub struct TurnGate {
    config: GateConfig,
    parser: NarrativeParser,
    option_gate: OptionGate,
    policy: GameOverPolicy,
}

impl Default for TurnGate {
    fn default() -> Self {
        Self::new(GateConfig::default())
    }
}

impl TurnGate {
    pub fn new(config: GateConfig) -> Self {
        let config = config.normalized();
        Self {
            parser: NarrativeParser::with_marker(config.marker.clone()),
            option_gate: OptionGate::with_retention(
                config.stressed_retention,
                config.breaking_retention,
            ),
            policy: GameOverPolicy {
                suspicion_limit: config.suspicion_limit,
            },
            config,
        }
    }

    pub fn config(&self) -> &GateConfig {
        &self.config
    }

    /// Tier for a sanity value with the override applied
    pub fn tier_for(&self, sanity: u8, debug: Option<&DebugOverride>) -> SanityTier {
        let sanity = debug.map(|d| d.sanity_or(sanity)).unwrap_or(sanity);
        classify(sanity as i64)
    }

    /// Directive for the next upstream request, built from the current tier
    pub fn directive(&self, sanity: u8, debug: Option<&DebugOverride>) -> String {
        build_directive(self.tier_for(sanity, debug), &self.config.marker)
    }

    /// Gate one scene
    pub fn evaluate<S>(&self, scene: &Scene, debug: Option<&DebugOverride>, rolls: &mut S) -> TurnReport
    where
        S: RetentionSource + ?Sized,
    {
        let mut notices: Vec<Notice> = scene
            .clamped
            .iter()
            .map(|c| {
                Notice::new(
                    NoticeCode::N002_STAT_CLAMPED,
                    format!("{} {} -> {}", c.field, c.raw, c.clamped),
                )
            })
            .collect();

        let debug = debug.filter(|d| !d.is_empty());
        if let Some(d) = debug {
            log::info!("debug override active: {}", d.describe());
            notices.push(Notice::new(NoticeCode::N003_DEBUG_OVERRIDE_ACTIVE, d.describe()));
        }

        let state = &scene.player_state;
        let sanity = debug.map(|d| d.sanity_or(state.sanity)).unwrap_or(state.sanity);
        let tension = debug.map(|d| d.tension_or(scene.tension)).unwrap_or(scene.tension);
        let atmosphere = debug
            .map(|d| d.atmosphere_or(scene.atmosphere))
            .unwrap_or(scene.atmosphere);

        let tier = classify(sanity as i64);
        let narrative = self.parser.parse(&scene.narrative, tier);

        let options = self.option_gate.apply(&scene.options, tier, rolls);
        if options.is_empty() && !scene.options.is_empty() {
            log::warn!(
                "option gate removed all {} options at {}",
                scene.options.len(),
                tier
            );
            notices.push(Notice::new(
                NoticeCode::N004_ALL_OPTIONS_GATED,
                format!("{} offered, 0 kept at {}", scene.options.len(), tier),
            ));
        }

        let style = derive_style(atmosphere, tier, tension);
        let high_tension_overlay = high_tension_overlay(tension, self.config.high_tension_threshold);
        let show_hallucination_panel =
            sanity < HALLUCINATION_PANEL_SANITY && narrative.has_hallucinations();

        let local = self.policy.evaluate(
            state.hp as i64,
            state.sanity as i64,
            state.suspicion_level as i64,
        );
        let game_over = reconcile(scene.is_game_over, scene.game_over_reason.as_deref(), local);
        if let Some(notice) = &game_over.discrepancy {
            notices.push(notice.clone());
        }

        log::debug!(
            "turn {:?}: sanity={} tier={} tension={} kept={}/{} notices={}",
            scene.scene_id,
            sanity,
            tier,
            tension,
            options.len(),
            scene.options.len(),
            notices.len()
        );

        TurnReport {
            scene_id: scene.scene_id.clone(),
            sanity,
            tier,
            tension,
            tension_level: classify_tension(tension as i64),
            atmosphere,
            narrative,
            options_offered: scene.options.len(),
            options,
            style,
            high_tension_overlay,
            show_hallucination_panel,
            game_over,
            notices,
        }
    }
}

// =============================================================================
// TESTS
// =============================================================================
