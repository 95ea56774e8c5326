//! Instruction selector: tier → directive block for the upstream generator
//!
//! Severity strictly increases LUCID → STRESSED → BREAKING → BROKEN. The
//! rendered text is opaque to the rest of the crate.

use serde::Serialize;

use crate::core::classify;
use crate::types::{ActionType, Atmosphere, GameOverReason, SanityTier};

/// How hallucination markers must appear in the narrative
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerRequirement {
    /// No hallucination content at all
    Forbidden,
    /// Reality may be questioned, markers optional
    Occasional,
    /// At least one marked run is required
    Mandatory,
    /// Most of the narrative is marked
    Dominant,
}

/// Which options the generator should withhold
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Suppression {
    None,
    /// Up to `max_options` complex options may be shown as unavailable
    MarkUnavailable { max_options: u8 },
    /// Roughly `percent` of complex options are dropped
    RemoveComplex { percent: u8 },
    /// Only these action types are offered
    KeepOnly(Vec<ActionType>),
}

impl Suppression {
    /// Rank used to compare severities
    pub fn severity(&self) -> u8 {
        match self {
            Suppression::None => 0,
            Suppression::MarkUnavailable { .. } => 1,
            Suppression::RemoveComplex { .. } => 2,
            Suppression::KeepOnly(_) => 3,
        }
    }

    /// Action types affected by this suppression
    pub fn affected_actions(&self) -> Vec<ActionType> {
        match self {
            Suppression::None => Vec::new(),
            Suppression::MarkUnavailable { .. } | Suppression::RemoveComplex { .. } => {
                vec![ActionType::Hack, ActionType::Investigate]
            }
            Suppression::KeepOnly(kept) => [
                ActionType::Investigate,
                ActionType::Talk,
                ActionType::Fight,
                ActionType::Hack,
                ActionType::Move,
            ]
            .into_iter()
            .filter(|a| !kept.contains(a))
            .collect(),
        }
    }
}

/// Inclusive tension range the generator should target
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TensionBand {
    pub min: u8,
    pub max: u8,
}

/// Structured per-tier instructions
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierDirective {
    pub tier: SanityTier,
    pub markers: MarkerRequirement,
    pub suppression: Suppression,
    pub tension: TensionBand,
    pub preferred_atmospheres: Vec<Atmosphere>,
    pub consider_game_over: bool,
}

impl TierDirective {
    pub fn for_tier(tier: SanityTier) -> Self {
        match tier {
            SanityTier::Lucid => Self {
                tier,
                markers: MarkerRequirement::Forbidden,
                suppression: Suppression::None,
                tension: TensionBand { min: 0, max: 100 },
                preferred_atmospheres: Vec::new(),
                consider_game_over: false,
            },
            SanityTier::Stressed => Self {
                tier,
                markers: MarkerRequirement::Occasional,
                suppression: Suppression::MarkUnavailable { max_options: 2 },
                tension: TensionBand { min: 40, max: 70 },
                preferred_atmospheres: vec![Atmosphere::NeonRain, Atmosphere::NoirBar],
                consider_game_over: false,
            },
            SanityTier::Breaking => Self {
                tier,
                markers: MarkerRequirement::Mandatory,
                suppression: Suppression::RemoveComplex { percent: 50 },
                tension: TensionBand { min: 60, max: 90 },
                preferred_atmospheres: vec![Atmosphere::DangerAlley, Atmosphere::MatrixDigital],
                consider_game_over: false,
            },
            SanityTier::Broken => Self {
                tier,
                markers: MarkerRequirement::Dominant,
                suppression: Suppression::KeepOnly(vec![ActionType::Fight, ActionType::Move]),
                tension: TensionBand { min: 81, max: 100 },
                preferred_atmospheres: vec![Atmosphere::MatrixDigital, Atmosphere::DangerAlley],
                consider_game_over: true,
            },
        }
    }

    /// Render the instruction block, naming `marker` as the hallucination token
    pub fn render(&self, marker: &str) -> String {
        let (low, high) = self.tier.band();
        let mut lines = vec![format!("# Sanity state: {} ({}-{})", self.tier, low, high)];

        lines.push(match self.markers {
            MarkerRequirement::Forbidden => {
                format!("- Narrate normally. Do not include hallucinations or the {} marker.", marker)
            }
            MarkerRequirement::Occasional => {
                "- Occasionally let the narrative question reality (\"Is what you see really there?\").".to_string()
            }
            MarkerRequirement::Mandatory => format!(
                "- The narrative MUST contain hallucinated passages, each opened with {}.",
                marker
            ),
            MarkerRequirement::Dominant => format!(
                "- Most of the narrative must be hallucination, every passage opened with {}.",
                marker
            ),
        });

        let affected = join_actions(&self.suppression.affected_actions());
        lines.push(match &self.suppression {
            Suppression::None => "- All option types are available.".to_string(),
            Suppression::MarkUnavailable { max_options } => format!(
                "- You may mark 1-{} complex options ({}) as unavailable.",
                max_options, affected
            ),
            Suppression::RemoveComplex { percent } => format!(
                "- Remove about {}% of complex options ({}); prefer talk, fight, move.",
                percent, affected
            ),
            Suppression::KeepOnly(kept) => format!(
                "- Offer only the most basic options ({}). Never offer {}.",
                join_actions(kept),
                affected
            ),
        });

        if self.preferred_atmospheres.is_empty() {
            lines.push("- Any atmosphere is allowed.".to_string());
        } else {
            let tags: Vec<&str> = self.preferred_atmospheres.iter().map(|a| a.as_str()).collect();
            lines.push(format!("- Lean toward these atmospheres: {}.", tags.join(", ")));
        }

        if self.tension.min == 0 && self.tension.max == 100 {
            lines.push("- Set tension freely for the scene (0-100).".to_string());
        } else if self.tension.max == 100 {
            lines.push(format!("- Tension must be above {}.", self.tension.min - 1));
        } else {
            lines.push(format!(
                "- Keep tension within {}-{}.",
                self.tension.min, self.tension.max
            ));
        }

        if self.markers == MarkerRequirement::Mandatory {
            lines.push("- Visual cues should include hallucination-related details.".to_string());
        }

        if self.consider_game_over {
            lines.push(format!(
                "- If sanity keeps falling, consider setting is_game_over: true with game_over_reason: \"{}\".",
                GameOverReason::SanityCollapse.message()
            ));
        }

        lines.join("\n")
    }
}

fn join_actions(actions: &[ActionType]) -> String {
    actions.iter().map(|a| a.as_str()).collect::<Vec<_>>().join(", ")
}

/// Directive text for a tier
pub fn build_directive(tier: SanityTier, marker: &str) -> String {
    TierDirective::for_tier(tier).render(marker)
}

/// Hint for how the generator should move sanity next
pub fn sanity_change_guidance(sanity: i64) -> &'static str {
    let sanity = crate::clamp_stat(sanity);
    if sanity > 80 {
        "Sanity is high: it may drop moderately (-5 to -10)."
    } else if sanity > 50 {
        "Sanity is moderate: keep it steady or nudge it (-5 to +5)."
    } else if sanity > 20 {
        "Sanity is low: offer a chance to recover (+5 to +10)."
    } else {
        "Sanity is critical: offer a quick way to recover or end the game."
    }
}

/// Directive for a raw sanity value
pub fn directive_for_sanity(sanity: i64, marker: &str) -> String {
    build_directive(classify(sanity), marker)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_severity_strictly_increases() {
        let directives: Vec<TierDirective> =
            SanityTier::ALL.iter().map(|t| TierDirective::for_tier(*t)).collect();
        for pair in directives.windows(2) {
            assert!(pair[0].markers < pair[1].markers);
            assert!(pair[0].suppression.severity() < pair[1].suppression.severity());
            assert!(pair[0].tension.min < pair[1].tension.min);
        }
    }

    #[test]
    fn test_tension_bands() {
        assert_eq!(TierDirective::for_tier(SanityTier::Stressed).tension, TensionBand { min: 40, max: 70 });
        assert_eq!(TierDirective::for_tier(SanityTier::Breaking).tension, TensionBand { min: 60, max: 90 });
        assert_eq!(TierDirective::for_tier(SanityTier::Broken).tension.min, 81);
    }

    #[test]
    fn test_only_broken_considers_game_over() {
        for tier in SanityTier::ALL {
            assert_eq!(
                TierDirective::for_tier(tier).consider_game_over,
                tier == SanityTier::Broken
            );
        }
    }

    #[test]
    fn test_broken_keeps_only_basic_actions() {
        let affected = TierDirective::for_tier(SanityTier::Broken).suppression.affected_actions();
        assert_eq!(affected, vec![ActionType::Investigate, ActionType::Talk, ActionType::Hack]);
        assert!(TierDirective::for_tier(SanityTier::Lucid).suppression.affected_actions().is_empty());
    }

    #[test]
    fn test_rendered_text() {
        let lucid = build_directive(SanityTier::Lucid, "[H]");
        assert!(lucid.starts_with("# Sanity state: LUCID (70-100)"));
        assert!(lucid.contains("Do not include hallucinations"));

        let breaking = build_directive(SanityTier::Breaking, "[H]");
        assert!(breaking.contains("MUST contain hallucinated passages, each opened with [H]"));
        assert!(breaking.contains("within 60-90"));

        let broken = build_directive(SanityTier::Broken, "[幻觉]");
        assert!(broken.contains("[幻觉]"));
        assert!(broken.contains("above 80"));
        assert!(broken.contains("is_game_over: true"));
        assert!(broken.contains("(fight, move). Never offer investigate, talk, hack."));

        let stressed = build_directive(SanityTier::Stressed, "[H]");
        assert!(stressed.contains("complex options (hack, investigate) as unavailable"));
    }

    #[test]
    fn test_directive_for_sanity_clamps() {
        assert_eq!(directive_for_sanity(-5, "[H]"), build_directive(SanityTier::Broken, "[H]"));
    }

    #[test]
    fn test_guidance_bands() {
        assert!(sanity_change_guidance(90).contains("-5 to -10"));
        assert!(sanity_change_guidance(80).contains("-5 to +5"));
        assert!(sanity_change_guidance(50).contains("+5 to +10"));
        assert!(sanity_change_guidance(20).contains("critical"));
    }
}
