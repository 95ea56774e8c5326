//! Option gate: filters and annotates scene options by sanity tier
//!
//! Filtering:
//! - LUCID:    everything kept
//! - STRESSED: low risk kept, others kept when roll < 0.8
//! - BREAKING: low risk kept, others kept when roll < 0.3
//! - BROKEN:   only fight / move kept
//!
//! Rolls are drawn only for options that are not low risk, in input order.
//! Filtering is stable: no reordering, no duplication.

use crate::core::rng::RetentionSource;
use crate::types::{PlayerOption, SanityTier};
use crate::{BREAKING_RETENTION, STRESSED_RETENTION};

/// Suffix for complex options while STRESSED or BREAKING
pub const SUFFIX_INSUFFICIENT_SANITY: &str = " (insufficient sanity)";

/// Suffix for complex options while BROKEN
pub const SUFFIX_CANNOT_CONCENTRATE: &str = " (cannot concentrate)";

/// Tier-driven option filter
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OptionGate {
    stressed_retention: f64,
    breaking_retention: f64,
}

impl Default for OptionGate {
    fn default() -> Self {
        Self::new()
    }
}

impl OptionGate {
    pub fn new() -> Self {
        Self {
            stressed_retention: STRESSED_RETENTION,
            breaking_retention: BREAKING_RETENTION,
        }
    }

    /// Gate with custom retention probabilities, clamped into [0, 1]
    pub fn with_retention(stressed: f64, breaking: f64) -> Self {
        Self {
            stressed_retention: stressed.clamp(0.0, 1.0),
            breaking_retention: breaking.clamp(0.0, 1.0),
        }
    }

    /// Filter step
    pub fn gate<S>(&self, options: &[PlayerOption], tier: SanityTier, rolls: &mut S) -> Vec<PlayerOption>
    where
        S: RetentionSource + ?Sized,
    {
        let kept: Vec<PlayerOption> = match tier {
            SanityTier::Lucid => options.to_vec(),
            SanityTier::Stressed => self.retain_by_roll(options, self.stressed_retention, rolls),
            SanityTier::Breaking => self.retain_by_roll(options, self.breaking_retention, rolls),
            SanityTier::Broken => options
                .iter()
                .filter(|o| o.action_type.is_basic())
                .cloned()
                .collect(),
        };

        log::debug!(
            "option gate {}: kept {}/{} ({})",
            tier,
            kept.len(),
            options.len(),
            kept.iter().map(|o| o.id.as_str()).collect::<Vec<_>>().join(",")
        );
        kept
    }

    fn retain_by_roll<S>(&self, options: &[PlayerOption], p: f64, rolls: &mut S) -> Vec<PlayerOption>
    where
        S: RetentionSource + ?Sized,
    {
        options
            .iter()
            .filter(|o| o.is_low_risk() || rolls.roll() < p)
            .cloned()
            .collect()
    }

    /// Annotation step. Only display text changes; idempotent.
    pub fn annotate(&self, options: &[PlayerOption], tier: SanityTier) -> Vec<PlayerOption> {
        let suffix = match tier {
            SanityTier::Lucid => return options.to_vec(),
            SanityTier::Stressed | SanityTier::Breaking => SUFFIX_INSUFFICIENT_SANITY,
            SanityTier::Broken => SUFFIX_CANNOT_CONCENTRATE,
        };

        options
            .iter()
            .map(|option| {
                if !option.action_type.is_complex() {
                    return option.clone();
                }
                let mut annotated = option.clone();
                annotated.text = format!("{}{}", strip_annotation(&option.text), suffix);
                annotated
            })
            .collect()
    }

    /// Filter then annotate
    pub fn apply<S>(&self, options: &[PlayerOption], tier: SanityTier, rolls: &mut S) -> Vec<PlayerOption>
    where
        S: RetentionSource + ?Sized,
    {
        let kept = self.gate(options, tier, rolls);
        self.annotate(&kept, tier)
    }
}

/// Remove an existing sanity suffix, if any
pub fn strip_annotation(text: &str) -> &str {
    text.strip_suffix(SUFFIX_INSUFFICIENT_SANITY)
        .or_else(|| text.strip_suffix(SUFFIX_CANNOT_CONCENTRATE))
        .unwrap_or(text)
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::rng::{scene_rng, ScriptedRolls};
    use crate::types::{ActionType, RiskLevel};
    use pretty_assertions::assert_eq;

    fn ids(options: &[PlayerOption]) -> Vec<&str> {
        options.iter().map(|o| o.id.as_str()).collect()
    }

    fn mixed() -> Vec<PlayerOption> {
        vec![
            PlayerOption::new("a", "Search the drawers", ActionType::Investigate).with_risk(RiskLevel::Low),
            PlayerOption::new("b", "Crack the safe's firmware", ActionType::Hack).with_risk(RiskLevel::High),
            PlayerOption::new("c", "Ask the fixer", ActionType::Talk).with_risk(RiskLevel::Medium),
            PlayerOption::new("d", "Slip out the back", ActionType::Move),
            PlayerOption::new("e", "Draw on the bouncer", ActionType::Fight).with_risk(RiskLevel::High),
        ]
    }

    #[test]
    fn test_lucid_is_identity() {
        let options = mixed();
        let mut rolls = ScriptedRolls::default();
        assert_eq!(OptionGate::new().gate(&options, SanityTier::Lucid, &mut rolls), options);
        assert_eq!(rolls.consumed(), 0);
    }

    #[test]
    fn test_stressed_with_scripted_rolls() {
        // rolls go to b, c, d, e in order; 0.8 and above drops
        let mut rolls = ScriptedRolls::new(vec![0.85, 0.10, 0.79, 0.80]);
        let kept = OptionGate::new().gate(&mixed(), SanityTier::Stressed, &mut rolls);
        assert_eq!(ids(&kept), vec!["a", "c", "d"]);
        assert_eq!(rolls.consumed(), 4);
    }

    #[test]
    fn test_breaking_with_scripted_rolls() {
        let mut rolls = ScriptedRolls::new(vec![0.29, 0.30, 0.5, 0.0]);
        let kept = OptionGate::new().gate(&mixed(), SanityTier::Breaking, &mut rolls);
        assert_eq!(ids(&kept), vec!["a", "b", "e"]);
    }

    #[test]
    fn test_broken_keeps_fight_and_move_in_order() {
        let options = vec![
            PlayerOption::new("a", "Scan the room", ActionType::Investigate),
            PlayerOption::new("b", "Punch the mirror", ActionType::Fight),
            PlayerOption::new("c", "Run", ActionType::Move),
            PlayerOption::new("d", "Rewire the lock", ActionType::Hack),
        ];
        let mut rolls = ScriptedRolls::default();
        let kept = OptionGate::new().gate(&options, SanityTier::Broken, &mut rolls);
        assert_eq!(ids(&kept), vec!["b", "c"]);
        assert_eq!(rolls.consumed(), 0);
    }

    #[test]
    fn test_broken_drops_low_risk_talk() {
        let options = vec![PlayerOption::new("t", "Whisper", ActionType::Talk).with_risk(RiskLevel::Low)];
        let kept = OptionGate::new().gate(&options, SanityTier::Broken, &mut ScriptedRolls::default());
        assert!(kept.is_empty());
    }

    #[test]
    fn test_all_low_risk_survives_every_random_tier() {
        let options: Vec<PlayerOption> = mixed()
            .into_iter()
            .map(|o| o.with_risk(RiskLevel::Low))
            .collect();
        let gate = OptionGate::new();
        for tier in [SanityTier::Lucid, SanityTier::Stressed, SanityTier::Breaking] {
            let mut rolls = ScriptedRolls::new(vec![0.99; 10]);
            assert_eq!(gate.gate(&options, tier, &mut rolls), options);
        }
    }

    #[test]
    fn test_seeded_rng_is_reproducible() {
        let gate = OptionGate::new();
        let first = gate.gate(&mixed(), SanityTier::Breaking, &mut scene_rng(3, Some("s")));
        let second = gate.gate(&mixed(), SanityTier::Breaking, &mut scene_rng(3, Some("s")));
        assert_eq!(first, second);
        assert!(ids(&first).contains(&"a"));
    }

    #[test]
    fn test_custom_retention_extremes() {
        let keep_all = OptionGate::with_retention(1.5, 1.0);
        let drop_all = OptionGate::with_retention(0.0, -1.0);
        let mut rolls = ScriptedRolls::new(vec![0.999; 8]);
        assert_eq!(keep_all.gate(&mixed(), SanityTier::Stressed, &mut rolls).len(), 5);
        let mut rolls = ScriptedRolls::new(vec![0.0; 8]);
        assert_eq!(ids(&drop_all.gate(&mixed(), SanityTier::Breaking, &mut rolls)), vec!["a"]);
    }

    #[test]
    fn test_annotation_by_tier() {
        let gate = OptionGate::new();
        let options = mixed();

        assert_eq!(gate.annotate(&options, SanityTier::Lucid), options);

        let stressed = gate.annotate(&options, SanityTier::Stressed);
        assert_eq!(stressed[0].text, "Search the drawers (insufficient sanity)");
        assert_eq!(stressed[1].text, "Crack the safe's firmware (insufficient sanity)");
        assert_eq!(stressed[2].text, "Ask the fixer");
        assert_eq!(stressed[3].text, "Slip out the back");

        let broken = gate.annotate(&options, SanityTier::Broken);
        assert_eq!(broken[1].text, "Crack the safe's firmware (cannot concentrate)");
        assert_eq!(broken[4].text, "Draw on the bouncer");
    }

    #[test]
    fn test_annotation_keeps_identity_fields() {
        let gate = OptionGate::new();
        let options = mixed();
        for (before, after) in options.iter().zip(gate.annotate(&options, SanityTier::Breaking)) {
            assert_eq!(before.id, after.id);
            assert_eq!(before.action_type, after.action_type);
            assert_eq!(before.risk_level, after.risk_level);
        }
    }

    #[test]
    fn test_annotation_is_idempotent() {
        let gate = OptionGate::new();
        for tier in SanityTier::ALL {
            let once = gate.annotate(&mixed(), tier);
            let twice = gate.annotate(&once, tier);
            assert_eq!(once, twice, "double annotation at {}", tier);
        }
    }

    #[test]
    fn test_annotation_follows_tier_change() {
        let gate = OptionGate::new();
        let stressed = gate.annotate(&mixed(), SanityTier::Stressed);
        let broken = gate.annotate(&stressed, SanityTier::Broken);
        assert_eq!(broken[0].text, "Search the drawers (cannot concentrate)");
    }
}
