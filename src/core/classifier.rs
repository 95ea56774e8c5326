//! Sanity classifier
//!
//! Tier bands (closed-open, lowest open downward):
//! - LUCID:    sanity >= 70
//! - STRESSED: 40 <= sanity < 70
//! - BREAKING: 20 <= sanity < 40
//! - BROKEN:   sanity < 20

use crate::types::{SanityTier, TensionLevel};
use crate::{clamp_stat, SANITY_THRESHOLD_BREAKING, SANITY_THRESHOLD_LUCID, SANITY_THRESHOLD_STRESSED};

/// Map a sanity value to its tier. Out-of-range input is clamped first.
pub fn classify(sanity: i64) -> SanityTier {
    let sanity = clamp_stat(sanity);
    if sanity >= SANITY_THRESHOLD_LUCID {
        SanityTier::Lucid
    } else if sanity >= SANITY_THRESHOLD_STRESSED {
        SanityTier::Stressed
    } else if sanity >= SANITY_THRESHOLD_BREAKING {
        SanityTier::Breaking
    } else {
        SanityTier::Broken
    }
}

/// Map a tension value to its readout level. Out-of-range input is clamped first.
pub fn classify_tension(tension: i64) -> TensionLevel {
    match clamp_stat(tension) {
        0..=39 => TensionLevel::Calm,
        40..=69 => TensionLevel::Tense,
        70..=89 => TensionLevel::Extreme,
        _ => TensionLevel::Critical,
    }
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_boundaries() {
        assert_eq!(classify(100), SanityTier::Lucid);
        assert_eq!(classify(70), SanityTier::Lucid);
        assert_eq!(classify(69), SanityTier::Stressed);
        assert_eq!(classify(40), SanityTier::Stressed);
        assert_eq!(classify(39), SanityTier::Breaking);
        assert_eq!(classify(20), SanityTier::Breaking);
        assert_eq!(classify(19), SanityTier::Broken);
        assert_eq!(classify(0), SanityTier::Broken);
    }

    #[test]
    fn test_out_of_range_is_clamped() {
        assert_eq!(classify(-40), SanityTier::Broken);
        assert_eq!(classify(1000), SanityTier::Lucid);
    }

    #[test]
    fn test_monotonic() {
        let mut previous = classify(0);
        for s in 1..=100 {
            let tier = classify(s);
            assert!(tier <= previous, "severity rose from {} to {} at {}", previous, tier, s);
            previous = tier;
        }
    }

    #[test]
    fn test_tier_agrees_with_band() {
        for s in 0..=100u8 {
            let (low, high) = classify(s as i64).band();
            assert!(low <= s && s <= high);
        }
    }

    #[test]
    fn test_tension_levels() {
        assert_eq!(classify_tension(0), TensionLevel::Calm);
        assert_eq!(classify_tension(39), TensionLevel::Calm);
        assert_eq!(classify_tension(40), TensionLevel::Tense);
        assert_eq!(classify_tension(70), TensionLevel::Extreme);
        assert_eq!(classify_tension(89), TensionLevel::Extreme);
        assert_eq!(classify_tension(90), TensionLevel::Critical);
        assert_eq!(classify_tension(500), TensionLevel::Critical);
        assert_eq!(classify_tension(-3), TensionLevel::Calm);
    }
}
