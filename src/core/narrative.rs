//! Narrative parser: extracts hallucination runs from generated text
//!
//! A marker token opens a run; the run ends at the next marker or at the end
//! of the text. Markers are never closed or nested. Parsing never fails.

use crate::types::{ParsedNarrative, SanityTier};
use crate::{DEFAULT_HALLUCINATION_MARKER, SATURATION_RATIO};

/// Hallucination-marker parser
#[derive(Debug, Clone)]
pub struct NarrativeParser {
    marker: String,
}

impl Default for NarrativeParser {
    fn default() -> Self {
        Self::new()
    }
}

impl NarrativeParser {
    /// Parser for the default marker token
    pub fn new() -> Self {
        Self {
            marker: DEFAULT_HALLUCINATION_MARKER.to_string(),
        }
    }

    /// Parser for a custom marker token; an empty token falls back to the default
    pub fn with_marker(marker: impl Into<String>) -> Self {
        let marker = marker.into();
        if marker.is_empty() {
            return Self::new();
        }
        Self { marker }
    }

    pub fn marker(&self) -> &str {
        &self.marker
    }

    /// Parse raw narrative text for the given tier
    pub fn parse(&self, raw: &str, tier: SanityTier) -> ParsedNarrative {
        let mut runs = raw.split(self.marker.as_str());
        // text before the first marker is reliable narration
        runs.next();
        let hallucination_fragments: Vec<String> = runs
            .map(str::trim)
            .filter(|run| !run.is_empty())
            .map(String::from)
            .collect();

        let clean_text = raw.replace(self.marker.as_str(), "");

        let is_fully_hallucinatory =
            tier == SanityTier::Broken && is_saturated(&hallucination_fragments, &clean_text);

        if is_fully_hallucinatory {
            log::debug!(
                "narrative saturated: {} fragments replace the clean text",
                hallucination_fragments.len()
            );
        }

        ParsedNarrative {
            clean_text,
            hallucination_fragments,
            is_fully_hallucinatory,
        }
    }
}

/// Hallucinated share of visible characters reaches `SATURATION_RATIO`
fn is_saturated(fragments: &[String], clean_text: &str) -> bool {
    let total = visible_chars(clean_text);
    if total == 0 {
        return false;
    }
    let hallucinated: usize = fragments.iter().map(|f| visible_chars(f)).sum();
    hallucinated as f64 / total as f64 >= SATURATION_RATIO
}

fn visible_chars(text: &str) -> usize {
    text.chars().filter(|c| !c.is_whitespace()).count()
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_plain_text_untouched() {
        let parsed = NarrativeParser::new().parse("plain text", SanityTier::Lucid);
        assert_eq!(parsed.clean_text, "plain text");
        assert!(parsed.hallucination_fragments.is_empty());
        assert!(!parsed.is_fully_hallucinatory);
    }

    #[test]
    fn test_two_runs() {
        let raw = "[H]shadows move[H]it watches";
        let parsed = NarrativeParser::with_marker("[H]").parse(raw, SanityTier::Breaking);
        assert_eq!(parsed.hallucination_fragments, vec!["shadows move", "it watches"]);
        assert_eq!(parsed.clean_text, "shadows moveit watches");
    }

    #[test]
    fn test_runs_are_trimmed_and_kept_inline() {
        let raw = "The bartender polishes a glass. [H] his face melts into static. ";
        let parsed = NarrativeParser::new().parse(raw, SanityTier::Breaking);
        assert_eq!(parsed.hallucination_fragments, vec!["his face melts into static."]);
        assert_eq!(
            parsed.clean_text,
            "The bartender polishes a glass.  his face melts into static. "
        );
    }

    #[test]
    fn test_unterminated_run_extends_to_end() {
        let raw = "Rain.[H]the rain is falling upward\nand the sign spells your name";
        let parsed = NarrativeParser::new().parse(raw, SanityTier::Stressed);
        assert_eq!(
            parsed.hallucination_fragments,
            vec!["the rain is falling upward\nand the sign spells your name"]
        );
    }

    #[test]
    fn test_malformed_markers_do_not_panic() {
        let parser = NarrativeParser::new();
        let parsed = parser.parse("[H][H]", SanityTier::Broken);
        assert!(parsed.hallucination_fragments.is_empty());
        assert_eq!(parsed.clean_text, "");

        let parsed = parser.parse("half a marker [H", SanityTier::Broken);
        assert_eq!(parsed.clean_text, "half a marker [H");
        assert!(parsed.hallucination_fragments.is_empty());

        let parsed = parser.parse("[H][H] x [H]", SanityTier::Breaking);
        assert_eq!(parsed.hallucination_fragments, vec!["x"]);
    }

    #[test]
    fn test_custom_marker() {
        let parser = NarrativeParser::with_marker("[幻觉]");
        let parsed = parser.parse("霓虹灯下[幻觉]墙在呼吸", SanityTier::Breaking);
        assert_eq!(parsed.hallucination_fragments, vec!["墙在呼吸"]);
        assert_eq!(parsed.clean_text, "霓虹灯下墙在呼吸");
        assert_eq!(NarrativeParser::with_marker("").marker(), "[H]");
    }

    #[test]
    fn test_saturation_only_when_broken() {
        let raw = "Alley.[H]the walls are full of eyes and every eye is yours";
        let parser = NarrativeParser::new();
        assert!(parser.parse(raw, SanityTier::Broken).is_fully_hallucinatory);
        assert!(!parser.parse(raw, SanityTier::Breaking).is_fully_hallucinatory);
    }

    #[test]
    fn test_mostly_real_narrative_is_not_saturated() {
        let raw = "You walk the length of the market, counting stalls and faces. [H]a dog laughs";
        let parsed = NarrativeParser::new().parse(raw, SanityTier::Broken);
        assert!(!parsed.is_fully_hallucinatory);
        assert_eq!(parsed.display_text(), parsed.clean_text);
    }
}
