//! Parsed narrative output

use serde::{Deserialize, Serialize};

/// Narrative text with hallucination runs extracted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedNarrative {
    /// Raw text with marker tokens removed, nothing else touched
    pub clean_text: String,
    /// Trimmed hallucination runs in order of appearance
    pub hallucination_fragments: Vec<String>,
    /// BROKEN narrative saturated by hallucination
    pub is_fully_hallucinatory: bool,
}

impl ParsedNarrative {
    pub fn has_hallucinations(&self) -> bool {
        !self.hallucination_fragments.is_empty()
    }

    /// Text the presentation layer should show.
    ///
    /// A fully hallucinatory narrative is replaced by its fragments, one per
    /// paragraph.
    pub fn display_text(&self) -> String {
        if self.is_fully_hallucinatory {
            self.hallucination_fragments.join("\n\n")
        } else {
            self.clean_text.clone()
        }
    }
}
