//! Core gate components. Pure and I/O-free.

pub mod classifier;
pub mod directive;
pub mod game_over;
pub mod narrative;
pub mod option_gate;
pub mod rng;
pub mod stream;
pub mod style;
pub mod turn;

pub use classifier::{classify, classify_tension};
pub use directive::{build_directive, directive_for_sanity, sanity_change_guidance, TierDirective};
pub use game_over::{evaluate, reconcile, GameOverPolicy};
pub use narrative::NarrativeParser;
pub use option_gate::OptionGate;
pub use rng::{entropy_rng, scene_rng, RetentionSource, ScriptedRolls};
pub use stream::extract_partial_narrative;
pub use style::{derive_style, high_tension_overlay, style_for_tag};
pub use turn::TurnGate;
