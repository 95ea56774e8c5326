//! Core types for sanitygate

mod atmosphere;
mod config;
mod debug;
mod narrative;
mod notice;
mod option;
mod report;
mod scene;
mod style;
mod tier;
mod verdict;

pub use atmosphere::Atmosphere;
pub use config::GateConfig;
pub use debug::{DebugOverride, DebugPreset};
pub use narrative::ParsedNarrative;
pub use notice::{Notice, NoticeCode};
pub use option::{ActionType, PlayerOption, RiskLevel};
pub use report::{TurnEnvelope, TurnReport};
pub use scene::{ClampedStat, PlayerState, RawScene, Scene, DEFAULT_TENSION};
pub use style::{EffectTag, StyleParameters};
pub use tier::{SanityTier, TensionLevel};
pub use verdict::{GameOverDecision, GameOverReason, GameOverVerdict};
