//! Randomness seam for the option gate
//!
//! Every `RngCore` is a `RetentionSource`. Tests script exact rolls with
//! `ScriptedRolls`; production uses `thread_rng()` or a per-scene seeded
//! ChaCha stream so that re-rendering one scene keeps the same options.

use rand::{Rng, RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use sha2::{Digest, Sha256};

/// Source of uniform rolls in [0, 1); an option survives when roll < p
pub trait RetentionSource {
    fn roll(&mut self) -> f64;
}

impl<R: RngCore + ?Sized> RetentionSource for R {
    fn roll(&mut self) -> f64 {
        self.gen::<f64>()
    }
}

/// Fixed roll sequence. Once exhausted every roll is 1.0, which never retains.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRolls {
    rolls: Vec<f64>,
    next: usize,
}

impl ScriptedRolls {
    pub fn new(rolls: impl Into<Vec<f64>>) -> Self {
        Self {
            rolls: rolls.into(),
            next: 0,
        }
    }

    /// Rolls handed out so far
    pub fn consumed(&self) -> usize {
        self.next
    }
}

impl RetentionSource for ScriptedRolls {
    fn roll(&mut self) -> f64 {
        let roll = self.rolls.get(self.next).copied().unwrap_or(1.0);
        self.next += 1;
        roll
    }
}

/// Deterministic stream for one scene: SHA-256(seed ‖ scene id) as ChaCha seed
pub fn scene_rng(seed: u64, scene_id: Option<&str>) -> ChaCha8Rng {
    let mut hasher = Sha256::new();
    hasher.update(seed.to_le_bytes());
    if let Some(id) = scene_id {
        hasher.update(id.as_bytes());
    }
    let digest: [u8; 32] = hasher.finalize().into();
    ChaCha8Rng::from_seed(digest)
}

/// Unseeded stream for production wiring
pub fn entropy_rng() -> ChaCha8Rng {
    ChaCha8Rng::from_entropy()
}
