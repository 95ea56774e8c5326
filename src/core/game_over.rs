//! Game-over evaluator
//!
//! Advisory only. The generator's `is_game_over` flag is authoritative; the
//! local verdict is a consistency check that surfaces disagreement as a
//! notice and never flips the upstream flag.

use crate::types::{GameOverDecision, GameOverReason, GameOverVerdict, Notice, NoticeCode};

/// Local termination rules
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameOverPolicy {
    /// Suspicion at or above this ends the game; `None` disables the rule
    pub suspicion_limit: Option<u8>,
}

impl GameOverPolicy {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_suspicion_limit(limit: u8) -> Self {
        Self {
            suspicion_limit: Some(limit),
        }
    }

    /// hp <= 0 wins over sanity <= 0, which wins over suspicion
    pub fn evaluate(&self, hp: i64, sanity: i64, suspicion: i64) -> GameOverVerdict {
        if hp <= 0 {
            GameOverVerdict::over(GameOverReason::Death)
        } else if sanity <= 0 {
            GameOverVerdict::over(GameOverReason::SanityCollapse)
        } else if self
            .suspicion_limit
            .is_some_and(|limit| suspicion >= limit as i64)
        {
            GameOverVerdict::over(GameOverReason::Exposed)
        } else {
            GameOverVerdict::alive()
        }
    }
}

/// hp / sanity check with the default policy
pub fn evaluate(hp: i64, sanity: i64) -> GameOverVerdict {
    GameOverPolicy::default().evaluate(hp, sanity, 0)
}

/// Combine the upstream flag with the local verdict
pub fn reconcile(
    upstream_over: bool,
    upstream_reason: Option<&str>,
    local: GameOverVerdict,
) -> GameOverDecision {
    let discrepancy = if local.is_over && !upstream_over {
        let reason = local.reason.map(|r| r.message()).unwrap_or("unknown");
        log::warn!(
            "local evaluator ends the game ({}) but upstream says it continues; keeping upstream",
            reason
        );
        Some(Notice::new(
            NoticeCode::N001_GAME_OVER_CONTRADICTED,
            format!("local verdict: {}", reason),
        ))
    } else {
        None
    };

    let reason = if upstream_over {
        upstream_reason
            .map(String::from)
            .or_else(|| local.reason.map(|r| r.message().to_string()))
    } else {
        None
    };

    GameOverDecision {
        is_over: upstream_over,
        reason,
        local,
        discrepancy,
    }
}

// =============================================================================
// TESTS
// =============================================================================
