//! Output pacing policy.
//!
//! Delays simulate a human-readable typing cadence. They are a
//! presentation choice, not a correctness requirement, so the policy is
//! injected into the turn loop and can be zeroed out in tests.

use std::time::Duration;

/// Delay policy applied while events are emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing {
    /// Delay after each emitted word fragment.
    pub word: Duration,
    /// Delay after each completed turn.
    pub turn: Duration,
}

impl Pacing {
    /// No delays at all.
    pub const fn none() -> Self {
        Self {
            word: Duration::ZERO,
            turn: Duration::ZERO,
        }
    }

    /// Sleep the post-fragment delay.
    pub(crate) async fn after_word(&self) {
        if !self.word.is_zero() {
            tokio::time::sleep(self.word).await;
        }
    }

    /// Sleep the post-turn delay.
    pub(crate) async fn after_turn(&self) {
        if !self.turn.is_zero() {
            tokio::time::sleep(self.turn).await;
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Self {
            word: Duration::from_millis(30),
            turn: Duration::from_secs(1),
        }
    }
}
