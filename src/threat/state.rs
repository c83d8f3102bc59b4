//! The threat accumulator.
//!
//! Threat tokens accrue from failures and events; the derived threat
//! level (`tokens / 3`) gates how dangerous the world becomes. Removal
//! is rate-limited to 3 tokens per turn; the excess is truncated and
//! reported, never silently lost. A pending ward absorbs the next
//! accumulation outright.

use serde::{Deserialize, Serialize};

/// Maximum tokens removable in one turn, across all sources.
pub const REDUCTION_CAP: u32 = 3;

/// Tokens per threat level.
pub const TOKENS_PER_LEVEL: u32 = 3;

/// Result of an attempted token removal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatReduction {
    /// Tokens actually removed.
    pub removed: u32,
    /// Requested tokens that the per-turn cap or the floor refused.
    pub truncated: u32,
    /// Token total after the removal.
    pub total: u32,
}

/// Result of an attempted token accumulation.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatGain {
    /// Tokens actually added.
    pub added: u32,
    /// True when a ward absorbed the accumulation.
    pub warded: bool,
    /// Token total after the addition.
    pub total: u32,
}

/// Session-lived threat state.
///
/// The threat level is always derived from the token count, never
/// stored. Per-turn and per-season limits reset at the corresponding
/// logical boundaries via [`ThreatState::begin_turn`] and
/// [`ThreatState::begin_season`].
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ThreatState {
    tokens: u32,
    reduction_used: u32,
    ritual_used: bool,
    warded: bool,
}

impl ThreatState {
    /// Create a zero-threat state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current token count.
    #[must_use]
    pub fn tokens(&self) -> u32 {
        self.tokens
    }

    /// Derived threat level: `tokens / 3`.
    #[must_use]
    pub fn level(&self) -> u32 {
        self.tokens / TOKENS_PER_LEVEL
    }

    /// Add tokens. A pending ward absorbs the whole accumulation.
    ///
    /// Adding zero is a no-op that reports the current total.
    pub fn add_tokens(&mut self, amount: u32) -> ThreatGain {
        if amount == 0 {
            return ThreatGain {
                added: 0,
                warded: false,
                total: self.tokens,
            };
        }
        if self.warded {
            self.warded = false;
            return ThreatGain {
                added: 0,
                warded: true,
                total: self.tokens,
            };
        }
        self.tokens += amount;
        ThreatGain {
            added: amount,
            warded: false,
            total: self.tokens,
        }
    }

    /// Remove tokens, clamped at zero and capped at 3 per turn.
    ///
    /// The cap counts tokens actually removed this turn, so several
    /// small removals share the same budget.
    pub fn remove_tokens(&mut self, amount: u32) -> ThreatReduction {
        let budget = REDUCTION_CAP.saturating_sub(self.reduction_used);
        let removed = amount.min(budget).min(self.tokens);
        self.tokens -= removed;
        self.reduction_used += removed;
        ThreatReduction {
            removed,
            truncated: amount - removed,
            total: self.tokens,
        }
    }

    /// Reset the per-turn reduction budget. Called at turn start.
    pub fn begin_turn(&mut self) {
        self.reduction_used = 0;
    }

    /// Re-arm the once-per-season ritual. Called on season change.
    pub fn begin_season(&mut self) {
        self.ritual_used = false;
    }

    /// Whether the seasonal ritual is still available.
    #[must_use]
    pub fn ritual_available(&self) -> bool {
        !self.ritual_used
    }

    /// Consume the seasonal ritual. Returns false when already spent.
    pub fn use_ritual(&mut self) -> bool {
        if self.ritual_used {
            return false;
        }
        self.ritual_used = true;
        true
    }

    /// Arm a ward against the next accumulation.
    ///
    /// Returns false when a ward is already pending.
    pub fn arm_ward(&mut self) -> bool {
        if self.warded {
            return false;
        }
        self.warded = true;
        true
    }

    /// Whether a ward is pending.
    #[must_use]
    pub fn is_warded(&self) -> bool {
        self.warded
    }
}
