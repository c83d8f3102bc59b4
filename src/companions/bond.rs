//! Per-companion bond state.
//!
//! Each bonded companion tracks loyalty and neglect through a small
//! state machine:
//!
//! - **Loyal -> Wary** after 3 consecutive unfed turns (entry resets the
//!   wary counter).
//! - **Wary -> Leaving** after 2 further unfed turns.
//! - **Leaving** is terminal; the roster upkeep removes the companion in
//!   the same pass.
//!
//! Feeding at any point resets the hunger clock and, if Wary, restores
//! Loyal.

use serde::{Deserialize, Serialize};

use crate::core::CompanionId;

/// Loyalty ceiling.
pub const MAX_LOYALTY: u8 = 10;

/// Loyalty granted to a freshly bonded companion.
pub const STARTING_LOYALTY: u8 = 5;

/// Unfed turns before a Loyal companion turns Wary.
pub const WARY_THRESHOLD: u32 = 3;

/// Further unfed turns before a Wary companion leaves.
pub const LEAVING_THRESHOLD: u32 = 2;

/// Phase of a companion's loyalty state machine.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum LoyaltyPhase {
    Loyal,
    Wary,
    /// Terminal; companion is removed from the roster this upkeep.
    Leaving,
}

/// The bond with one companion.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanionBond {
    pub id: CompanionId,
    /// 0-10.
    pub loyalty: u8,
    pub phase: LoyaltyPhase,
    pub turns_since_fed: u32,
    /// Unfed turns spent Wary; meaningful only in that phase.
    pub turns_wary: u32,
}

impl CompanionBond {
    /// Create the bond formed by a successful offering.
    #[must_use]
    pub fn new(id: CompanionId) -> Self {
        Self {
            id,
            loyalty: STARTING_LOYALTY,
            phase: LoyaltyPhase::Loyal,
            turns_since_fed: 0,
            turns_wary: 0,
        }
    }

    /// Apply a feeding: hunger resets, loyalty rises, Wary is forgiven.
    pub fn feed(&mut self) {
        self.turns_since_fed = 0;
        self.loyalty = (self.loyalty + 1).min(MAX_LOYALTY);
        if self.phase == LoyaltyPhase::Wary {
            self.phase = LoyaltyPhase::Loyal;
            self.turns_wary = 0;
        }
    }

    /// Advance the neglect clock by one turn and return the new phase.
    ///
    /// The wary counter starts at zero on the turn the companion turns
    /// Wary and only increments on later unfed turns.
    pub fn upkeep_turn(&mut self) -> LoyaltyPhase {
        self.turns_since_fed += 1;
        match self.phase {
            LoyaltyPhase::Loyal if self.turns_since_fed >= WARY_THRESHOLD => {
                self.phase = LoyaltyPhase::Wary;
                self.turns_wary = 0;
            }
            LoyaltyPhase::Wary => {
                self.turns_wary += 1;
                if self.turns_wary >= LEAVING_THRESHOLD {
                    self.phase = LoyaltyPhase::Leaving;
                }
            }
            _ => {}
        }
        self.phase
    }

    /// Whether this companion still contributes challenge bonuses.
    ///
    /// Bonuses are void once the companion has decided to leave.
    #[must_use]
    pub fn contributes(&self) -> bool {
        self.phase != LoyaltyPhase::Leaving
    }

    /// Lower loyalty (threat events), clamped at zero. A companion
    /// driven to zero loyalty turns Wary immediately.
    pub fn shake_loyalty(&mut self, amount: u8) {
        self.loyalty = self.loyalty.saturating_sub(amount);
        if self.loyalty == 0 && self.phase == LoyaltyPhase::Loyal {
            self.phase = LoyaltyPhase::Wary;
            self.turns_wary = 0;
        }
    }
}
