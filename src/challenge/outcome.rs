//! Outcome classification.
//!
//! One d8 roll plus the gathered bonus is measured against the final
//! difficulty and classified into a tier, with an `exceptional` flag for
//! results that clear (or miss) by a wide margin. The rules are a strict
//! priority list; the first match wins.

use serde::{Deserialize, Serialize};

use super::category::ChallengeKind;
use crate::core::ChallengeId;

/// Tier of a challenge outcome.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum OutcomeTier {
    Success,
    PartialSuccess,
    Failure,
}

/// The result of one challenge resolution.
///
/// The engine retains only the most recent outcome.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChallengeOutcome {
    pub challenge: ChallengeId,
    pub kind: ChallengeKind,
    pub tier: OutcomeTier,
    /// Cleared (or missed) a stricter secondary margin.
    pub exceptional: bool,
    /// The raw d8 roll, 1-8.
    pub roll: u32,
    pub bonus_total: i32,
    /// `roll + bonus_total`.
    pub total: i32,
    pub difficulty: i32,
}

impl ChallengeOutcome {
    /// Whether this outcome counts as any kind of success.
    #[must_use]
    pub fn succeeded(&self) -> bool {
        matches!(self.tier, OutcomeTier::Success | OutcomeTier::PartialSuccess)
    }
}

/// Classify a roll against a difficulty.
///
/// Priority order, first match wins:
/// 1. A natural 8 is an exceptional Success regardless of difficulty.
/// 2. `total >= difficulty` is a Success, exceptional at `difficulty + 2`.
/// 3. `total == difficulty - 1` is a PartialSuccess.
/// 4. Anything else is a Failure, exceptional at `difficulty - 3` or
///    below.
#[must_use]
pub fn classify(roll: u32, total: i32, difficulty: i32) -> (OutcomeTier, bool) {
    if roll == 8 {
        (OutcomeTier::Success, true)
    } else if total >= difficulty {
        (OutcomeTier::Success, total >= difficulty + 2)
    } else if total == difficulty - 1 {
        (OutcomeTier::PartialSuccess, false)
    } else {
        (OutcomeTier::Failure, total <= difficulty - 3)
    }
}
