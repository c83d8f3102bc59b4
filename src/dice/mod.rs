//! Dice rolling primitive.
//!
//! Every resolution in the game rolls a d8 drawn from a [`DicePool`].
//! The pool wraps the injectable [`GameRng`] and adds a forced-roll
//! queue so tests can script exact outcomes without touching the
//! classification logic.
//!
//! Rolls never fail: a degenerate die (`sides < 2`) always shows 1.

use std::collections::VecDeque;

use serde::{Deserialize, Serialize};

use crate::core::GameRng;

/// Sides on the resolution die.
pub const D8: u32 = 8;

/// Both draws of an advantage/disadvantage roll plus the kept value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DualRoll {
    /// The two independent draws, in roll order.
    pub draws: [u32; 2],
    /// The value kept (max for advantage, min for disadvantage).
    pub kept: u32,
}

/// Source of all die rolls in the engine.
#[derive(Clone, Debug)]
pub struct DicePool {
    rng: GameRng,
    forced: VecDeque<u32>,
}

impl DicePool {
    /// Create a pool with a seeded RNG (tests, replays).
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self {
            rng: GameRng::new(seed),
            forced: VecDeque::new(),
        }
    }

    /// Create a pool seeded from OS entropy (normal play).
    #[must_use]
    pub fn from_entropy() -> Self {
        Self {
            rng: GameRng::from_entropy(),
            forced: VecDeque::new(),
        }
    }

    /// Queue forced results for upcoming rolls, consumed in order.
    ///
    /// Test-only hook: forced values are clamped into the rolled die's
    /// range so invariants hold even for sloppy fixtures.
    pub fn force_rolls(&mut self, rolls: impl IntoIterator<Item = u32>) {
        self.forced.extend(rolls);
    }

    /// Roll a single die, uniform in `[1, sides]`.
    pub fn roll_die(&mut self, sides: u32) -> u32 {
        if sides < 2 {
            return 1;
        }
        if let Some(forced) = self.forced.pop_front() {
            return forced.clamp(1, sides);
        }
        self.rng.gen_range_u32(1..=sides)
    }

    /// Roll the resolution d8.
    pub fn roll_d8(&mut self) -> u32 {
        self.roll_die(D8)
    }

    /// Roll two dice, keep the higher.
    pub fn roll_with_advantage(&mut self, sides: u32) -> DualRoll {
        let draws = [self.roll_die(sides), self.roll_die(sides)];
        DualRoll {
            draws,
            kept: draws[0].max(draws[1]),
        }
    }

    /// Roll two dice, keep the lower.
    pub fn roll_with_disadvantage(&mut self, sides: u32) -> DualRoll {
        let draws = [self.roll_die(sides), self.roll_die(sides)];
        DualRoll {
            draws,
            kept: draws[0].min(draws[1]),
        }
    }

    /// Probability check against the underlying RNG.
    ///
    /// Not affected by forced rolls; `p` is clamped to `[0, 1]`.
    pub fn chance(&mut self, probability: f64) -> bool {
        self.rng.gen_bool(probability)
    }

    /// Pick an index uniformly from `0..len`, or `None` when empty.
    pub fn pick_index(&mut self, len: usize) -> Option<usize> {
        if len == 0 {
            return None;
        }
        // Route through the die so forced rolls can script table draws.
        Some((self.roll_die(len as u32) - 1) as usize)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roll_in_range() {
        let mut dice = DicePool::seeded(42);
        for _ in 0..500 {
            let roll = dice.roll_d8();
            assert!((1..=8).contains(&roll));
        }
    }

    #[test]
    fn test_degenerate_die_never_fails() {
        let mut dice = DicePool::seeded(42);
        assert_eq!(dice.roll_die(0), 1);
        assert_eq!(dice.roll_die(1), 1);
    }

    #[test]
    fn test_forced_rolls_consumed_in_order() {
        let mut dice = DicePool::seeded(42);
        dice.force_rolls([3, 8, 1]);

        assert_eq!(dice.roll_d8(), 3);
        assert_eq!(dice.roll_d8(), 8);
        assert_eq!(dice.roll_d8(), 1);
        // Queue exhausted; falls back to the RNG.
        assert!((1..=8).contains(&dice.roll_d8()));
    }

    #[test]
    fn test_forced_roll_clamped() {
        let mut dice = DicePool::seeded(42);
        dice.force_rolls([99, 0]);
        assert_eq!(dice.roll_die(6), 6);
        assert_eq!(dice.roll_die(6), 1);
    }

    #[test]
    fn test_advantage_keeps_max() {
        let mut dice = DicePool::seeded(42);
        dice.force_rolls([2, 7]);
        let roll = dice.roll_with_advantage(8);
        assert_eq!(roll.draws, [2, 7]);
        assert_eq!(roll.kept, 7);
    }

    #[test]
    fn test_disadvantage_keeps_min() {
        let mut dice = DicePool::seeded(42);
        dice.force_rolls([2, 7]);
        let roll = dice.roll_with_disadvantage(8);
        assert_eq!(roll.draws, [2, 7]);
        assert_eq!(roll.kept, 2);
    }

    #[test]
    fn test_pick_index() {
        let mut dice = DicePool::seeded(42);
        assert_eq!(dice.pick_index(0), None);
        for _ in 0..100 {
            let idx = dice.pick_index(5).unwrap();
            assert!(idx < 5);
        }
    }

    #[test]
    fn test_pick_index_scriptable() {
        let mut dice = DicePool::seeded(42);
        dice.force_rolls([4]);
        assert_eq!(dice.pick_index(6), Some(3));
    }
}
