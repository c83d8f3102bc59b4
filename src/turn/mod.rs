//! The turn-phase cycle and the controller that drives it.
//!
//! ## Key Types
//!
//! - `TurnPhase`: the twelve-phase cycle with its absorbing `GameOver`
//! - `TurnController`: owns the session and fires every automatic rule
//! - `JourneyEvaluator` / `Verdict`: win and loss decisions
//!
//! Crafting is a player action scoped to its phase and lives here too.

pub mod controller;
pub mod crafting;
pub mod phase;
pub mod verdict;

pub use controller::{AdvanceError, TurnController};
pub use crafting::{check_craft, craft, CraftCheck};
pub use phase::TurnPhase;
pub use verdict::{
    DefeatCause, JourneyEvaluator, StandardEvaluator, Verdict, DEFAULT_DEFEAT_THRESHOLD,
};
