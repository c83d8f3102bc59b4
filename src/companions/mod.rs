//! Animal companions: the loyalty automaton and roster operations.
//!
//! ## Key Types
//!
//! - `CompanionBond`: one bonded companion's loyalty state machine
//! - `LoyaltyPhase`: Loyal -> Wary -> Leaving
//!
//! Bonding, feeding, and the per-turn upkeep pass live in `automaton`.

pub mod automaton;
pub mod bond;

pub use automaton::{bond_companion, feed_companion, upkeep};
pub use bond::{
    CompanionBond, LoyaltyPhase, LEAVING_THRESHOLD, MAX_LOYALTY, STARTING_LOYALTY, WARY_THRESHOLD,
};
