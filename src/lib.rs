//! # everwild
//!
//! The rules engine for a turn-based solitaire journey through a
//! seasonal wild: one traveller walks a fixed path of landscapes,
//! resolving challenges on a d8, keeping animal companions fed, and
//! holding back the land's accumulating threat before it manifests.
//!
//! ## Design Principles
//!
//! 1. **One aggregate, one driver**: all mutable state lives in
//!    `SessionState`; `TurnController` owns it and fires every automatic
//!    rule in a fixed phase order.
//!
//! 2. **Rules never error**: unknown ids, empty packs, and exhausted
//!    limits are sentinel results and journal entries, not `Err`s. The
//!    only errors are phase-machine misuse (`AdvanceError`).
//!
//! 3. **Deterministic under seed**: every random draw flows through one
//!    `DicePool`, so a seeded session replays identically and tests can
//!    script exact rolls.
//!
//! ## Modules
//!
//! - `core`: typed ids, RNG, seasons, the session aggregate
//! - `dice`: the d8 primitive and the pool that scripts it
//! - `catalog`: static content records and the registry
//! - `companions`: the loyalty automaton and roster upkeep
//! - `challenge`: resolution engine, modifiers, outcome classification
//! - `threat`: the accumulator, event tables, omens, and mitigations
//! - `turn`: the phase cycle, verdicts, crafting, and the controller
//! - `journal`: the narrative log every rule writes to

pub mod catalog;
pub mod challenge;
pub mod companions;
pub mod core;
pub mod dice;
pub mod journal;
pub mod threat;
pub mod turn;

pub use crate::catalog::{
    Catalog, ChallengeSpec, CharacterDef, CompanionDef, ItemDef, LandscapeDef, ResourceDef,
    SiteBlessing,
};
pub use crate::challenge::{ChallengeEngine, ChallengeKind, ChallengeOutcome, OutcomeTier};
pub use crate::companions::{CompanionBond, LoyaltyPhase};
pub use crate::core::{
    ChallengeId, CharacterId, CompanionId, ItemId, LandscapeId, ResourceId, Season, SessionState,
};
pub use crate::dice::{DicePool, D8};
pub use crate::journal::{Journal, JournalEntry, LogCategory, MemoryJournal, NullJournal};
pub use crate::threat::{OngoingEffect, ThreatState};
pub use crate::turn::{
    AdvanceError, DefeatCause, JourneyEvaluator, StandardEvaluator, TurnController, TurnPhase,
    Verdict,
};
