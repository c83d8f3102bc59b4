//! Core identity, randomness, season, and session state.
//!
//! ## Key Types
//!
//! - `CharacterId`, `CompanionId`, `LandscapeId`, ...: typed string ids
//! - `GameRng`: seedable ChaCha8 randomness source
//! - `Season`: the four-spoke seasonal wheel
//! - `SessionState`: all mutable per-journey state

pub mod ids;
pub mod rng;
pub mod season;
pub mod session;

pub use ids::{ChallengeId, CharacterId, CompanionId, ItemId, LandscapeId, ResourceId};
pub use rng::GameRng;
pub use season::Season;
pub use session::{SessionState, DEFAULT_CAPACITY, DEFAULT_HEALTH};
