//! Static content catalog: definitions and the registry.
//!
//! Everything here is read-only once registered. The rules engine looks
//! records up by id; registration happens once at startup and panics on
//! duplicates, the same way a bad content pack should fail loudly.

pub mod records;
pub mod registry;

pub use records::{
    ChallengeSpec, CharacterDef, CompanionDef, ItemDef, LandscapeDef, ResourceDef, SiteBlessing,
};
pub use registry::Catalog;
