//! Static catalog record types.
//!
//! Records are read-only once registered: the rules engine looks them up
//! but never mutates them. Builders follow the usual pattern - construct
//! with the required fields, chain `with_*` for the rest.

use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use crate::challenge::ChallengeKind;
use crate::core::{ChallengeId, CharacterId, CompanionId, ItemId, LandscapeId, ResourceId, Season};

/// A challenge as defined in the catalog.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ChallengeSpec {
    pub id: ChallengeId,
    pub name: String,
    pub kind: ChallengeKind,
    pub base_difficulty: u32,
    /// Preferred reward; categories supply a default when absent.
    pub reward: Option<ResourceId>,
}

impl ChallengeSpec {
    /// Create a challenge definition.
    pub fn new(
        id: impl Into<ChallengeId>,
        name: impl Into<String>,
        kind: ChallengeKind,
        base_difficulty: u32,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            kind,
            base_difficulty,
            reward: None,
        }
    }

    /// Set the reward hint.
    #[must_use]
    pub fn with_reward(mut self, reward: impl Into<ResourceId>) -> Self {
        self.reward = Some(reward.into());
        self
    }
}

/// A playable character.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CharacterDef {
    pub id: CharacterId,
    pub name: String,
    bonuses: FxHashMap<ChallengeKind, i32>,
}

impl CharacterDef {
    /// Create a character definition.
    pub fn new(id: impl Into<CharacterId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bonuses: FxHashMap::default(),
        }
    }

    /// Add a flat per-category bonus.
    #[must_use]
    pub fn with_bonus(mut self, kind: ChallengeKind, bonus: i32) -> Self {
        self.bonuses.insert(kind, bonus);
        self
    }

    /// Flat bonus for a category (0 when none defined).
    #[must_use]
    pub fn flat_bonus(&self, kind: ChallengeKind) -> i32 {
        self.bonuses.get(&kind).copied().unwrap_or(0)
    }
}

/// An equippable item.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ItemDef {
    pub id: ItemId,
    pub name: String,
    bonuses: FxHashMap<ChallengeKind, i32>,
    /// Resources consumed to craft this item; empty means not craftable.
    pub recipe: Vec<ResourceId>,
}

impl ItemDef {
    /// Create an item definition.
    pub fn new(id: impl Into<ItemId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bonuses: FxHashMap::default(),
            recipe: Vec::new(),
        }
    }

    /// Add a flat per-category bonus.
    #[must_use]
    pub fn with_bonus(mut self, kind: ChallengeKind, bonus: i32) -> Self {
        self.bonuses.insert(kind, bonus);
        self
    }

    /// Set the craft recipe.
    #[must_use]
    pub fn with_recipe(mut self, recipe: impl IntoIterator<Item = ResourceId>) -> Self {
        self.recipe = recipe.into_iter().collect();
        self
    }

    /// Flat bonus for a category (0 when none defined).
    #[must_use]
    pub fn flat_bonus(&self, kind: ChallengeKind) -> i32 {
        self.bonuses.get(&kind).copied().unwrap_or(0)
    }

    /// Whether this item can be crafted at all.
    #[must_use]
    pub fn is_craftable(&self) -> bool {
        !self.recipe.is_empty()
    }
}

/// An animal companion.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct CompanionDef {
    pub id: CompanionId,
    pub name: String,
    bonuses: FxHashMap<ChallengeKind, i32>,
    /// Extra bonus when a category is attempted in a given season.
    seasonal: FxHashMap<(ChallengeKind, Season), i32>,
    /// Resource ids or kinds this companion accepts as a bonding offering.
    pub preferred: Vec<String>,
}

impl CompanionDef {
    /// Create a companion definition.
    pub fn new(id: impl Into<CompanionId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            bonuses: FxHashMap::default(),
            seasonal: FxHashMap::default(),
            preferred: Vec::new(),
        }
    }

    /// Add a flat per-category bonus.
    #[must_use]
    pub fn with_bonus(mut self, kind: ChallengeKind, bonus: i32) -> Self {
        self.bonuses.insert(kind, bonus);
        self
    }

    /// Add a seasonal per-category bonus.
    #[must_use]
    pub fn with_season_bonus(mut self, kind: ChallengeKind, season: Season, bonus: i32) -> Self {
        self.seasonal.insert((kind, season), bonus);
        self
    }

    /// Add an accepted offering (exact resource id or resource kind).
    #[must_use]
    pub fn with_preferred(mut self, offering: impl Into<String>) -> Self {
        self.preferred.push(offering.into());
        self
    }

    /// Flat bonus for a category (0 when none defined).
    #[must_use]
    pub fn flat_bonus(&self, kind: ChallengeKind) -> i32 {
        self.bonuses.get(&kind).copied().unwrap_or(0)
    }

    /// Seasonal bonus for a category in a season (0 when none defined).
    #[must_use]
    pub fn seasonal_bonus(&self, kind: ChallengeKind, season: Season) -> i32 {
        self.seasonal.get(&(kind, season)).copied().unwrap_or(0)
    }

    /// Whether the given resource is a suitable bonding offering.
    ///
    /// Matches the preferred list by exact id or by resource kind.
    #[must_use]
    pub fn accepts(&self, resource: &ResourceId, kind: &str) -> bool {
        self.preferred
            .iter()
            .any(|p| p == resource.as_str() || p == kind)
    }
}

/// How a sacred site reduces threat when visited.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum SiteBlessing {
    /// Remove 1-3 tokens, rolled on arrival.
    Rolled,
    /// Remove a fixed number of tokens.
    Flat(u32),
}

/// A landscape along the journey path.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct LandscapeDef {
    pub id: LandscapeId,
    pub name: String,
    /// Challenge posed when the traveller is here, if any.
    pub challenge: Option<ChallengeId>,
    /// Sacred-site blessing applied on entry, if any.
    pub sacred: Option<SiteBlessing>,
}

impl LandscapeDef {
    /// Create a landscape definition.
    pub fn new(id: impl Into<LandscapeId>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            challenge: None,
            sacred: None,
        }
    }

    /// Set the landscape's challenge.
    #[must_use]
    pub fn with_challenge(mut self, challenge: impl Into<ChallengeId>) -> Self {
        self.challenge = Some(challenge.into());
        self
    }

    /// Mark this landscape as a sacred site.
    #[must_use]
    pub fn with_sacred_site(mut self, blessing: SiteBlessing) -> Self {
        self.sacred = Some(blessing);
        self
    }
}

/// A resource definition.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ResourceDef {
    pub id: ResourceId,
    pub name: String,
    /// Resource kind; defaults to the id's lexical prefix.
    pub kind: String,
}

impl ResourceDef {
    /// Create a resource definition, deriving the kind from the id.
    pub fn new(id: impl Into<ResourceId>, name: impl Into<String>) -> Self {
        let id = id.into();
        let kind = id.kind().to_string();
        Self {
            id,
            name: name.into(),
            kind,
        }
    }

    /// Override the resource kind.
    #[must_use]
    pub fn with_kind(mut self, kind: impl Into<String>) -> Self {
        self.kind = kind.into();
        self
    }
}
