//! The catalog registry.
//!
//! Stores every static definition the rules engine can look up. The
//! catalog is populated once at startup and treated as immutable
//! afterwards; duplicate registration is a programming error and panics.

use rustc_hash::FxHashMap;

use super::records::{
    ChallengeSpec, CharacterDef, CompanionDef, ItemDef, LandscapeDef, ResourceDef,
};
use crate::core::{ChallengeId, CharacterId, CompanionId, ItemId, LandscapeId, ResourceId};

/// Registry of all static game definitions.
#[derive(Clone, Debug, Default)]
pub struct Catalog {
    characters: FxHashMap<CharacterId, CharacterDef>,
    items: FxHashMap<ItemId, ItemDef>,
    companions: FxHashMap<CompanionId, CompanionDef>,
    landscapes: FxHashMap<LandscapeId, LandscapeDef>,
    resources: FxHashMap<ResourceId, ResourceDef>,
    challenges: FxHashMap<ChallengeId, ChallengeSpec>,
}

impl Catalog {
    /// Create an empty catalog.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a character definition.
    ///
    /// Panics if the id is already registered.
    pub fn register_character(&mut self, def: CharacterDef) {
        assert!(
            self.characters.insert(def.id.clone(), def).is_none(),
            "duplicate character registration"
        );
    }

    /// Register an item definition.
    ///
    /// Panics if the id is already registered.
    pub fn register_item(&mut self, def: ItemDef) {
        assert!(
            self.items.insert(def.id.clone(), def).is_none(),
            "duplicate item registration"
        );
    }

    /// Register a companion definition.
    ///
    /// Panics if the id is already registered.
    pub fn register_companion(&mut self, def: CompanionDef) {
        assert!(
            self.companions.insert(def.id.clone(), def).is_none(),
            "duplicate companion registration"
        );
    }

    /// Register a landscape definition.
    ///
    /// Panics if the id is already registered.
    pub fn register_landscape(&mut self, def: LandscapeDef) {
        assert!(
            self.landscapes.insert(def.id.clone(), def).is_none(),
            "duplicate landscape registration"
        );
    }

    /// Register a resource definition.
    ///
    /// Panics if the id is already registered.
    pub fn register_resource(&mut self, def: ResourceDef) {
        assert!(
            self.resources.insert(def.id.clone(), def).is_none(),
            "duplicate resource registration"
        );
    }

    /// Register a challenge definition.
    ///
    /// Panics if the id is already registered.
    pub fn register_challenge(&mut self, def: ChallengeSpec) {
        assert!(
            self.challenges.insert(def.id.clone(), def).is_none(),
            "duplicate challenge registration"
        );
    }

    /// Look up a character.
    #[must_use]
    pub fn character(&self, id: &CharacterId) -> Option<&CharacterDef> {
        self.characters.get(id)
    }

    /// Look up an item.
    #[must_use]
    pub fn item(&self, id: &ItemId) -> Option<&ItemDef> {
        self.items.get(id)
    }

    /// Look up a companion.
    #[must_use]
    pub fn companion(&self, id: &CompanionId) -> Option<&CompanionDef> {
        self.companions.get(id)
    }

    /// Look up a landscape.
    #[must_use]
    pub fn landscape(&self, id: &LandscapeId) -> Option<&LandscapeDef> {
        self.landscapes.get(id)
    }

    /// Look up a resource.
    #[must_use]
    pub fn resource(&self, id: &ResourceId) -> Option<&ResourceDef> {
        self.resources.get(id)
    }

    /// Look up a challenge.
    #[must_use]
    pub fn challenge(&self, id: &ChallengeId) -> Option<&ChallengeSpec> {
        self.challenges.get(id)
    }

    /// Resource kind for an id: the registered kind when known,
    /// the lexical prefix otherwise.
    #[must_use]
    pub fn resource_kind<'a>(&'a self, id: &'a ResourceId) -> &'a str {
        self.resources
            .get(id)
            .map_or_else(|| id.kind(), |def| def.kind.as_str())
    }

    /// Iterate over all registered landscapes.
    pub fn landscapes(&self) -> impl Iterator<Item = &LandscapeDef> {
        self.landscapes.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::records::SiteBlessing;
    use crate::challenge::ChallengeKind;

    #[test]
    fn test_register_and_lookup() {
        let mut catalog = Catalog::new();
        catalog.register_companion(CompanionDef::new("raven", "Raven"));

        assert!(catalog.companion(&CompanionId::new("raven")).is_some());
        assert!(catalog.companion(&CompanionId::new("wolf")).is_none());
    }

    #[test]
    #[should_panic(expected = "duplicate companion registration")]
    fn test_duplicate_registration_panics() {
        let mut catalog = Catalog::new();
        catalog.register_companion(CompanionDef::new("raven", "Raven"));
        catalog.register_companion(CompanionDef::new("raven", "Another Raven"));
    }

    #[test]
    fn test_resource_kind_falls_back_to_prefix() {
        let mut catalog = Catalog::new();
        catalog.register_resource(ResourceDef::new("flint", "Flint").with_kind("stone"));

        assert_eq!(catalog.resource_kind(&ResourceId::new("flint")), "stone");
        // Unregistered ids still resolve a kind lexically.
        assert_eq!(catalog.resource_kind(&ResourceId::new("food_nuts")), "food");
    }

    #[test]
    fn test_landscape_records() {
        let mut catalog = Catalog::new();
        catalog.register_challenge(ChallengeSpec::new(
            "ford_crossing",
            "Ford Crossing",
            ChallengeKind::Physical,
            5,
        ));
        catalog.register_landscape(
            LandscapeDef::new("river_ford", "River Ford").with_challenge("ford_crossing"),
        );
        catalog.register_landscape(
            LandscapeDef::new("heartwood_grove", "Heartwood Grove")
                .with_sacred_site(SiteBlessing::Flat(2)),
        );

        let ford = catalog.landscape(&LandscapeId::new("river_ford")).unwrap();
        assert_eq!(ford.challenge, Some(ChallengeId::new("ford_crossing")));
        assert_eq!(catalog.landscapes().count(), 2);
    }
}
