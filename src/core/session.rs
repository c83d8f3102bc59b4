//! The session aggregate.
//!
//! All mutable per-journey state lives here: the traveller, the
//! inventory, the companion roster, threat, season, and the journey
//! path. There are no ambient globals - the turn controller owns one
//! `SessionState` and every rule reads and writes through it.
//!
//! The design is single-player and turn-synchronous; nothing here
//! defends against concurrent mutation.

use im::HashSet as ImHashSet;
use serde::{Deserialize, Serialize};

use super::ids::{CharacterId, CompanionId, ItemId, LandscapeId, ResourceId};
use super::season::Season;
use crate::companions::CompanionBond;
use crate::threat::{OngoingEffect, EffectKind, ThreatState};
use crate::turn::TurnPhase;

/// Default inventory capacity.
pub const DEFAULT_CAPACITY: usize = 8;

/// Default starting (and maximum) health.
pub const DEFAULT_HEALTH: i32 = 10;

/// All mutable state for one journey.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SessionState {
    health: i32,
    max_health: i32,
    /// Capacity-bounded inventory.
    inventory: Vec<ResourceId>,
    capacity: usize,
    equipped: Vec<ItemId>,
    pub character: Option<CharacterId>,
    /// Ordered roster; `Vec` keeps upkeep deterministic.
    companions: Vec<CompanionBond>,
    pub experience: u32,
    blessing_tokens: u32,
    effects: Vec<OngoingEffect>,
    pub threat: ThreatState,
    pub season: Season,
    journey: Vec<LandscapeId>,
    journey_index: usize,
    current_landscape: Option<LandscapeId>,
    visited: ImHashSet<LandscapeId>,
    pub phase: TurnPhase,
}

impl SessionState {
    /// Create a session at the start of the given journey path.
    #[must_use]
    pub fn new(journey: Vec<LandscapeId>) -> Self {
        Self {
            health: DEFAULT_HEALTH,
            max_health: DEFAULT_HEALTH,
            inventory: Vec::new(),
            capacity: DEFAULT_CAPACITY,
            equipped: Vec::new(),
            character: None,
            companions: Vec::new(),
            experience: 0,
            blessing_tokens: 0,
            effects: Vec::new(),
            threat: ThreatState::new(),
            season: Season::Imbolc,
            journey,
            journey_index: 0,
            current_landscape: None,
            visited: ImHashSet::new(),
            phase: TurnPhase::Setup,
        }
    }

    /// Override the inventory capacity.
    #[must_use]
    pub fn with_capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    /// Override starting and maximum health.
    #[must_use]
    pub fn with_health(mut self, health: i32) -> Self {
        self.health = health;
        self.max_health = health;
        self
    }

    /// Override the starting season.
    #[must_use]
    pub fn with_season(mut self, season: Season) -> Self {
        self.season = season;
        self
    }

    // === Health ===

    /// Current health.
    #[must_use]
    pub fn health(&self) -> i32 {
        self.health
    }

    /// Maximum health.
    #[must_use]
    pub fn max_health(&self) -> i32 {
        self.max_health
    }

    /// Restore health, clamped to the maximum. Returns the amount healed.
    pub fn heal(&mut self, amount: i32) -> i32 {
        let healed = amount.max(0).min(self.max_health - self.health);
        self.health += healed;
        healed
    }

    /// Lose health, clamped at zero.
    pub fn take_damage(&mut self, amount: i32) {
        self.health = (self.health - amount.max(0)).max(0);
    }

    // === Inventory ===

    /// Add a resource. Fails (returns false) when the pack is full.
    pub fn add_resource(&mut self, resource: ResourceId) -> bool {
        if self.inventory.len() >= self.capacity {
            return false;
        }
        self.inventory.push(resource);
        true
    }

    /// Remove one instance of a resource. Returns false when not held.
    pub fn remove_resource(&mut self, resource: &ResourceId) -> bool {
        if let Some(pos) = self.inventory.iter().position(|r| r == resource) {
            self.inventory.remove(pos);
            true
        } else {
            false
        }
    }

    /// Remove the resource at an index (random-loss events).
    pub fn remove_resource_at(&mut self, index: usize) -> Option<ResourceId> {
        if index < self.inventory.len() {
            Some(self.inventory.remove(index))
        } else {
            None
        }
    }

    /// Whether at least one instance of a resource is held.
    #[must_use]
    pub fn has_resource(&self, resource: &ResourceId) -> bool {
        self.inventory.iter().any(|r| r == resource)
    }

    /// Count held instances of a resource.
    #[must_use]
    pub fn resource_count(&self, resource: &ResourceId) -> usize {
        self.inventory.iter().filter(|r| *r == resource).count()
    }

    /// The whole inventory.
    #[must_use]
    pub fn resources(&self) -> &[ResourceId] {
        &self.inventory
    }

    /// Inventory capacity.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }

    // === Equipment ===

    /// Equip an item. Duplicate equips are ignored.
    pub fn equip(&mut self, item: ItemId) {
        if !self.equipped.contains(&item) {
            self.equipped.push(item);
        }
    }

    /// Equipped items.
    #[must_use]
    pub fn equipped(&self) -> &[ItemId] {
        &self.equipped
    }

    // === Companions ===

    /// Add a bond. Fails (returns false) when already bonded.
    pub fn add_companion(&mut self, bond: CompanionBond) -> bool {
        if self.companions.iter().any(|b| b.id == bond.id) {
            return false;
        }
        self.companions.push(bond);
        true
    }

    /// Remove a bond, returning it if present.
    pub fn remove_companion(&mut self, id: &CompanionId) -> Option<CompanionBond> {
        let pos = self.companions.iter().position(|b| &b.id == id)?;
        Some(self.companions.remove(pos))
    }

    /// Look up a bond.
    #[must_use]
    pub fn companion(&self, id: &CompanionId) -> Option<&CompanionBond> {
        self.companions.iter().find(|b| &b.id == id)
    }

    /// Look up a bond mutably.
    pub fn companion_mut(&mut self, id: &CompanionId) -> Option<&mut CompanionBond> {
        self.companions.iter_mut().find(|b| &b.id == id)
    }

    /// The whole roster.
    #[must_use]
    pub fn companions(&self) -> &[CompanionBond] {
        &self.companions
    }

    /// The whole roster, mutably.
    pub fn companions_mut(&mut self) -> &mut [CompanionBond] {
        &mut self.companions
    }

    // === Blessings ===

    /// Banked blessing tokens.
    #[must_use]
    pub fn blessing_tokens(&self) -> u32 {
        self.blessing_tokens
    }

    /// Bank one blessing token.
    pub fn gain_blessing(&mut self) {
        self.blessing_tokens += 1;
    }

    /// Spend all banked blessing tokens, returning how many were spent.
    pub fn spend_blessings(&mut self) -> u32 {
        std::mem::take(&mut self.blessing_tokens)
    }

    // === Ongoing effects ===

    /// Attach an ongoing effect.
    pub fn add_effect(&mut self, effect: OngoingEffect) {
        self.effects.push(effect);
    }

    /// Active effects.
    #[must_use]
    pub fn effects(&self) -> &[OngoingEffect] {
        &self.effects
    }

    /// Net difficulty shift from active effects.
    #[must_use]
    pub fn difficulty_shift(&self) -> i32 {
        self.effects
            .iter()
            .filter(|e| e.kind == EffectKind::DifficultyShift)
            .map(|e| e.magnitude)
            .sum()
    }

    /// Whether travel is currently blocked by an effect.
    #[must_use]
    pub fn travel_blocked(&self) -> bool {
        self.effects.iter().any(|e| e.kind == EffectKind::TravelBlock)
    }

    /// Whether a prevention effect is active.
    #[must_use]
    pub fn prevention_active(&self) -> bool {
        self.effects.iter().any(|e| e.kind == EffectKind::Prevention)
    }

    /// Decrement effect durations, removing and returning the expired.
    pub fn tick_effects(&mut self) -> Vec<OngoingEffect> {
        for effect in &mut self.effects {
            effect.turns_left = effect.turns_left.saturating_sub(1);
        }
        let (expired, live): (Vec<_>, Vec<_>) =
            self.effects.drain(..).partition(|e| e.turns_left == 0);
        self.effects = live;
        expired
    }

    // === Journey ===

    /// The landscape the traveller currently occupies.
    #[must_use]
    pub fn current_landscape(&self) -> Option<&LandscapeId> {
        self.current_landscape.as_ref()
    }

    /// Landscapes visited so far.
    #[must_use]
    pub fn visited(&self) -> &ImHashSet<LandscapeId> {
        &self.visited
    }

    /// Record a visit. Idempotent: returns true only on first visit.
    pub fn visit(&mut self, landscape: LandscapeId) -> bool {
        self.visited.insert(landscape).is_none()
    }

    /// Move to the next landscape on the path, if any remains.
    ///
    /// Appends the landscape to the visited set (idempotent) and makes
    /// it current. Entry effects are the caller's concern and fire even
    /// on a re-visit.
    pub fn advance_journey(&mut self) -> Option<LandscapeId> {
        let next = self.journey.get(self.journey_index)?.clone();
        self.journey_index += 1;
        self.current_landscape = Some(next.clone());
        self.visit(next.clone());
        Some(next)
    }

    /// Whether every landscape on the path has been entered.
    #[must_use]
    pub fn journey_complete(&self) -> bool {
        self.journey_index >= self.journey.len()
    }

    /// The full journey path.
    #[must_use]
    pub fn journey(&self) -> &[LandscapeId] {
        &self.journey
    }

    // === Boundaries ===

    /// Per-turn resets. Called when a new turn begins.
    pub fn begin_turn(&mut self) {
        self.threat.begin_turn();
    }

    /// Advance the season wheel and re-arm per-season limits.
    pub fn advance_season(&mut self) -> Season {
        self.season = self.season.next();
        self.threat.begin_season();
        self.season
    }
}
