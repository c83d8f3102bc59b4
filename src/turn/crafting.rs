//! Item crafting.
//!
//! Recipes are count-based: a recipe listing a resource twice needs two
//! held instances. Crafting consumes the recipe and equips the item in
//! one step - crafted items never pass through the inventory.

use rustc_hash::FxHashMap;

use crate::catalog::Catalog;
use crate::core::{ItemId, ResourceId, SessionState};
use crate::journal::{Journal, JournalEntry, LogCategory};

/// Result of a craftability check.
#[derive(Clone, Debug, Default)]
pub struct CraftCheck {
    pub can_craft: bool,
    /// Recipe entries not covered by the inventory.
    pub missing: Vec<ResourceId>,
}

/// Check whether an item could be crafted from the held resources.
///
/// Unknown or recipe-less items are never craftable and report nothing
/// missing.
#[must_use]
pub fn check_craft(session: &SessionState, catalog: &Catalog, item: &ItemId) -> CraftCheck {
    let Some(def) = catalog.item(item) else {
        return CraftCheck::default();
    };
    if !def.is_craftable() {
        return CraftCheck::default();
    }

    let mut held: FxHashMap<&ResourceId, usize> = FxHashMap::default();
    for resource in session.resources() {
        *held.entry(resource).or_insert(0) += 1;
    }

    let mut missing = Vec::new();
    for resource in &def.recipe {
        match held.get_mut(resource) {
            Some(count) if *count > 0 => *count -= 1,
            _ => missing.push(resource.clone()),
        }
    }

    CraftCheck {
        can_craft: missing.is_empty(),
        missing,
    }
}

/// Craft an item, consuming its recipe and equipping the result.
///
/// Fails (returns false) when the check fails; nothing is consumed on
/// failure.
pub fn craft(
    session: &mut SessionState,
    catalog: &Catalog,
    item: &ItemId,
    journal: &mut dyn Journal,
) -> bool {
    let check = check_craft(session, catalog, item);
    if !check.can_craft {
        if !check.missing.is_empty() {
            journal.record(
                JournalEntry::new(format!("cannot craft {item}"), LogCategory::Resource)
                    .with_details(
                        check
                            .missing
                            .iter()
                            .map(ToString::to_string)
                            .collect::<Vec<_>>()
                            .join(", "),
                    ),
            );
        }
        return false;
    }

    // check_craft guarantees the lookup and the removals succeed.
    let def = match catalog.item(item) {
        Some(def) => def.clone(),
        None => return false,
    };
    for resource in &def.recipe {
        session.remove_resource(resource);
    }
    session.equip(def.id.clone());
    journal.record(
        JournalEntry::new(format!("crafted {}", def.name), LogCategory::Resource).highlighted(),
    );
    true
}
