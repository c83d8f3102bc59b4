//! Roster-level companion operations.
//!
//! These functions connect the per-bond state machine to the session:
//! bonding consumes a suitable offering, feeding consumes any held
//! resource, and the per-turn upkeep advances every bond's neglect
//! clock, removing companions that decide to leave in the same pass.
//!
//! All failures are sentinel-style: an unknown id or a missing resource
//! returns `false` and never aborts the turn.

use crate::catalog::Catalog;
use crate::core::{CompanionId, ResourceId, SessionState};
use crate::journal::{Journal, JournalEntry, LogCategory};

use super::bond::{CompanionBond, LoyaltyPhase};

/// Feed a bonded companion with a held resource.
///
/// Consumes the resource, resets the hunger clock, raises loyalty and,
/// if the companion was Wary, restores it to Loyal. Fails when the
/// companion is not bonded or the resource is not held.
pub fn feed_companion(
    session: &mut SessionState,
    id: &CompanionId,
    resource: &ResourceId,
    journal: &mut dyn Journal,
) -> bool {
    if session.companion(id).is_none() || !session.has_resource(resource) {
        return false;
    }
    session.remove_resource(resource);
    if let Some(bond) = session.companion_mut(id) {
        bond.feed();
    }
    journal.record(JournalEntry::new(
        format!("{id} eats the offered {resource}"),
        LogCategory::Companion,
    ));
    true
}

/// Bond with a companion by offering a suitable resource.
///
/// The offering must be held and must match the companion's preferred
/// list (exact id or resource kind); it is consumed by the bonding.
/// Fails when the companion is unknown, already bonded, or the offering
/// is absent or unsuitable.
pub fn bond_companion(
    session: &mut SessionState,
    catalog: &Catalog,
    id: &CompanionId,
    resource: &ResourceId,
    journal: &mut dyn Journal,
) -> bool {
    let Some(def) = catalog.companion(id) else {
        return false;
    };
    if session.companion(id).is_some() || !session.has_resource(resource) {
        return false;
    }
    if !def.accepts(resource, catalog.resource_kind(resource)) {
        tracing::debug!(companion = %id, offering = %resource, "offering refused");
        return false;
    }
    session.remove_resource(resource);
    session.add_companion(CompanionBond::new(id.clone()));
    journal.record(
        JournalEntry::new(
            format!("{} accepts the {resource} and joins the journey", def.name),
            LogCategory::Companion,
        )
        .highlighted(),
    );
    true
}

/// Advance every bond's neglect clock by one turn.
///
/// Companions that reach Leaving are removed from the roster in this
/// same pass. Returns the ids of the departed.
pub fn upkeep(session: &mut SessionState, journal: &mut dyn Journal) -> Vec<CompanionId> {
    let mut newly_wary = Vec::new();
    let mut departed = Vec::new();

    for bond in session.companions_mut() {
        let before = bond.phase;
        let after = bond.upkeep_turn();
        if before != after {
            match after {
                LoyaltyPhase::Wary => newly_wary.push(bond.id.clone()),
                LoyaltyPhase::Leaving => departed.push(bond.id.clone()),
                LoyaltyPhase::Loyal => {}
            }
        }
    }

    for id in &newly_wary {
        journal.record(JournalEntry::new(
            format!("{id} grows wary of the neglect"),
            LogCategory::Companion,
        ));
    }
    for id in &departed {
        session.remove_companion(id);
        journal.record(
            JournalEntry::new(format!("{id} slips away into the wild"), LogCategory::Companion)
                .highlighted(),
        );
    }
    departed
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::CompanionDef;
    use crate::core::LandscapeId;
    use crate::journal::MemoryJournal;

    fn fixture() -> (SessionState, Catalog, MemoryJournal) {
        let mut catalog = Catalog::new();
        catalog.register_companion(
            CompanionDef::new("fox", "Fox")
                .with_preferred("food")
                .with_preferred("trinket_bone"),
        );
        let session = SessionState::new(vec![LandscapeId::new("river_ford")]);
        (session, catalog, MemoryJournal::new())
    }

    #[test]
    fn test_bond_with_preferred_kind() {
        let (mut session, catalog, journal) = fixture();
        let mut j = journal.clone();
        session.add_resource(ResourceId::new("food_berries"));

        assert!(bond_companion(
            &mut session,
            &catalog,
            &CompanionId::new("fox"),
            &ResourceId::new("food_berries"),
            &mut j,
        ));
        assert!(session.companion(&CompanionId::new("fox")).is_some());
        // The offering is consumed.
        assert!(!session.has_resource(&ResourceId::new("food_berries")));
        assert!(journal.contains_message("joins the journey"));
    }

    #[test]
    fn test_bond_rejects_unsuitable_offering() {
        let (mut session, catalog, mut journal) = fixture();
        session.add_resource(ResourceId::new("stone_flint"));

        assert!(!bond_companion(
            &mut session,
            &catalog,
            &CompanionId::new("fox"),
            &ResourceId::new("stone_flint"),
            &mut journal,
        ));
        assert!(session.companion(&CompanionId::new("fox")).is_none());
        // Refused offerings are not consumed.
        assert!(session.has_resource(&ResourceId::new("stone_flint")));
    }

    #[test]
    fn test_bond_rejects_missing_offering_and_unknown_companion() {
        let (mut session, catalog, mut journal) = fixture();

        assert!(!bond_companion(
            &mut session,
            &catalog,
            &CompanionId::new("fox"),
            &ResourceId::new("food_berries"),
            &mut journal,
        ));
        assert!(!bond_companion(
            &mut session,
            &catalog,
            &CompanionId::new("unicorn"),
            &ResourceId::new("food_berries"),
            &mut journal,
        ));
    }

    #[test]
    fn test_bond_rejects_double_bonding() {
        let (mut session, catalog, mut journal) = fixture();
        session.add_resource(ResourceId::new("food_berries"));
        session.add_resource(ResourceId::new("food_berries"));

        let fox = CompanionId::new("fox");
        let berries = ResourceId::new("food_berries");
        assert!(bond_companion(&mut session, &catalog, &fox, &berries, &mut journal));
        assert!(!bond_companion(&mut session, &catalog, &fox, &berries, &mut journal));
    }

    #[test]
    fn test_feed_unknown_or_unprovisioned_fails() {
        let (mut session, catalog, mut journal) = fixture();
        session.add_resource(ResourceId::new("food_berries"));
        let fox = CompanionId::new("fox");

        // Not bonded yet.
        assert!(!feed_companion(
            &mut session,
            &fox,
            &ResourceId::new("food_berries"),
            &mut journal
        ));

        bond_companion(&mut session, &catalog, &fox, &ResourceId::new("food_berries"), &mut journal);
        // Resource was consumed by bonding; nothing left to feed.
        assert!(!feed_companion(
            &mut session,
            &fox,
            &ResourceId::new("food_berries"),
            &mut journal
        ));
    }

    #[test]
    fn test_neglect_five_turns_removes_companion() {
        let (mut session, catalog, journal) = fixture();
        let mut j = journal.clone();
        session.add_resource(ResourceId::new("food_berries"));
        let fox = CompanionId::new("fox");
        bond_companion(&mut session, &catalog, &fox, &ResourceId::new("food_berries"), &mut j);

        for turn in 1..=4 {
            let departed = upkeep(&mut session, &mut j);
            assert!(departed.is_empty(), "left too early on turn {turn}");
        }
        let departed = upkeep(&mut session, &mut j);
        assert_eq!(departed, vec![fox.clone()]);
        assert!(session.companion(&fox).is_none());
        assert!(journal.contains_message("slips away"));
    }

    #[test]
    fn test_feeding_interrupts_neglect() {
        let (mut session, catalog, mut journal) = fixture();
        session.add_resource(ResourceId::new("food_berries"));
        session.add_resource(ResourceId::new("food_nuts"));
        let fox = CompanionId::new("fox");
        bond_companion(&mut session, &catalog, &fox, &ResourceId::new("food_berries"), &mut journal);

        for _ in 0..3 {
            upkeep(&mut session, &mut journal);
        }
        assert_eq!(session.companion(&fox).unwrap().phase, LoyaltyPhase::Wary);

        assert!(feed_companion(
            &mut session,
            &fox,
            &ResourceId::new("food_nuts"),
            &mut journal
        ));
        let bond = session.companion(&fox).unwrap();
        assert_eq!(bond.phase, LoyaltyPhase::Loyal);
        assert_eq!(bond.turns_wary, 0);

        // The clock restarted; two more unfed turns stay Loyal.
        upkeep(&mut session, &mut journal);
        upkeep(&mut session, &mut journal);
        assert_eq!(session.companion(&fox).unwrap().phase, LoyaltyPhase::Loyal);
    }
}
