//! Ways to push the threat back.
//!
//! All mitigations flow through the capped removal path on
//! [`crate::threat::ThreatState`], so the 3-per-turn budget applies no
//! matter how the reduction was earned. Exhausted limits are journaled,
//! never raised as errors.

use crate::catalog::SiteBlessing;
use crate::core::{ResourceId, SessionState};
use crate::dice::DicePool;
use crate::journal::{Journal, JournalEntry, LogCategory};
use crate::threat::OngoingEffect;

/// Consumable that removes one threat token.
pub const CALMING_RESOURCE: &str = "charm_silver";

/// Consumable that wards the next threat accumulation.
pub const WARDING_RESOURCE: &str = "herb_rowan";

/// Apply a sacred site's blessing on arrival.
///
/// Returns the number of tokens actually removed.
pub fn visit_sacred_site(
    session: &mut SessionState,
    blessing: SiteBlessing,
    dice: &mut DicePool,
    journal: &mut dyn Journal,
) -> u32 {
    let amount = match blessing {
        SiteBlessing::Rolled => dice.roll_die(3),
        SiteBlessing::Flat(n) => n,
    };
    let reduction = session.threat.remove_tokens(amount);
    if reduction.truncated > 0 {
        journal.record(JournalEntry::new(
            format!(
                "the sacred site calms {} threat; {} is beyond this turn's reach",
                reduction.removed, reduction.truncated
            ),
            LogCategory::Threat,
        ));
    } else {
        journal.record(JournalEntry::new(
            format!("the sacred site calms {} threat", reduction.removed),
            LogCategory::Threat,
        ));
    }
    reduction.removed
}

/// Consume the calming charm to remove one threat token.
///
/// Fails (returns false) when the charm is not held.
pub fn use_calming_charm(session: &mut SessionState, journal: &mut dyn Journal) -> bool {
    let charm = ResourceId::new(CALMING_RESOURCE);
    if !session.remove_resource(&charm) {
        return false;
    }
    let reduction = session.threat.remove_tokens(1);
    journal.record(JournalEntry::new(
        if reduction.removed > 0 {
            format!("the silver charm draws off {} threat", reduction.removed)
        } else {
            "the silver charm is spent, but this turn can bear no more calming".to_string()
        },
        LogCategory::Threat,
    ));
    true
}

/// Consume the warding herb to absorb the next threat accumulation.
///
/// Fails (returns false) when the herb is not held or a ward is already
/// pending.
pub fn use_warding_herb(session: &mut SessionState, journal: &mut dyn Journal) -> bool {
    let herb = ResourceId::new(WARDING_RESOURCE);
    if session.threat.is_warded() || !session.has_resource(&herb) {
        return false;
    }
    session.remove_resource(&herb);
    session.threat.arm_ward();
    journal.record(JournalEntry::new(
        "burnt rowan wards off the next gathering of threat",
        LogCategory::Threat,
    ));
    true
}

/// Perform the once-per-season calming ritual.
///
/// Removes a season-dependent 1-3 tokens and shelters the rest of the
/// turn from threat events. Returns `None`, with a journal entry, when
/// the ritual was already performed this season.
pub fn seasonal_ritual(session: &mut SessionState, journal: &mut dyn Journal) -> Option<u32> {
    if !session.threat.use_ritual() {
        journal.record(JournalEntry::new(
            "the ritual has already been performed this season",
            LogCategory::Threat,
        ));
        return None;
    }
    let season = session.season;
    let reduction = session.threat.remove_tokens(season.ritual_reduction());
    session.add_effect(OngoingEffect::prevention(1, "calming ritual"));
    journal.record(
        JournalEntry::new(
            format!(
                "the {season} ritual calms {} threat and stills the land",
                reduction.removed
            ),
            LogCategory::Threat,
        )
        .highlighted(),
    );
    Some(reduction.removed)
}
