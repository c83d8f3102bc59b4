//! Otherworldly manifestations.
//!
//! Two mechanisms live here. The per-turn **gate** attempts a threat
//! event with probability `0.15 x threat level` (never at level 0).
//! Separately, once the accumulator reaches [`OTHERWORLDLY_THRESHOLD`]
//! tokens, every end-of-turn pass deterministically consults the fixed
//! 8-entry otherworldly table, indexed 1-based by a fresh d8.

use serde::Serialize;

use super::events::{apply_consequence, ThreatEventKind};
use crate::core::SessionState;
use crate::dice::DicePool;
use crate::journal::{Journal, JournalEntry, LogCategory};

/// Token count at which the otherworldly table is consulted.
pub const OTHERWORLDLY_THRESHOLD: u32 = 10;

/// Probability multiplier per threat level for the event gate.
pub const GATE_CHANCE_PER_LEVEL: f64 = 0.15;

/// One entry of the otherworldly table.
#[derive(Clone, Copy, Debug, Serialize)]
pub struct Manifestation {
    pub name: &'static str,
    pub kind: ThreatEventKind,
    pub strength: u32,
    pub duration: u32,
    /// The major entry also forces the season onward.
    pub shifts_season: bool,
}

/// The fixed otherworldly table; a d8 roll selects the 1-based entry.
pub const OTHERWORLDLY_TABLE: [Manifestation; 8] = [
    Manifestation {
        name: "whisper of the veil",
        kind: ThreatEventKind::DifficultyIncrease,
        strength: 1,
        duration: 1,
        shifts_season: false,
    },
    Manifestation {
        name: "hungry shades",
        kind: ThreatEventKind::ResourceLoss,
        strength: 2,
        duration: 0,
        shifts_season: false,
    },
    Manifestation {
        name: "a cold hand",
        kind: ThreatEventKind::HealthLoss,
        strength: 2,
        duration: 0,
        shifts_season: false,
    },
    Manifestation {
        name: "forgotten names",
        kind: ThreatEventKind::CompanionEffect,
        strength: 2,
        duration: 0,
        shifts_season: false,
    },
    Manifestation {
        name: "walls of mist",
        kind: ThreatEventKind::LandscapeEffect,
        strength: 1,
        duration: 1,
        shifts_season: false,
    },
    Manifestation {
        name: "the bleeding sky",
        kind: ThreatEventKind::HealthLoss,
        strength: 3,
        duration: 0,
        shifts_season: false,
    },
    Manifestation {
        name: "the wild hunt",
        kind: ThreatEventKind::ResourceLoss,
        strength: 3,
        duration: 0,
        shifts_season: false,
    },
    Manifestation {
        name: "the wheel turns against you",
        kind: ThreatEventKind::SeasonalShift,
        strength: 1,
        duration: 0,
        shifts_season: true,
    },
];

/// Chance that the event gate opens at a threat level.
#[must_use]
pub fn gate_probability(level: u32) -> f64 {
    (GATE_CHANCE_PER_LEVEL * f64::from(level)).min(1.0)
}

/// Consult the otherworldly table with a fresh d8.
///
/// Returns the roll and the selected entry.
pub fn draw_otherworldly(dice: &mut DicePool) -> (u32, &'static Manifestation) {
    let roll = dice.roll_d8();
    (roll, &OTHERWORLDLY_TABLE[(roll - 1) as usize])
}

/// Apply an otherworldly manifestation to the session.
pub fn apply_manifestation(
    manifestation: &Manifestation,
    session: &mut SessionState,
    dice: &mut DicePool,
    journal: &mut dyn Journal,
) {
    tracing::debug!(name = manifestation.name, "otherworldly manifestation");
    journal.record(
        JournalEntry::new(
            format!("an otherworldly manifestation: {}", manifestation.name),
            LogCategory::Threat,
        )
        .highlighted(),
    );
    apply_consequence(
        manifestation.name,
        manifestation.kind,
        manifestation.strength,
        manifestation.duration,
        session,
        dice,
        journal,
    );
    // SeasonalShift entries already advanced the wheel above.
    if manifestation.shifts_season && manifestation.kind != ThreatEventKind::SeasonalShift {
        let season = session.advance_season();
        journal.record(
            JournalEntry::new(format!("the season is forced to {season}"), LogCategory::Season)
                .highlighted(),
        );
    }
}
