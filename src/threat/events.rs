//! Threat event tables and ongoing effects.
//!
//! Events are fixed, data-only tables; which tiers are eligible widens
//! monotonically with the derived threat level. A drawn event either
//! applies immediately (duration 0) or attaches an [`OngoingEffect`]
//! that the seasonal assessment ticks down each turn.

use serde::{Deserialize, Serialize};

use crate::core::SessionState;
use crate::dice::DicePool;
use crate::journal::{Journal, JournalEntry, LogCategory};

/// Severity tier of a threat event.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EventTier {
    Minor,
    Moderate,
    Major,
}

/// What a threat event does when it manifests.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum ThreatEventKind {
    ResourceLoss,
    HealthLoss,
    DifficultyIncrease,
    CompanionEffect,
    LandscapeEffect,
    SeasonalShift,
}

/// One entry in the threat event tables.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ThreatEvent {
    pub name: &'static str,
    pub tier: EventTier,
    pub kind: ThreatEventKind,
    pub strength: u32,
    /// 0 applies immediately; otherwise an ongoing effect of this length.
    pub duration: u32,
}

/// Minor events, eligible from threat level 1.
pub const MINOR_EVENTS: &[ThreatEvent] = &[
    ThreatEvent {
        name: "scattered supplies",
        tier: EventTier::Minor,
        kind: ThreatEventKind::ResourceLoss,
        strength: 1,
        duration: 0,
    },
    ThreatEvent {
        name: "thorn scratch",
        tier: EventTier::Minor,
        kind: ThreatEventKind::HealthLoss,
        strength: 1,
        duration: 0,
    },
    ThreatEvent {
        name: "uneasy air",
        tier: EventTier::Minor,
        kind: ThreatEventKind::DifficultyIncrease,
        strength: 1,
        duration: 1,
    },
    ThreatEvent {
        name: "skittish companions",
        tier: EventTier::Minor,
        kind: ThreatEventKind::CompanionEffect,
        strength: 1,
        duration: 0,
    },
];

/// Moderate events, eligible from threat level 2.
pub const MODERATE_EVENTS: &[ThreatEvent] = &[
    ThreatEvent {
        name: "spoiled cache",
        tier: EventTier::Moderate,
        kind: ThreatEventKind::ResourceLoss,
        strength: 2,
        duration: 0,
    },
    ThreatEvent {
        name: "night chill",
        tier: EventTier::Moderate,
        kind: ThreatEventKind::HealthLoss,
        strength: 2,
        duration: 0,
    },
    ThreatEvent {
        name: "creeping shadow",
        tier: EventTier::Moderate,
        kind: ThreatEventKind::DifficultyIncrease,
        strength: 1,
        duration: 2,
    },
    ThreatEvent {
        name: "tangled paths",
        tier: EventTier::Moderate,
        kind: ThreatEventKind::LandscapeEffect,
        strength: 1,
        duration: 1,
    },
];

/// Major events, eligible from threat level 3.
pub const MAJOR_EVENTS: &[ThreatEvent] = &[
    ThreatEvent {
        name: "ravaged stores",
        tier: EventTier::Major,
        kind: ThreatEventKind::ResourceLoss,
        strength: 3,
        duration: 0,
    },
    ThreatEvent {
        name: "wasting sickness",
        tier: EventTier::Major,
        kind: ThreatEventKind::HealthLoss,
        strength: 3,
        duration: 0,
    },
    ThreatEvent {
        name: "deep foreboding",
        tier: EventTier::Major,
        kind: ThreatEventKind::DifficultyIncrease,
        strength: 2,
        duration: 2,
    },
    ThreatEvent {
        name: "the turning wheel",
        tier: EventTier::Major,
        kind: ThreatEventKind::SeasonalShift,
        strength: 1,
        duration: 0,
    },
];

/// A lingering consequence attached to the session.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct OngoingEffect {
    pub kind: EffectKind,
    pub magnitude: i32,
    pub turns_left: u32,
    /// Where the effect came from, for the journal.
    pub source: String,
}

/// The mechanical hook of an ongoing effect.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum EffectKind {
    /// Adds to challenge difficulty while active.
    DifficultyShift,
    /// Blocks landscape movement at the turn boundary.
    TravelBlock,
    /// Skips threat events and manifestations while active.
    Prevention,
}

impl OngoingEffect {
    /// Difficulty shift of the given magnitude.
    #[must_use]
    pub fn difficulty_shift(magnitude: i32, turns: u32, source: impl Into<String>) -> Self {
        Self {
            kind: EffectKind::DifficultyShift,
            magnitude,
            turns_left: turns,
            source: source.into(),
        }
    }

    /// Travel block for the given number of turns.
    #[must_use]
    pub fn travel_block(turns: u32, source: impl Into<String>) -> Self {
        Self {
            kind: EffectKind::TravelBlock,
            magnitude: 0,
            turns_left: turns,
            source: source.into(),
        }
    }

    /// Prevention of threat events for the given number of turns.
    #[must_use]
    pub fn prevention(turns: u32, source: impl Into<String>) -> Self {
        Self {
            kind: EffectKind::Prevention,
            magnitude: 0,
            turns_left: turns,
            source: source.into(),
        }
    }
}

/// Events eligible at a threat level.
///
/// The set widens monotonically: level 1 draws minor only, level 2 adds
/// moderate, level 3 and above draws from all tiers. Level 0 draws
/// nothing.
#[must_use]
pub fn eligible_events(level: u32) -> Vec<&'static ThreatEvent> {
    let mut events = Vec::new();
    if level >= 1 {
        events.extend(MINOR_EVENTS);
    }
    if level >= 2 {
        events.extend(MODERATE_EVENTS);
    }
    if level >= 3 {
        events.extend(MAJOR_EVENTS);
    }
    events
}

/// Draw uniformly from the tiers eligible at this level.
pub fn draw_event(level: u32, dice: &mut DicePool) -> Option<&'static ThreatEvent> {
    let eligible = eligible_events(level);
    let index = dice.pick_index(eligible.len())?;
    Some(eligible[index])
}

/// Apply one threat consequence to the session.
///
/// Shared by the event tables and the otherworldly manifestations.
pub fn apply_consequence(
    name: &str,
    kind: ThreatEventKind,
    strength: u32,
    duration: u32,
    session: &mut SessionState,
    dice: &mut DicePool,
    journal: &mut dyn Journal,
) {
    match kind {
        ThreatEventKind::ResourceLoss => {
            let mut lost = Vec::new();
            for _ in 0..strength {
                let Some(index) = dice.pick_index(session.resources().len()) else {
                    break;
                };
                if let Some(resource) = session.remove_resource_at(index) {
                    lost.push(resource.to_string());
                }
            }
            journal.record(
                JournalEntry::new(format!("{name}: supplies lost"), LogCategory::Threat)
                    .with_details(lost.join(", ")),
            );
        }
        ThreatEventKind::HealthLoss => {
            session.take_damage(strength as i32);
            journal.record(JournalEntry::new(
                format!("{name}: the traveller suffers {strength} harm"),
                LogCategory::Threat,
            ));
        }
        ThreatEventKind::DifficultyIncrease => {
            if duration == 0 {
                // An instantaneous difficulty spike still lingers for the
                // turn's own resolution.
                session.add_effect(OngoingEffect::difficulty_shift(strength as i32, 1, name));
            } else {
                session.add_effect(OngoingEffect::difficulty_shift(
                    strength as i32,
                    duration,
                    name,
                ));
            }
            journal.record(JournalEntry::new(
                format!("{name}: challenges grow harder"),
                LogCategory::Threat,
            ));
        }
        ThreatEventKind::CompanionEffect => {
            let count = session.companions().len();
            if let Some(index) = dice.pick_index(count) {
                let bond = &mut session.companions_mut()[index];
                bond.shake_loyalty(strength as u8);
                let id = bond.id.clone();
                journal.record(JournalEntry::new(
                    format!("{name}: {id} is unsettled"),
                    LogCategory::Companion,
                ));
            }
        }
        ThreatEventKind::LandscapeEffect => {
            session.add_effect(OngoingEffect::travel_block(duration.max(1), name));
            journal.record(JournalEntry::new(
                format!("{name}: the way forward is barred"),
                LogCategory::Journey,
            ));
        }
        ThreatEventKind::SeasonalShift => {
            let season = session.advance_season();
            journal.record(
                JournalEntry::new(
                    format!("{name}: the season lurches to {season}"),
                    LogCategory::Season,
                )
                .highlighted(),
            );
        }
    }
}

/// Apply a drawn event.
pub fn apply_event(
    event: &ThreatEvent,
    session: &mut SessionState,
    dice: &mut DicePool,
    journal: &mut dyn Journal,
) {
    tracing::debug!(event = event.name, kind = ?event.kind, "threat event fires");
    apply_consequence(
        event.name,
        event.kind,
        event.strength,
        event.duration,
        session,
        dice,
        journal,
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{LandscapeId, ResourceId};
    use crate::journal::MemoryJournal;

    fn session() -> SessionState {
        SessionState::new(vec![LandscapeId::new("river_ford")])
    }

    #[test]
    fn test_eligibility_widens_monotonically() {
        assert!(eligible_events(0).is_empty());
        assert_eq!(eligible_events(1).len(), MINOR_EVENTS.len());
        assert_eq!(
            eligible_events(2).len(),
            MINOR_EVENTS.len() + MODERATE_EVENTS.len()
        );
        let all = MINOR_EVENTS.len() + MODERATE_EVENTS.len() + MAJOR_EVENTS.len();
        assert_eq!(eligible_events(3).len(), all);
        assert_eq!(eligible_events(7).len(), all);
    }

    #[test]
    fn test_level_one_draws_only_minor() {
        let mut dice = DicePool::seeded(42);
        for _ in 0..50 {
            let event = draw_event(1, &mut dice).unwrap();
            assert_eq!(event.tier, EventTier::Minor);
        }
    }

    #[test]
    fn test_level_zero_draws_nothing() {
        let mut dice = DicePool::seeded(42);
        assert!(draw_event(0, &mut dice).is_none());
    }

    #[test]
    fn test_resource_loss_applies() {
        let mut s = session();
        s.add_resource(ResourceId::new("food_berries"));
        s.add_resource(ResourceId::new("wood_ash"));
        let mut dice = DicePool::seeded(42);
        let mut journal = MemoryJournal::new();

        apply_consequence(
            "spoiled cache",
            ThreatEventKind::ResourceLoss,
            2,
            0,
            &mut s,
            &mut dice,
            &mut journal,
        );

        assert!(s.resources().is_empty());
        assert!(journal.contains_message("spoiled cache"));
    }

    #[test]
    fn test_resource_loss_on_empty_pack_is_noop() {
        let mut s = session();
        let mut dice = DicePool::seeded(42);
        let mut journal = MemoryJournal::new();

        apply_consequence(
            "scattered supplies",
            ThreatEventKind::ResourceLoss,
            1,
            0,
            &mut s,
            &mut dice,
            &mut journal,
        );
        assert!(s.resources().is_empty());
    }

    #[test]
    fn test_difficulty_increase_lingers() {
        let mut s = session();
        let mut dice = DicePool::seeded(42);
        let mut journal = MemoryJournal::new();

        apply_consequence(
            "creeping shadow",
            ThreatEventKind::DifficultyIncrease,
            1,
            2,
            &mut s,
            &mut dice,
            &mut journal,
        );
        assert_eq!(s.difficulty_shift(), 1);
    }

    #[test]
    fn test_seasonal_shift_advances_season() {
        let mut s = session();
        let before = s.season;
        let mut dice = DicePool::seeded(42);
        let mut journal = MemoryJournal::new();

        apply_consequence(
            "the turning wheel",
            ThreatEventKind::SeasonalShift,
            1,
            0,
            &mut s,
            &mut dice,
            &mut journal,
        );
        assert_eq!(s.season, before.next());
    }
}
