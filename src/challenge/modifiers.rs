//! Difficulty and bonus modifiers.
//!
//! Everything here is computed on demand from a snapshot of session and
//! catalog state; nothing is persisted between resolutions. The
//! [`BonusBreakdown`] itemizes each contribution by source, which both
//! feeds the journal and keeps the "no source contributes twice"
//! invariant visible.

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::category::ChallengeKind;
use crate::catalog::Catalog;
use crate::core::{CompanionId, ItemId, Season, SessionState};

/// Fixed seasonal difficulty table.
///
/// Values are drawn from {-1, 0, +1, +2}; unlisted pairs default to 0.
/// Agility uses the Physical row.
#[must_use]
pub fn seasonal_modifier(kind: ChallengeKind, season: Season) -> i32 {
    use ChallengeKind::{Mental, Physical, Social, Spiritual};
    use Season::{Beltane, Imbolc, Lughnasadh, Samhain};

    match (kind.canonical(), season) {
        (Physical, Imbolc) => 1,
        (Physical, Beltane) => -1,
        (Physical, Samhain) => 2,
        (Mental, Lughnasadh) => 1,
        (Mental, Samhain) => 1,
        (Spiritual, Imbolc) => -1,
        (Spiritual, Samhain) => 2,
        (Social, Beltane) => -1,
        (Social, Lughnasadh) => 1,
        (Social, Samhain) => 1,
        _ => 0,
    }
}

/// Where one bonus contribution came from.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum BonusSource {
    Character,
    Item(ItemId),
    Companion(CompanionId),
    /// A companion's season-specific affinity, separate from its flat
    /// bonus so both can appear without double-counting either.
    CompanionSeason(CompanionId),
    Blessing,
}

/// Itemized player bonus for one resolution.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct BonusBreakdown {
    entries: SmallVec<[(BonusSource, i32); 8]>,
}

impl BonusBreakdown {
    /// Add a contribution; zero amounts are dropped.
    pub fn push(&mut self, source: BonusSource, amount: i32) {
        if amount != 0 {
            self.entries.push((source, amount));
        }
    }

    /// Sum of all contributions.
    #[must_use]
    pub fn total(&self) -> i32 {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }

    /// Iterate over the contributions.
    pub fn iter(&self) -> impl Iterator<Item = &(BonusSource, i32)> {
        self.entries.iter()
    }

    /// Human-readable summary for the journal.
    #[must_use]
    pub fn describe(&self) -> String {
        if self.entries.is_empty() {
            return "no bonuses".to_string();
        }
        self.entries
            .iter()
            .map(|(source, amount)| {
                let label = match source {
                    BonusSource::Character => "character".to_string(),
                    BonusSource::Item(id) => id.to_string(),
                    BonusSource::Companion(id) => id.to_string(),
                    BonusSource::CompanionSeason(id) => format!("{id} (season)"),
                    BonusSource::Blessing => "blessings".to_string(),
                };
                format!("{label} {amount:+}")
            })
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Gather the player's bonus for a category from one state snapshot.
///
/// Each source is consulted exactly once: the character, each equipped
/// item, each bonded companion that has not decided to leave (flat and
/// seasonal affinity), and the banked blessing tokens.
#[must_use]
pub fn gather_bonus(
    kind: ChallengeKind,
    session: &SessionState,
    catalog: &Catalog,
) -> BonusBreakdown {
    let mut breakdown = BonusBreakdown::default();

    if let Some(character) = session
        .character
        .as_ref()
        .and_then(|id| catalog.character(id))
    {
        breakdown.push(BonusSource::Character, character.flat_bonus(kind));
    }

    for item_id in session.equipped() {
        if let Some(item) = catalog.item(item_id) {
            breakdown.push(BonusSource::Item(item_id.clone()), item.flat_bonus(kind));
        }
    }

    for bond in session.companions() {
        if !bond.contributes() {
            continue;
        }
        if let Some(companion) = catalog.companion(&bond.id) {
            breakdown.push(
                BonusSource::Companion(bond.id.clone()),
                companion.flat_bonus(kind),
            );
            breakdown.push(
                BonusSource::CompanionSeason(bond.id.clone()),
                companion.seasonal_bonus(kind, session.season),
            );
        }
    }

    let blessings = session.blessing_tokens();
    breakdown.push(BonusSource::Blessing, blessings as i32);

    breakdown
}
