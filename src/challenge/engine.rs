//! The challenge resolution engine.
//!
//! `resolve` is the heart of the rules: it snapshots the session,
//! derives difficulty and bonus, rolls a single d8, classifies the
//! result, and applies side effects. Category-specific behavior lives in
//! a table of pure function bundles rather than trait objects - the
//! categories are closed, so a lookup table keeps dispatch flat and the
//! bundles testable in isolation.
//!
//! The snapshot is taken in full before the die is rolled; no modifier
//! can observe the roll it is modifying.

use crate::catalog::{Catalog, ChallengeSpec};
use crate::core::{ResourceId, SessionState};
use crate::dice::DicePool;
use crate::journal::{Journal, JournalEntry, LogCategory};

use super::category::ChallengeKind;
use super::modifiers::{gather_bonus, seasonal_modifier, BonusBreakdown};
use super::outcome::{classify, ChallengeOutcome, OutcomeTier};

/// A consistent view of everything a resolution may consult.
#[derive(Clone, Debug)]
pub struct ResolveSnapshot {
    pub threat_level: u32,
    pub seasonal_modifier: i32,
    /// Net shift from active difficulty effects.
    pub difficulty_shift: i32,
    pub breakdown: BonusBreakdown,
}

impl ResolveSnapshot {
    /// Capture the snapshot for one resolution.
    #[must_use]
    pub fn capture(spec: &ChallengeSpec, session: &SessionState, catalog: &Catalog) -> Self {
        Self {
            threat_level: session.threat.level(),
            seasonal_modifier: seasonal_modifier(spec.kind, session.season),
            difficulty_shift: session.difficulty_shift(),
            breakdown: gather_bonus(spec.kind, session, catalog),
        }
    }
}

/// Pure function bundle for one challenge category.
pub struct Strategy {
    pub difficulty: fn(&ChallengeSpec, &ResolveSnapshot) -> i32,
    pub bonus: fn(&ResolveSnapshot) -> i32,
    pub aftermath: fn(&ChallengeSpec, &ChallengeOutcome, &mut SessionState, &mut dyn Journal),
}

fn standard_difficulty(spec: &ChallengeSpec, snapshot: &ResolveSnapshot) -> i32 {
    spec.base_difficulty as i32
        + snapshot.seasonal_modifier
        + snapshot.threat_level as i32
        + snapshot.difficulty_shift
}

fn standard_bonus(snapshot: &ResolveSnapshot) -> i32 {
    snapshot.breakdown.total()
}

fn grant_reward(
    spec: &ChallengeSpec,
    default: &str,
    count: u32,
    session: &mut SessionState,
    journal: &mut dyn Journal,
) {
    let reward = spec
        .reward
        .clone()
        .unwrap_or_else(|| ResourceId::new(default));
    let mut granted = 0;
    for _ in 0..count {
        if !session.add_resource(reward.clone()) {
            journal.record(JournalEntry::new(
                format!("the pack is too full to carry more {reward}"),
                LogCategory::Resource,
            ));
            break;
        }
        granted += 1;
    }
    if granted > 0 {
        journal.record(JournalEntry::new(
            format!("gained {granted} {reward}"),
            LogCategory::Resource,
        ));
    }
}

fn physical_aftermath(
    spec: &ChallengeSpec,
    outcome: &ChallengeOutcome,
    session: &mut SessionState,
    journal: &mut dyn Journal,
) {
    match outcome.tier {
        OutcomeTier::Success => grant_reward(spec, "food_forage", 2, session, journal),
        OutcomeTier::PartialSuccess => grant_reward(spec, "food_forage", 1, session, journal),
        OutcomeTier::Failure => {}
    }
}

fn mental_aftermath(
    spec: &ChallengeSpec,
    outcome: &ChallengeOutcome,
    session: &mut SessionState,
    journal: &mut dyn Journal,
) {
    if outcome.succeeded() {
        grant_reward(spec, "lore_fragment", 1, session, journal);
    }
}

fn spiritual_aftermath(
    spec: &ChallengeSpec,
    outcome: &ChallengeOutcome,
    session: &mut SessionState,
    journal: &mut dyn Journal,
) {
    if outcome.succeeded() {
        grant_reward(spec, "herb_rowan", 1, session, journal);
    }
    // A full spiritual success also quiets the land, inside the usual
    // per-turn reduction cap.
    if outcome.tier == OutcomeTier::Success {
        let reduction = session.threat.remove_tokens(1);
        if reduction.removed > 0 {
            journal.record(JournalEntry::new(
                "the rite eases the land's unrest",
                LogCategory::Threat,
            ));
        }
    }
}

fn social_aftermath(
    spec: &ChallengeSpec,
    outcome: &ChallengeOutcome,
    session: &mut SessionState,
    journal: &mut dyn Journal,
) {
    if outcome.succeeded() {
        grant_reward(spec, "favor_token", 1, session, journal);
    }
}

static PHYSICAL: Strategy = Strategy {
    difficulty: standard_difficulty,
    bonus: standard_bonus,
    aftermath: physical_aftermath,
};
static MENTAL: Strategy = Strategy {
    difficulty: standard_difficulty,
    bonus: standard_bonus,
    aftermath: mental_aftermath,
};
static SPIRITUAL: Strategy = Strategy {
    difficulty: standard_difficulty,
    bonus: standard_bonus,
    aftermath: spiritual_aftermath,
};
static SOCIAL: Strategy = Strategy {
    difficulty: standard_difficulty,
    bonus: standard_bonus,
    aftermath: social_aftermath,
};

/// Look up the rules bundle for a category. Agility resolves to the
/// Physical bundle via [`ChallengeKind::canonical`].
#[must_use]
pub fn strategy_for(kind: ChallengeKind) -> &'static Strategy {
    match kind.canonical() {
        ChallengeKind::Physical => &PHYSICAL,
        ChallengeKind::Mental => &MENTAL,
        ChallengeKind::Spiritual => &SPIRITUAL,
        ChallengeKind::Social => &SOCIAL,
        // canonical() never returns Agility.
        ChallengeKind::Agility => &PHYSICAL,
    }
}

/// The challenge resolution engine.
///
/// Holds no rules state of its own beyond the most recent outcome.
#[derive(Clone, Debug, Default)]
pub struct ChallengeEngine {
    last: Option<ChallengeOutcome>,
}

impl ChallengeEngine {
    /// Create an engine with no history.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resolve one challenge attempt.
    ///
    /// Difficulty and bonus come from a snapshot taken before the roll.
    /// Blessing tokens counted in the bonus are spent by this
    /// resolution. Exceptional results feed the blessing bank or the
    /// threat accumulator; category aftermath extends (never alters) the
    /// classification.
    pub fn resolve(
        &mut self,
        spec: &ChallengeSpec,
        session: &mut SessionState,
        catalog: &Catalog,
        dice: &mut DicePool,
        journal: &mut dyn Journal,
    ) -> ChallengeOutcome {
        let strategy = strategy_for(spec.kind);
        let snapshot = ResolveSnapshot::capture(spec, session, catalog);
        let difficulty = (strategy.difficulty)(spec, &snapshot);
        let bonus_total = (strategy.bonus)(&snapshot);

        let spent = session.spend_blessings();
        if spent > 0 {
            journal.record(JournalEntry::new(
                format!("{spent} blessing spent on the attempt"),
                LogCategory::Challenge,
            ));
        }

        let roll = dice.roll_d8();
        let total = roll as i32 + bonus_total;
        let (tier, exceptional) = classify(roll, total, difficulty);

        let outcome = ChallengeOutcome {
            challenge: spec.id.clone(),
            kind: spec.kind,
            tier,
            exceptional,
            roll,
            bonus_total,
            total,
            difficulty,
        };

        tracing::debug!(
            challenge = %spec.id,
            roll,
            total,
            difficulty,
            tier = ?tier,
            exceptional,
            "challenge resolved"
        );

        let verdict = match (tier, exceptional) {
            (OutcomeTier::Success, true) => "an exceptional success",
            (OutcomeTier::Success, false) => "a success",
            (OutcomeTier::PartialSuccess, _) => "a partial success",
            (OutcomeTier::Failure, true) => "a dire failure",
            (OutcomeTier::Failure, false) => "a failure",
        };
        journal.record(
            JournalEntry::new(
                format!(
                    "{}: rolled {roll}, total {total} against {difficulty} - {verdict}",
                    spec.name
                ),
                LogCategory::Challenge,
            )
            .with_details(snapshot.breakdown.describe()),
        );

        if tier == OutcomeTier::Success {
            session.experience += 1;
        }
        if exceptional && tier == OutcomeTier::Success {
            session.gain_blessing();
            journal.record(JournalEntry::new(
                "a blessing is banked",
                LogCategory::Challenge,
            ));
        }
        if exceptional && tier == OutcomeTier::Failure {
            let gain = session.threat.add_tokens(1);
            journal.record(JournalEntry::new(
                if gain.warded {
                    "the failure stirs the land, but the ward holds".to_string()
                } else {
                    format!("the failure stirs the land: threat rises to {}", gain.total)
                },
                LogCategory::Threat,
            ));
        }

        (strategy.aftermath)(spec, &outcome, session, journal);

        self.last = Some(outcome.clone());
        outcome
    }

    /// The most recent outcome, if any resolution has happened.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&ChallengeOutcome> {
        self.last.as_ref()
    }
}
