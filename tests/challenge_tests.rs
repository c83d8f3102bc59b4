//! Challenge resolution integration tests.
//!
//! These exercise the full resolution path - catalog, session, bonus
//! gathering, seasonal table, classification, aftermath - with scripted
//! rolls, the way a scenario would play out.

use everwild::catalog::{Catalog, ChallengeSpec, CharacterDef, CompanionDef, ItemDef};
use everwild::challenge::{ChallengeEngine, ChallengeKind, OutcomeTier};
use everwild::companions::CompanionBond;
use everwild::core::{CharacterId, CompanionId, ItemId, LandscapeId, ResourceId, Season, SessionState};
use everwild::dice::DicePool;
use everwild::journal::MemoryJournal;

fn session() -> SessionState {
    SessionState::new(vec![LandscapeId::new("river_ford")])
}

/// A base-6 Physical challenge in Samhain (+2) with no bonuses and a
/// roll of 7 lands exactly one short: a partial success.
#[test]
fn test_samhain_physical_one_short_is_partial() {
    let catalog = Catalog::new();
    let mut session = session().with_season(Season::Samhain);
    let mut engine = ChallengeEngine::new();
    let mut dice = DicePool::seeded(1);
    dice.force_rolls([7]);
    let mut journal = MemoryJournal::new();

    let spec = ChallengeSpec::new("moor_crossing", "Crossing the Moor", ChallengeKind::Physical, 6);
    let outcome = engine.resolve(&spec, &mut session, &catalog, &mut dice, &mut journal);

    assert_eq!(outcome.difficulty, 8);
    assert_eq!(outcome.total, 7);
    assert_eq!(outcome.tier, OutcomeTier::PartialSuccess);
    assert!(!outcome.exceptional);
}

/// Every bonus source stacks once and the itemized breakdown reaches
/// the journal.
#[test]
fn test_full_bonus_stack() {
    let mut catalog = Catalog::new();
    catalog.register_character(
        CharacterDef::new("warden", "The Warden").with_bonus(ChallengeKind::Physical, 2),
    );
    catalog.register_item(
        ItemDef::new("oak_staff", "Oak Staff").with_bonus(ChallengeKind::Physical, 1),
    );
    catalog.register_companion(
        CompanionDef::new("wolf", "Wolf")
            .with_bonus(ChallengeKind::Physical, 1)
            .with_season_bonus(ChallengeKind::Physical, Season::Samhain, 1),
    );

    let mut session = session().with_season(Season::Samhain);
    session.character = Some(CharacterId::new("warden"));
    session.equip(ItemId::new("oak_staff"));
    session.add_companion(CompanionBond::new(CompanionId::new("wolf")));
    session.gain_blessing();

    let mut engine = ChallengeEngine::new();
    let mut dice = DicePool::seeded(1);
    dice.force_rolls([2]);
    let journal = MemoryJournal::new();
    let mut writer = journal.clone();

    let spec = ChallengeSpec::new("moor_crossing", "Crossing the Moor", ChallengeKind::Physical, 6);
    let outcome = engine.resolve(&spec, &mut session, &catalog, &mut dice, &mut writer);

    // character 2 + staff 1 + wolf 1 + wolf/Samhain 1 + blessing 1 = 6
    assert_eq!(outcome.bonus_total, 6);
    // roll 2 + 6 = 8 meets difficulty 8 exactly: a plain success.
    assert_eq!(outcome.tier, OutcomeTier::Success);
    assert!(!outcome.exceptional);
    // The blessing was consumed by the attempt.
    assert_eq!(session.blessing_tokens(), 0);
    assert!(journal.contains_message("a success"));
}

/// A natural 8 succeeds exceptionally no matter how impossible the
/// challenge, and banks a blessing for later.
#[test]
fn test_natural_eight_against_impossible_odds() {
    let catalog = Catalog::new();
    let mut session = session().with_season(Season::Samhain);
    session.threat.add_tokens(9); // level 3

    let mut engine = ChallengeEngine::new();
    let mut dice = DicePool::seeded(1);
    dice.force_rolls([8]);
    let mut journal = MemoryJournal::new();

    let spec = ChallengeSpec::new("impossible", "The Impossible Climb", ChallengeKind::Physical, 20);
    let outcome = engine.resolve(&spec, &mut session, &catalog, &mut dice, &mut journal);

    assert_eq!(outcome.tier, OutcomeTier::Success);
    assert!(outcome.exceptional);
    assert_eq!(session.blessing_tokens(), 1);
    assert_eq!(session.experience, 1);
}

/// An exceptional failure feeds the threat accumulator; a pending ward
/// absorbs it instead.
#[test]
fn test_exceptional_failure_respects_ward() {
    let catalog = Catalog::new();
    let mut session = session().with_season(Season::Lughnasadh);
    let mut engine = ChallengeEngine::new();
    let mut dice = DicePool::seeded(1);
    dice.force_rolls([1, 1]);
    let journal = MemoryJournal::new();
    let mut writer = journal.clone();

    let spec = ChallengeSpec::new("deep_ford", "The Deep Ford", ChallengeKind::Physical, 7);
    let outcome = engine.resolve(&spec, &mut session, &catalog, &mut dice, &mut writer);
    assert_eq!(outcome.tier, OutcomeTier::Failure);
    assert!(outcome.exceptional);
    assert_eq!(session.threat.tokens(), 1);

    session.threat.arm_ward();
    engine.resolve(&spec, &mut session, &catalog, &mut dice, &mut writer);
    assert_eq!(session.threat.tokens(), 1);
    assert!(journal.contains_message("the ward holds"));
}

/// Challenge rewards honor the explicit reward hint over the category
/// default.
#[test]
fn test_reward_hint_overrides_default() {
    let catalog = Catalog::new();
    let mut session = session().with_season(Season::Lughnasadh);
    let mut engine = ChallengeEngine::new();
    let mut dice = DicePool::seeded(1);
    dice.force_rolls([6]);
    let mut journal = MemoryJournal::new();

    let spec = ChallengeSpec::new("berry_thicket", "The Berry Thicket", ChallengeKind::Physical, 4)
        .with_reward("food_berries");
    engine.resolve(&spec, &mut session, &catalog, &mut dice, &mut journal);

    assert_eq!(session.resource_count(&ResourceId::new("food_berries")), 2);
    assert_eq!(session.resource_count(&ResourceId::new("food_forage")), 0);
}

/// Difficulty shifts from threat events raise the bar until they expire.
#[test]
fn test_active_difficulty_shift_counts() {
    use everwild::threat::OngoingEffect;

    let catalog = Catalog::new();
    let mut session = session().with_season(Season::Lughnasadh);
    session.add_effect(OngoingEffect::difficulty_shift(2, 1, "deep foreboding"));

    let mut engine = ChallengeEngine::new();
    let mut dice = DicePool::seeded(1);
    dice.force_rolls([5]);
    let mut journal = MemoryJournal::new();

    let spec = ChallengeSpec::new("ford", "The Ford", ChallengeKind::Physical, 4);
    let outcome = engine.resolve(&spec, &mut session, &catalog, &mut dice, &mut journal);

    assert_eq!(outcome.difficulty, 6);
    // 5 against 6: one short, partial.
    assert_eq!(outcome.tier, OutcomeTier::PartialSuccess);
}
