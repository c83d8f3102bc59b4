//! The turn-phase controller.
//!
//! One controller owns the whole game: the catalog, the session, the
//! dice, the resolution engine, the journal, and the evaluator. Callers
//! drive it with [`TurnController::advance`] and the facade methods;
//! every rule fires from here in a fixed order.
//!
//! The cycle is advanced one phase at a time. Leaving `Exploration`
//! (or `CharacterSelection`, for the first turn) crosses the turn
//! boundary: verdict check, movement, seasonal progression, and the
//! otherworldly table all happen there, before the next turn's
//! `SeasonalAssessment` begins.

use thiserror::Error;

use crate::catalog::Catalog;
use crate::challenge::{ChallengeEngine, ChallengeOutcome};
use crate::companions;
use crate::core::{
    ChallengeId, CharacterId, CompanionId, ItemId, LandscapeId, ResourceId, SessionState,
};
use crate::dice::DicePool;
use crate::journal::{Journal, JournalEntry, LogCategory, NullJournal};
use crate::threat::{
    self, draw_event, draw_otherworldly, gate_probability, OTHERWORLDLY_THRESHOLD,
};

use super::crafting;
use super::phase::TurnPhase;
use super::verdict::{DefeatCause, JourneyEvaluator, StandardEvaluator, Verdict};

/// Why an `advance` call could not proceed.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum AdvanceError {
    /// The next phase refuses entry in the current state.
    #[error("cannot enter the {0} phase")]
    Blocked(TurnPhase),
    /// The journey is already decided.
    #[error("the journey is over")]
    Completed,
}

/// Drives a session through the turn-phase cycle.
pub struct TurnController {
    catalog: Catalog,
    session: SessionState,
    dice: DicePool,
    engine: ChallengeEngine,
    journal: Box<dyn Journal>,
    evaluator: Box<dyn JourneyEvaluator>,
    /// Challenge staged by `LandscapeChallenge` for `ChallengeResolution`.
    pending_challenge: Option<ChallengeId>,
}

impl TurnController {
    /// Create a controller at the `Setup` phase of a journey.
    ///
    /// The traveller has not yet entered the first landscape; that
    /// happens when the first turn begins.
    #[must_use]
    pub fn new(catalog: Catalog, journey: Vec<LandscapeId>, dice: DicePool) -> Self {
        Self {
            catalog,
            session: SessionState::new(journey),
            dice,
            engine: ChallengeEngine::new(),
            journal: Box::new(NullJournal),
            evaluator: Box::new(StandardEvaluator::default()),
            pending_challenge: None,
        }
    }

    /// Replace the journal. Intended for use before the first advance.
    #[must_use]
    pub fn with_journal(mut self, journal: impl Journal + 'static) -> Self {
        self.journal = Box::new(journal);
        self
    }

    /// Replace the verdict evaluator.
    #[must_use]
    pub fn with_evaluator(mut self, evaluator: impl JourneyEvaluator + 'static) -> Self {
        self.evaluator = Box::new(evaluator);
        self
    }

    /// Replace the starting session wholesale (scenario setup).
    #[must_use]
    pub fn with_session(mut self, session: SessionState) -> Self {
        self.session = session;
        self
    }

    // === Phase machinery ===

    /// The phase the session currently occupies.
    #[must_use]
    pub fn current_phase(&self) -> TurnPhase {
        self.session.phase
    }

    /// Advance one phase, running the entered phase's automatic work.
    ///
    /// Crossing the turn boundary (out of `Exploration`, or out of
    /// `CharacterSelection` on the first turn) also runs verdict
    /// evaluation, landscape movement, seasonal progression, and the
    /// otherworldly check, and may land in `GameOver` instead of the
    /// cycle's successor.
    pub fn advance(&mut self) -> Result<TurnPhase, AdvanceError> {
        if self.session.phase.is_terminal() {
            return Err(AdvanceError::Completed);
        }
        let next = self.session.phase.successor();
        if !self.can_advance_to(next) {
            // A blocked traveller may simply be done for.
            if let Some(verdict) = self.evaluator.evaluate(&self.session) {
                return Ok(self.finish(verdict));
            }
            return Err(AdvanceError::Blocked(next));
        }

        let crossing = matches!(
            self.session.phase,
            TurnPhase::Exploration | TurnPhase::CharacterSelection
        );
        if crossing {
            self.turn_boundary();
            if self.session.phase.is_terminal() {
                return Ok(TurnPhase::GameOver);
            }
        }

        self.session.phase = next;
        self.on_enter(next);
        Ok(next)
    }

    /// Force the session into a phase without entry work. Scenario and
    /// recovery use only.
    pub fn set_phase(&mut self, phase: TurnPhase) {
        self.session.phase = phase;
    }

    fn can_advance_to(&self, next: TurnPhase) -> bool {
        match next {
            TurnPhase::JourneyProgression => self.session.health() > 0,
            _ => true,
        }
    }

    fn finish(&mut self, verdict: Verdict) -> TurnPhase {
        let message = match verdict {
            Verdict::Victory => "the journey is complete; the traveller comes home",
            Verdict::Defeat(DefeatCause::Exhaustion) => "the traveller can go no further",
            Verdict::Defeat(DefeatCause::Overwhelmed) => {
                "the land's unrest overwhelms the journey"
            }
        };
        tracing::info!(?verdict, "journey decided");
        self.journal.record(
            JournalEntry::new(message, LogCategory::System).highlighted(),
        );
        self.session.phase = TurnPhase::GameOver;
        TurnPhase::GameOver
    }

    /// Everything that happens between one turn and the next.
    fn turn_boundary(&mut self) {
        if let Some(verdict) = self.evaluator.evaluate(&self.session) {
            self.finish(verdict);
            return;
        }

        self.session.begin_turn();

        // Movement, unless an effect bars the way.
        if self.session.travel_blocked() {
            self.journal.record(JournalEntry::new(
                "the way forward is barred; the traveller waits",
                LogCategory::Journey,
            ));
        } else {
            let before = self.session.visited().len();
            if let Some(landscape) = self.session.advance_journey() {
                self.enter_landscape(&landscape);
            }
            let after = self.session.visited().len();
            if after > before && after % 3 == 0 {
                let season = self.session.advance_season();
                self.journal.record(
                    JournalEntry::new(
                        format!("the wheel of the year turns: {season} begins"),
                        LogCategory::Season,
                    )
                    .highlighted(),
                );
            }
        }

        // The otherworld presses in once the accumulator runs high.
        if self.session.threat.tokens() >= OTHERWORLDLY_THRESHOLD {
            if self.session.prevention_active() {
                self.journal.record(JournalEntry::new(
                    "the ritual's calm holds the otherworld at bay",
                    LogCategory::Threat,
                ));
            } else {
                let (_, manifestation) = draw_otherworldly(&mut self.dice);
                threat::apply_manifestation(
                    manifestation,
                    &mut self.session,
                    &mut self.dice,
                    &mut *self.journal,
                );
            }
        }

        // A lethal manifestation ends the journey here, not next turn.
        if let Some(verdict) = self.evaluator.evaluate(&self.session) {
            self.finish(verdict);
        }
    }

    /// Entry effects for a landscape. These fire on every entry,
    /// re-visits included.
    fn enter_landscape(&mut self, landscape: &LandscapeId) {
        let Some(def) = self.catalog.landscape(landscape) else {
            self.journal.record(JournalEntry::new(
                format!("the path leads into unmapped land: {landscape}"),
                LogCategory::Journey,
            ));
            return;
        };
        self.journal.record(JournalEntry::new(
            format!("the path leads to {}", def.name),
            LogCategory::Journey,
        ));
        if let Some(blessing) = def.sacred {
            threat::visit_sacred_site(
                &mut self.session,
                blessing,
                &mut self.dice,
                &mut *self.journal,
            );
        }
    }

    /// Automatic work performed on entering a phase.
    fn on_enter(&mut self, phase: TurnPhase) {
        match phase {
            TurnPhase::SeasonalAssessment => {
                let chance = self.session.season.healing_chance();
                if self.session.health() < self.session.max_health() && self.dice.chance(chance) {
                    let healed = self.session.heal(1);
                    if healed > 0 {
                        self.journal.record(JournalEntry::new(
                            format!("the {} air restores {healed} health", self.session.season),
                            LogCategory::Season,
                        ));
                    }
                }
                for effect in self.session.tick_effects() {
                    self.journal.record(JournalEntry::new(
                        format!("the {} fades", effect.source),
                        LogCategory::Threat,
                    ));
                }
            }
            TurnPhase::ThreatLevelCheck => {
                if self.session.prevention_active() {
                    self.journal.record(JournalEntry::new(
                        "the land lies still; no threat stirs",
                        LogCategory::Threat,
                    ));
                    return;
                }
                let level = self.session.threat.level();
                if level > 0 && self.dice.chance(gate_probability(level)) {
                    if let Some(event) = draw_event(level, &mut self.dice) {
                        threat::apply_event(
                            event,
                            &mut self.session,
                            &mut self.dice,
                            &mut *self.journal,
                        );
                    }
                }
            }
            TurnPhase::LandscapeChallenge => {
                self.pending_challenge = self
                    .session
                    .current_landscape()
                    .and_then(|id| self.catalog.landscape(id))
                    .and_then(|def| def.challenge.clone());
                if let Some(challenge) = &self.pending_challenge {
                    if let Some(spec) = self.catalog.challenge(challenge) {
                        self.journal.record(JournalEntry::new(
                            format!("the land poses a challenge: {}", spec.name),
                            LogCategory::Challenge,
                        ));
                    }
                }
            }
            TurnPhase::ChallengeResolution => {
                if let Some(challenge) = self.pending_challenge.take() {
                    if let Some(spec) = self.catalog.challenge(&challenge) {
                        self.engine.resolve(
                            spec,
                            &mut self.session,
                            &self.catalog,
                            &mut self.dice,
                            &mut *self.journal,
                        );
                    }
                }
            }
            TurnPhase::AnimalCompanion => {
                companions::upkeep(&mut self.session, &mut *self.journal);
            }
            // Player-driven phases; the facade methods do their work.
            _ => {}
        }
    }

    // === Facade ===

    /// Choose the traveller's character. Fails on unknown ids.
    pub fn select_character(&mut self, id: &CharacterId) -> bool {
        let Some(def) = self.catalog.character(id) else {
            return false;
        };
        self.session.character = Some(def.id.clone());
        self.journal.record(JournalEntry::new(
            format!("{} takes up the journey", def.name),
            LogCategory::System,
        ));
        true
    }

    /// Feed a bonded companion. See [`companions::feed_companion`].
    pub fn feed_companion(&mut self, id: &CompanionId, resource: &ResourceId) -> bool {
        companions::feed_companion(&mut self.session, id, resource, &mut *self.journal)
    }

    /// Bond a companion with an offering. See [`companions::bond_companion`].
    pub fn bond_companion(&mut self, id: &CompanionId, resource: &ResourceId) -> bool {
        companions::bond_companion(
            &mut self.session,
            &self.catalog,
            id,
            resource,
            &mut *self.journal,
        )
    }

    /// Craft an item from held resources. See [`crafting::craft`].
    pub fn craft(&mut self, item: &ItemId) -> bool {
        crafting::craft(&mut self.session, &self.catalog, item, &mut *self.journal)
    }

    /// Perform the once-per-season calming ritual.
    pub fn seasonal_ritual(&mut self) -> Option<u32> {
        threat::seasonal_ritual(&mut self.session, &mut *self.journal)
    }

    /// Spend the silver charm to draw off one threat token.
    pub fn use_calming_charm(&mut self) -> bool {
        threat::use_calming_charm(&mut self.session, &mut *self.journal)
    }

    /// Burn the rowan herb to ward the next threat accumulation.
    pub fn use_warding_herb(&mut self) -> bool {
        threat::use_warding_herb(&mut self.session, &mut *self.journal)
    }

    /// Accumulate threat tokens; returns the new total.
    pub fn add_threat_tokens(&mut self, amount: u32) -> u32 {
        self.session.threat.add_tokens(amount).total
    }

    /// Remove threat tokens through the capped path; returns the new
    /// total. Truncation past the per-turn cap is journaled.
    pub fn remove_threat_tokens(&mut self, amount: u32) -> u32 {
        let reduction = self.session.threat.remove_tokens(amount);
        if reduction.truncated > 0 {
            self.journal.record(JournalEntry::new(
                format!(
                    "{} threat is beyond this turn's calming",
                    reduction.truncated
                ),
                LogCategory::Threat,
            ));
        }
        reduction.total
    }

    /// The most recent challenge outcome.
    #[must_use]
    pub fn last_outcome(&self) -> Option<&ChallengeOutcome> {
        self.engine.last_outcome()
    }

    /// Read access to the session.
    #[must_use]
    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Mutable access to the session (scenario setup, tests).
    pub fn session_mut(&mut self) -> &mut SessionState {
        &mut self.session
    }

    /// Read access to the catalog.
    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{ChallengeSpec, CharacterDef, LandscapeDef, SiteBlessing};
    use crate::challenge::ChallengeKind;
    use crate::core::Season;
    use crate::journal::MemoryJournal;

    fn catalog() -> Catalog {
        let mut catalog = Catalog::new();
        catalog.register_character(CharacterDef::new("warden", "The Warden"));
        catalog.register_challenge(ChallengeSpec::new(
            "ford_crossing",
            "Crossing the Ford",
            ChallengeKind::Physical,
            4,
        ));
        catalog.register_landscape(
            LandscapeDef::new("river_ford", "The River Ford").with_challenge("ford_crossing"),
        );
        catalog.register_landscape(LandscapeDef::new("heartwood_grove", "Heartwood Grove"));
        catalog.register_landscape(
            LandscapeDef::new("standing_stones", "The Standing Stones")
                .with_sacred_site(SiteBlessing::Flat(2)),
        );
        catalog.register_landscape(LandscapeDef::new("high_moor", "The High Moor"));
        catalog
    }

    fn journey() -> Vec<LandscapeId> {
        vec![
            LandscapeId::new("river_ford"),
            LandscapeId::new("heartwood_grove"),
            LandscapeId::new("standing_stones"),
            LandscapeId::new("high_moor"),
        ]
    }

    fn controller(seed: u64) -> (TurnController, MemoryJournal) {
        let journal = MemoryJournal::new();
        let controller = TurnController::new(catalog(), journey(), DicePool::seeded(seed))
            .with_journal(journal.clone());
        (controller, journal)
    }

    /// Advance until the controller re-enters `SeasonalAssessment` (or
    /// lands in `GameOver`).
    fn run_one_turn(controller: &mut TurnController) -> TurnPhase {
        loop {
            match controller.advance() {
                Ok(TurnPhase::SeasonalAssessment) | Ok(TurnPhase::GameOver) => {
                    return controller.current_phase();
                }
                Ok(_) => {}
                Err(error) => panic!("advance failed: {error}"),
            }
        }
    }

    #[test]
    fn test_first_turn_enters_first_landscape() {
        let (mut c, journal) = controller(7);
        assert_eq!(c.current_phase(), TurnPhase::Setup);
        c.advance().unwrap();
        assert!(c.select_character(&CharacterId::new("warden")));
        c.advance().unwrap();

        assert_eq!(c.current_phase(), TurnPhase::SeasonalAssessment);
        assert_eq!(
            c.session().current_landscape(),
            Some(&LandscapeId::new("river_ford"))
        );
        assert!(journal.contains_message("the path leads to The River Ford"));
    }

    #[test]
    fn test_landscape_challenge_resolves_in_cycle() {
        let (mut c, _) = controller(7);
        c.advance().unwrap();
        c.advance().unwrap();

        // Walk to ChallengeResolution.
        while c.current_phase() != TurnPhase::ChallengeResolution {
            c.advance().unwrap();
        }
        let outcome = c.last_outcome().unwrap();
        assert_eq!(outcome.challenge.as_str(), "ford_crossing");
    }

    #[test]
    fn test_season_advances_on_third_landscape() {
        let (mut c, journal) = controller(7);
        c.advance().unwrap();
        run_one_turn(&mut c); // enters river_ford
        assert_eq!(c.session().season, Season::Imbolc);
        run_one_turn(&mut c); // enters heartwood_grove
        assert_eq!(c.session().season, Season::Imbolc);
        run_one_turn(&mut c); // enters standing_stones: third landscape
        assert_eq!(c.session().season, Season::Beltane);
        assert!(journal.contains_message("Beltane begins"));
    }

    #[test]
    fn test_sacred_site_calms_threat_on_entry() {
        let (mut c, journal) = controller(7);
        c.session_mut().threat.add_tokens(5);
        c.advance().unwrap();
        run_one_turn(&mut c);
        run_one_turn(&mut c);
        let before = c.session().threat.tokens();
        run_one_turn(&mut c); // standing_stones, Flat(2)
        assert!(c.session().threat.tokens() <= before);
        assert!(journal.contains_message("sacred site"));
    }

    #[test]
    fn test_otherworldly_fires_at_threshold() {
        let (mut c, journal) = controller(7);
        c.advance().unwrap();
        run_one_turn(&mut c);
        c.session_mut().threat.add_tokens(OTHERWORLDLY_THRESHOLD);
        run_one_turn(&mut c);
        assert!(journal.contains_message("otherworldly manifestation"));
    }

    #[test]
    fn test_prevention_holds_back_the_otherworld() {
        let (mut c, journal) = controller(7);
        c.advance().unwrap();
        run_one_turn(&mut c);
        c.session_mut().threat.add_tokens(OTHERWORLDLY_THRESHOLD + 2);
        c.seasonal_ritual().unwrap();
        run_one_turn(&mut c);
        assert!(journal.contains_message("holds the otherworld at bay"));
        assert!(!journal.contains_message("otherworldly manifestation"));
    }

    #[test]
    fn test_travel_block_skips_movement() {
        use crate::threat::OngoingEffect;

        let (mut c, journal) = controller(7);
        c.advance().unwrap();
        run_one_turn(&mut c);
        c.session_mut()
            .add_effect(OngoingEffect::travel_block(2, "tangled paths"));
        run_one_turn(&mut c);
        assert_eq!(
            c.session().current_landscape(),
            Some(&LandscapeId::new("river_ford"))
        );
        assert!(journal.contains_message("the way forward is barred"));
    }

    #[test]
    fn test_dead_traveller_cannot_progress() {
        let (mut c, journal) = controller(7);
        c.advance().unwrap();
        run_one_turn(&mut c);
        c.session_mut().take_damage(100);

        // Walk to the edge of JourneyProgression; entry is refused and
        // the verdict lands instead.
        while c.current_phase() != TurnPhase::Crafting {
            c.advance().unwrap();
        }
        assert_eq!(c.advance(), Ok(TurnPhase::GameOver));
        assert!(journal.contains_message("can go no further"));
    }

    #[test]
    fn test_journey_completion_is_victory() {
        let (mut c, journal) = controller(7);
        c.advance().unwrap();
        for _ in 0..4 {
            assert_ne!(run_one_turn(&mut c), TurnPhase::GameOver);
        }
        // All four landscapes entered; the next boundary decides it.
        assert_eq!(run_one_turn(&mut c), TurnPhase::GameOver);
        assert!(journal.contains_message("comes home"));
        assert_eq!(c.advance(), Err(AdvanceError::Completed));
    }

    #[test]
    fn test_overwhelming_threat_is_defeat() {
        let (mut c, journal) = controller(7);
        c.advance().unwrap();
        run_one_turn(&mut c);
        c.session_mut().threat.add_tokens(20);
        assert_eq!(run_one_turn(&mut c), TurnPhase::GameOver);
        assert!(journal.contains_message("overwhelms the journey"));
    }

    #[test]
    fn test_companion_upkeep_runs_each_turn() {
        use crate::companions::CompanionBond;

        let (mut c, _) = controller(7);
        c.advance().unwrap();
        run_one_turn(&mut c);
        c.session_mut()
            .add_companion(CompanionBond::new(CompanionId::new("fox")));

        run_one_turn(&mut c);
        let bond = c.session().companion(&CompanionId::new("fox")).unwrap();
        assert_eq!(bond.turns_since_fed, 1);
    }

    #[test]
    fn test_set_phase_skips_entry_work() {
        let (mut c, _) = controller(7);
        c.advance().unwrap();
        run_one_turn(&mut c);
        c.set_phase(TurnPhase::ChallengeResolution);
        // No challenge was staged, so nothing resolved.
        assert!(c.last_outcome().is_none());
    }
}
