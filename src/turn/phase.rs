//! The fixed turn-phase cycle.

use serde::{Deserialize, Serialize};

/// One of the twelve turn phases.
///
/// Eleven phases form a fixed cycle; `GameOver` is an absorbing terminal
/// reachable from anywhere once the journey's verdict is in. `Setup` and
/// `CharacterSelection` are passed through once at the start and never
/// revisited: the cycle re-enters at `SeasonalAssessment`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TurnPhase {
    Setup,
    CharacterSelection,
    SeasonalAssessment,
    ThreatLevelCheck,
    LandscapeChallenge,
    ChallengeResolution,
    ResourceManagement,
    AnimalCompanion,
    Crafting,
    JourneyProgression,
    Exploration,
    GameOver,
}

impl TurnPhase {
    /// The fixed successor of this phase.
    #[must_use]
    pub fn successor(self) -> TurnPhase {
        match self {
            TurnPhase::Setup => TurnPhase::CharacterSelection,
            TurnPhase::CharacterSelection => TurnPhase::SeasonalAssessment,
            TurnPhase::SeasonalAssessment => TurnPhase::ThreatLevelCheck,
            TurnPhase::ThreatLevelCheck => TurnPhase::LandscapeChallenge,
            TurnPhase::LandscapeChallenge => TurnPhase::ChallengeResolution,
            TurnPhase::ChallengeResolution => TurnPhase::ResourceManagement,
            TurnPhase::ResourceManagement => TurnPhase::AnimalCompanion,
            TurnPhase::AnimalCompanion => TurnPhase::Crafting,
            TurnPhase::Crafting => TurnPhase::JourneyProgression,
            TurnPhase::JourneyProgression => TurnPhase::Exploration,
            TurnPhase::Exploration => TurnPhase::SeasonalAssessment,
            TurnPhase::GameOver => TurnPhase::GameOver,
        }
    }

    /// Whether this phase is the absorbing terminal.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        self == TurnPhase::GameOver
    }

    /// All phases, for exhaustive checks.
    pub const ALL: [TurnPhase; 12] = [
        TurnPhase::Setup,
        TurnPhase::CharacterSelection,
        TurnPhase::SeasonalAssessment,
        TurnPhase::ThreatLevelCheck,
        TurnPhase::LandscapeChallenge,
        TurnPhase::ChallengeResolution,
        TurnPhase::ResourceManagement,
        TurnPhase::AnimalCompanion,
        TurnPhase::Crafting,
        TurnPhase::JourneyProgression,
        TurnPhase::Exploration,
        TurnPhase::GameOver,
    ];
}

impl std::fmt::Display for TurnPhase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{self:?}")
    }
}
