//! Victory/defeat evaluation interface.
//!
//! The controller consults an evaluator at every turn boundary; a
//! returned verdict sends the session into `GameOver`. Unrecoverable
//! conditions surface only this way - never as errors.

use serde::{Deserialize, Serialize};

use crate::core::SessionState;

/// Why the journey was lost.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum DefeatCause {
    /// Health reached zero.
    Exhaustion,
    /// Threat grew past the defeat threshold.
    Overwhelmed,
}

/// The final word on a journey.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Verdict {
    Victory,
    Defeat(DefeatCause),
}

/// Decides whether the journey has ended.
pub trait JourneyEvaluator {
    /// `None` while the journey continues.
    fn evaluate(&self, session: &SessionState) -> Option<Verdict>;
}

/// Threat tokens at which the land overwhelms the traveller.
pub const DEFAULT_DEFEAT_THRESHOLD: u32 = 15;

/// The standard win/loss rules.
#[derive(Clone, Copy, Debug)]
pub struct StandardEvaluator {
    pub threat_threshold: u32,
}

impl Default for StandardEvaluator {
    fn default() -> Self {
        Self {
            threat_threshold: DEFAULT_DEFEAT_THRESHOLD,
        }
    }
}

impl JourneyEvaluator for StandardEvaluator {
    fn evaluate(&self, session: &SessionState) -> Option<Verdict> {
        if session.health() <= 0 {
            return Some(Verdict::Defeat(DefeatCause::Exhaustion));
        }
        if session.threat.tokens() >= self.threat_threshold {
            return Some(Verdict::Defeat(DefeatCause::Overwhelmed));
        }
        if session.journey_complete() {
            return Some(Verdict::Victory);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::LandscapeId;

    fn session() -> SessionState {
        SessionState::new(vec![LandscapeId::new("river_ford")])
    }

    #[test]
    fn test_journey_continues_by_default() {
        let evaluator = StandardEvaluator::default();
        assert_eq!(evaluator.evaluate(&session()), None);
    }

    #[test]
    fn test_zero_health_is_exhaustion() {
        let evaluator = StandardEvaluator::default();
        let mut s = session();
        s.take_damage(100);
        assert_eq!(
            evaluator.evaluate(&s),
            Some(Verdict::Defeat(DefeatCause::Exhaustion))
        );
    }

    #[test]
    fn test_threat_threshold_overwhelms() {
        let evaluator = StandardEvaluator::default();
        let mut s = session();
        s.threat.add_tokens(DEFAULT_DEFEAT_THRESHOLD);
        assert_eq!(
            evaluator.evaluate(&s),
            Some(Verdict::Defeat(DefeatCause::Overwhelmed))
        );
    }

    #[test]
    fn test_completed_journey_is_victory() {
        let evaluator = StandardEvaluator::default();
        let mut s = session();
        s.advance_journey();
        assert_eq!(evaluator.evaluate(&s), Some(Verdict::Victory));
    }

    #[test]
    fn test_defeat_outranks_victory() {
        // A traveller who dies entering the last landscape loses.
        let evaluator = StandardEvaluator::default();
        let mut s = session();
        s.advance_journey();
        s.take_damage(100);
        assert_eq!(
            evaluator.evaluate(&s),
            Some(Verdict::Defeat(DefeatCause::Exhaustion))
        );
    }
}
