//! The seasonal wheel.
//!
//! The journey moves through four festival seasons in a fixed cycle.
//! Seasons shift challenge difficulty (see `challenge::modifiers`),
//! scale passive healing, and gate the once-per-season calming ritual.

use serde::{Deserialize, Serialize};

/// One of the four festival seasons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Season {
    /// Late winter; the journey begins here.
    Imbolc,
    /// High summer's threshold.
    Beltane,
    /// Harvest.
    Lughnasadh,
    /// The dark of the year.
    Samhain,
}

impl Season {
    /// All seasons in wheel order.
    pub const ALL: [Season; 4] = [
        Season::Imbolc,
        Season::Beltane,
        Season::Lughnasadh,
        Season::Samhain,
    ];

    /// The next season on the wheel.
    #[must_use]
    pub fn next(self) -> Season {
        match self {
            Season::Imbolc => Season::Beltane,
            Season::Beltane => Season::Lughnasadh,
            Season::Lughnasadh => Season::Samhain,
            Season::Samhain => Season::Imbolc,
        }
    }

    /// Probability of passive healing during seasonal assessment.
    ///
    /// Mild seasons restore the traveller readily; Samhain barely at all.
    #[must_use]
    pub fn healing_chance(self) -> f64 {
        match self {
            Season::Imbolc => 0.25,
            Season::Beltane => 0.75,
            Season::Lughnasadh => 0.50,
            Season::Samhain => 0.10,
        }
    }

    /// Threat tokens removed by the once-per-season calming ritual.
    #[must_use]
    pub fn ritual_reduction(self) -> u32 {
        match self {
            Season::Imbolc => 1,
            Season::Beltane => 2,
            Season::Lughnasadh => 2,
            Season::Samhain => 3,
        }
    }
}

impl std::fmt::Display for Season {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Season::Imbolc => "Imbolc",
            Season::Beltane => "Beltane",
            Season::Lughnasadh => "Lughnasadh",
            Season::Samhain => "Samhain",
        };
        f.write_str(name)
    }
}
