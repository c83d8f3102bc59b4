//! Challenge categories.

use serde::{Deserialize, Serialize};

/// The category of a challenge.
///
/// Agility is a real catalog category but shares the Physical rules
/// bundle; [`ChallengeKind::canonical`] collapses it before any table
/// lookup.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChallengeKind {
    Physical,
    Mental,
    Spiritual,
    Social,
    Agility,
}

impl ChallengeKind {
    /// All catalog categories.
    pub const ALL: [ChallengeKind; 5] = [
        ChallengeKind::Physical,
        ChallengeKind::Mental,
        ChallengeKind::Spiritual,
        ChallengeKind::Social,
        ChallengeKind::Agility,
    ];

    /// Parse a category name, case-insensitively.
    ///
    /// Unrecognized names fall back to Physical rather than failing;
    /// catalog data is external and a bad category must not abort a turn.
    #[must_use]
    pub fn from_name(name: &str) -> Self {
        match name.to_ascii_lowercase().as_str() {
            "physical" => ChallengeKind::Physical,
            "mental" => ChallengeKind::Mental,
            "spiritual" => ChallengeKind::Spiritual,
            "social" => ChallengeKind::Social,
            "agility" => ChallengeKind::Agility,
            other => {
                tracing::debug!(category = other, "unrecognized challenge category, using Physical");
                ChallengeKind::Physical
            }
        }
    }

    /// Collapse aliases to the category whose rules bundle applies.
    #[must_use]
    pub fn canonical(self) -> Self {
        match self {
            ChallengeKind::Agility => ChallengeKind::Physical,
            other => other,
        }
    }

    /// Display name.
    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            ChallengeKind::Physical => "Physical",
            ChallengeKind::Mental => "Mental",
            ChallengeKind::Spiritual => "Spiritual",
            ChallengeKind::Social => "Social",
            ChallengeKind::Agility => "Agility",
        }
    }
}

impl std::fmt::Display for ChallengeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
