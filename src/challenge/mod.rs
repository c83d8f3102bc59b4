//! Challenge resolution: categories, modifiers, classification, engine.
//!
//! ## Resolution Pipeline
//!
//! 1. Snapshot session state (`ResolveSnapshot`)
//! 2. Derive difficulty: base + seasonal + threat level + shifts
//! 3. Gather the bonus (`BonusBreakdown`), spending banked blessings
//! 4. Roll one d8 and classify (`classify`)
//! 5. Apply side effects and category aftermath

pub mod category;
pub mod engine;
pub mod modifiers;
pub mod outcome;

pub use category::ChallengeKind;
pub use engine::{strategy_for, ChallengeEngine, ResolveSnapshot, Strategy};
pub use modifiers::{gather_bonus, seasonal_modifier, BonusBreakdown, BonusSource};
pub use outcome::{classify, ChallengeOutcome, OutcomeTier};
