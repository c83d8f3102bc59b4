//! The threat accumulator and everything it feeds.
//!
//! ## Key Types
//!
//! - `ThreatState`: token accumulator with derived level, per-turn
//!   reduction cap, per-season ritual, and the one-shot ward
//! - `ThreatEvent` / `OngoingEffect`: the event tables and their
//!   lingering consequences
//! - `Manifestation`: the otherworldly table consulted at high threat
//!
//! Mitigations (sacred sites, charms, the seasonal ritual) all flow
//! through the capped removal path on `ThreatState`.

pub mod events;
pub mod mitigation;
pub mod omens;
pub mod state;

pub use events::{
    apply_consequence, apply_event, draw_event, eligible_events, EffectKind, EventTier,
    OngoingEffect, ThreatEvent, ThreatEventKind, MAJOR_EVENTS, MINOR_EVENTS, MODERATE_EVENTS,
};
pub use mitigation::{
    seasonal_ritual, use_calming_charm, use_warding_herb, visit_sacred_site, CALMING_RESOURCE,
    WARDING_RESOURCE,
};
pub use omens::{
    apply_manifestation, draw_otherworldly, gate_probability, Manifestation,
    GATE_CHANCE_PER_LEVEL, OTHERWORLDLY_TABLE, OTHERWORLDLY_THRESHOLD,
};
pub use state::{ThreatGain, ThreatReduction, ThreatState, REDUCTION_CAP, TOKENS_PER_LEVEL};
