//! Scenario domain module.
//!
//! Scenarios are pure data: a situation, the user's objective and the persona
//! the model plays. They are read-only once a session starts, except for the
//! two feature flags which may be toggled on the setup screen beforehand.
//!
//! # Module Structure
//!
//! - `model`: `Scenario`, `Persona`, `PersonaTips`, `ScenarioFlag`
//! - `preset`: built-in scenarios
//! - `catalog`: the selectable list shown before a session
//! - `builder`: custom scenarios assembled from a `ScenarioDraft`, edited field by field

mod builder;
mod catalog;
mod model;
mod preset;

pub use builder::{
    CUSTOM_INITIAL_METRICS, DraftField, ScenarioBuilder, ScenarioDraft, parse_key_traits,
};
pub use catalog::ScenarioCatalog;
pub use model::{Persona, PersonaTips, Scenario, ScenarioFlag};
pub use preset::default_scenarios;
