//! Custom scenario builder.
//!
//! Turns a user-authored (or model-drafted) `ScenarioDraft` into a
//! `Scenario` with a fresh identity and the fixed custom seed metrics.

use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};
use uuid::Uuid;

use super::model::{Persona, Scenario};
use crate::error::{ParleyError, Result};
use crate::metrics::Metrics;

/// Seed metrics for every custom scenario: `{50, 50, 50, 10}`.
pub const CUSTOM_INITIAL_METRICS: [u8; 4] = [50, 50, 50, 10];

/// Editable fields of a custom scenario, before an id and metrics exist.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScenarioDraft {
    pub title: String,
    pub description: String,
    pub user_objective: String,
    pub persona_name: String,
    pub persona_role: String,
    pub persona_key_traits: Vec<String>,
    pub persona_motivations: String,
    pub initial_ai_message: String,
}

/// A single editable field of a `ScenarioDraft`, named as in the draft.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Display, EnumIter, EnumString)]
#[strum(serialize_all = "snake_case")]
pub enum DraftField {
    Title,
    Description,
    UserObjective,
    PersonaName,
    PersonaRole,
    PersonaKeyTraits,
    PersonaMotivations,
    InitialAiMessage,
}

impl ScenarioDraft {
    /// Overwrites one field. Key traits are given comma-separated.
    pub fn set(&mut self, field: DraftField, value: &str) {
        let value = value.trim();
        let slot = match field {
            DraftField::PersonaKeyTraits => {
                self.persona_key_traits = parse_key_traits(value);
                return;
            }
            DraftField::Title => &mut self.title,
            DraftField::Description => &mut self.description,
            DraftField::UserObjective => &mut self.user_objective,
            DraftField::PersonaName => &mut self.persona_name,
            DraftField::PersonaRole => &mut self.persona_role,
            DraftField::PersonaMotivations => &mut self.persona_motivations,
            DraftField::InitialAiMessage => &mut self.initial_ai_message,
        };
        *slot = value.to_string();
    }

    /// Names of the fields that are still empty.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let text_fields = [
            ("title", &self.title),
            ("description", &self.description),
            ("user_objective", &self.user_objective),
            ("persona_name", &self.persona_name),
            ("persona_role", &self.persona_role),
            ("persona_motivations", &self.persona_motivations),
            ("initial_ai_message", &self.initial_ai_message),
        ];
        let mut missing: Vec<&'static str> = text_fields
            .into_iter()
            .filter(|(_, value)| value.trim().is_empty())
            .map(|(name, _)| name)
            .collect();
        if self.persona_key_traits.iter().all(|t| t.trim().is_empty()) {
            missing.push("persona_key_traits");
        }
        missing
    }
}

/// Splits a comma-separated trait list, trimming and dropping empty items.
pub fn parse_key_traits(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

/// Builder for custom scenarios.
///
/// # Examples
///
/// ```
/// use parley_core::scenario::{ScenarioBuilder, ScenarioDraft};
///
/// let draft = ScenarioDraft {
///     title: "Landlord".into(),
///     description: "Your heating is broken.".into(),
///     user_objective: "Get it fixed this week.".into(),
///     persona_name: "Pat".into(),
///     persona_role: "Landlord".into(),
///     persona_key_traits: vec!["Busy".into()],
///     persona_motivations: "Spend as little as possible.".into(),
///     initial_ai_message: "What is it now?".into(),
/// };
/// let scenario = ScenarioBuilder::new(draft).trainer_mode(true).build().unwrap();
/// assert!(scenario.id.starts_with("custom-"));
/// assert!(scenario.trainer_mode);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioBuilder {
    draft: ScenarioDraft,
    suggestions_enabled: bool,
    trainer_mode: bool,
}

impl ScenarioBuilder {
    pub fn new(draft: ScenarioDraft) -> Self {
        Self {
            draft,
            suggestions_enabled: true,
            trainer_mode: false,
        }
    }

    pub fn suggestions(mut self, enabled: bool) -> Self {
        self.suggestions_enabled = enabled;
        self
    }

    pub fn trainer_mode(mut self, enabled: bool) -> Self {
        self.trainer_mode = enabled;
        self
    }

    /// Validates the draft and assigns identity and seed metrics.
    pub fn build(self) -> Result<Scenario> {
        let missing = self.draft.missing_fields();
        if !missing.is_empty() {
            return Err(ParleyError::invalid_scenario(format!(
                "missing fields: {}",
                missing.join(", ")
            )));
        }

        let [persuasion, agreement, engagement, agitation] = CUSTOM_INITIAL_METRICS;
        let draft = self.draft;
        Ok(Scenario {
            id: format!("custom-{}", Uuid::new_v4()),
            title: draft.title,
            description: draft.description,
            user_objective: draft.user_objective,
            persona: Persona {
                name: draft.persona_name,
                role: draft.persona_role,
                key_traits: draft
                    .persona_key_traits
                    .into_iter()
                    .map(|t| t.trim().to_string())
                    .filter(|t| !t.is_empty())
                    .collect(),
                motivations: draft.persona_motivations,
                tips: None,
            },
            initial_ai_message: draft.initial_ai_message,
            initial_metrics: Metrics::new(persuasion, agreement, engagement, agitation)?,
            suggestions_enabled: self.suggestions_enabled,
            trainer_mode: self.trainer_mode,
        })
    }
}
