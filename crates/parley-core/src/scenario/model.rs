//! Scenario and persona domain model.

use serde::{Deserialize, Serialize};

use crate::metrics::Metrics;

/// Advisory do/don't lists shown to the user for a persona.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaTips {
    pub dos: Vec<String>,
    pub donts: Vec<String>,
}

/// The character the model role-plays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Persona {
    /// Display name of the persona
    pub name: String,
    /// Job or role in the scenario
    pub role: String,
    /// Short personality traits
    pub key_traits: Vec<String>,
    /// What the persona wants out of the conversation
    pub motivations: String,
    /// Tips populated once after scenario selection; `None` until then
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tips: Option<PersonaTips>,
}

impl Persona {
    /// One-paragraph description fed into every prompt.
    pub fn biography(&self) -> String {
        format!(
            "Your role is: {}. Your key traits are: {}. Your primary motivation is: {}",
            self.role,
            self.key_traits.join(", "),
            self.motivations
        )
    }
}

/// Pre-session feature switches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScenarioFlag {
    /// On-demand suggestions for the free-text input
    Suggestions,
    /// Three guided options instead of free text
    TrainerMode,
}

/// A fixed situation definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Scenario {
    pub id: String,
    pub title: String,
    pub description: String,
    pub user_objective: String,
    pub persona: Persona,
    pub initial_ai_message: String,
    pub initial_metrics: Metrics,
    pub suggestions_enabled: bool,
    pub trainer_mode: bool,
}

impl Scenario {
    /// Returns a copy whose persona carries the given tips.
    pub fn with_persona_tips(mut self, tips: PersonaTips) -> Self {
        self.persona.tips = Some(tips);
        self
    }

    pub fn flag(&self, flag: ScenarioFlag) -> bool {
        match flag {
            ScenarioFlag::Suggestions => self.suggestions_enabled,
            ScenarioFlag::TrainerMode => self.trainer_mode,
        }
    }

    pub fn set_flag(&mut self, flag: ScenarioFlag, value: bool) {
        match flag {
            ScenarioFlag::Suggestions => self.suggestions_enabled = value,
            ScenarioFlag::TrainerMode => self.trainer_mode = value,
        }
    }
}
