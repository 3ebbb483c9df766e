//! The selectable scenario list.

use super::model::{Scenario, ScenarioFlag};
use super::preset::default_scenarios;
use crate::error::{ParleyError, Result};

/// Ordered list of scenarios offered before a session starts.
#[derive(Debug, Clone)]
pub struct ScenarioCatalog {
    scenarios: Vec<Scenario>,
}

impl ScenarioCatalog {
    /// Creates a catalog seeded with the built-in presets.
    pub fn new() -> Self {
        Self {
            scenarios: default_scenarios(),
        }
    }

    pub fn scenarios(&self) -> &[Scenario] {
        &self.scenarios
    }

    pub fn get(&self, id: &str) -> Result<&Scenario> {
        self.scenarios
            .iter()
            .find(|s| s.id == id)
            .ok_or_else(|| ParleyError::not_found("scenario", id))
    }

    /// Flips a feature flag; returns the new value.
    pub fn toggle(&mut self, id: &str, flag: ScenarioFlag) -> Result<bool> {
        let scenario = self
            .scenarios
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or_else(|| ParleyError::not_found("scenario", id))?;
        let value = !scenario.flag(flag);
        scenario.set_flag(flag, value);
        Ok(value)
    }

    /// Appends a scenario (typically a custom one).
    pub fn add(&mut self, scenario: Scenario) {
        self.scenarios.push(scenario);
    }
}

impl Default for ScenarioCatalog {
    fn default() -> Self {
        Self::new()
    }
}
