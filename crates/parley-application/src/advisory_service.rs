//! Advisory Service
//!
//! User-triggered enrichments outside the turn sequence: coaching
//! suggestions for the next message and AI-drafted custom scenarios.

use std::sync::Arc;
use std::time::Duration;

use parley_core::advice::parse_suggestions;
use parley_core::agent::ConversationAgent;
use parley_core::scenario::{Scenario, ScenarioDraft};
use parley_core::session::History;

use crate::bounded::bounded;
use crate::fallback;

/// Number of most recent messages the suggestions call sees.
pub const SUGGESTION_CONTEXT: usize = 4;

pub struct AdvisoryService {
    agent: Arc<dyn ConversationAgent>,
    request_timeout: Duration,
}

impl AdvisoryService {
    pub fn new(agent: Arc<dyn ConversationAgent>, request_timeout: Duration) -> Self {
        Self {
            agent,
            request_timeout,
        }
    }

    /// Suggestions for the user's next message, one per list entry.
    pub async fn suggestions(&self, history: &History, scenario: &Scenario) -> Vec<String> {
        let recent = history.recent(SUGGESTION_CONTEXT);
        match bounded(self.request_timeout, self.agent.suggestions(recent, scenario)).await {
            Ok(text) => parse_suggestions(&text),
            Err(err) => {
                tracing::warn!(scenario = %scenario.id, error = %err, "suggestions failed");
                fallback::suggestions()
            }
        }
    }

    /// Drafts a scenario from a free-text idea.
    ///
    /// On failure the error-shaped draft comes back; it has an empty
    /// objective, so `ScenarioBuilder` refuses it.
    pub async fn draft_scenario(&self, idea: &str) -> ScenarioDraft {
        bounded(self.request_timeout, self.agent.scenario_draft(idea))
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(error = %err, "scenario draft failed");
                fallback::scenario_draft()
            })
    }
}
