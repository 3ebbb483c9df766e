use std::sync::Arc;
use std::time::Duration;

use parley_core::agent::ConversationAgent;
use parley_core::config::SessionSettings;
use parley_core::scenario::{PersonaTips, Scenario};

use super::chat_session::ChatSession;
use crate::bounded::bounded;
use crate::fallback;

/// Creates `ChatSession` instances from a selected scenario.
///
/// Persona tips are fetched here, exactly once per selection, before the
/// session starts.
pub struct SessionFactory {
    agent: Arc<dyn ConversationAgent>,
    request_timeout: Duration,
    fetch_persona_tips: bool,
}

impl SessionFactory {
    pub fn new(agent: Arc<dyn ConversationAgent>, settings: &SessionSettings) -> Self {
        Self {
            agent,
            request_timeout: settings.request_timeout(),
            fetch_persona_tips: settings.fetch_persona_tips,
        }
    }

    /// Enriches `scenario` with persona tips (unless disabled or already
    /// present) and starts a session on it.
    pub async fn start(&self, scenario: Scenario) -> ChatSession {
        let scenario = if self.fetch_persona_tips && scenario.persona.tips.is_none() {
            let tips = self.persona_tips(&scenario).await;
            scenario.with_persona_tips(tips)
        } else {
            scenario
        };
        ChatSession::start(scenario, Arc::clone(&self.agent), self.request_timeout).await
    }

    /// Do/don't tips for `scenario`, or the literal fallback lists.
    pub async fn persona_tips(&self, scenario: &Scenario) -> PersonaTips {
        bounded(self.request_timeout, self.agent.persona_tips(scenario))
            .await
            .unwrap_or_else(|err| {
                tracing::warn!(scenario = %scenario.id, error = %err, "persona tips failed");
                fallback::persona_tips()
            })
    }
}
