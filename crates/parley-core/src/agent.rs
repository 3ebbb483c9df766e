//! Port to the external generative model.
//!
//! One method per request/response shape. Implementations live in
//! `parley-interaction`; the application layer owns every fallback.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::metrics::{Metrics, MetricsReading};
use crate::scenario::{PersonaTips, Scenario, ScenarioDraft};
use crate::session::Message;
use crate::trainer::TrainerOptions;

/// The persona's reply and its note on its own strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AiReply {
    pub text: String,
    pub insight: String,
}

/// All calls the simulator makes to the generative model.
///
/// Every method is a single request with a single response. Any transport,
/// parse or validation problem is reported as an error; callers decide how
/// to degrade.
#[async_trait]
pub trait ConversationAgent: Send + Sync {
    /// Scores the state after `user_text`, given the history before it.
    async fn analyze(
        &self,
        prior: &[Message],
        scenario: &Scenario,
        user_text: &str,
        previous: &Metrics,
    ) -> Result<MetricsReading>;

    /// Produces the persona's next line for a history ending in a user message.
    async fn generate_reply(&self, history: &[Message], scenario: &Scenario) -> Result<AiReply>;

    /// Three candidate user utterances for the most recent messages.
    async fn trainer_options(
        &self,
        recent: &[Message],
        scenario: &Scenario,
    ) -> Result<TrainerOptions>;

    /// Free-text, line-delimited coaching suggestions.
    async fn suggestions(&self, recent: &[Message], scenario: &Scenario) -> Result<String>;

    async fn persona_tips(&self, scenario: &Scenario) -> Result<PersonaTips>;

    /// Drafts a full scenario from a one-line idea.
    async fn scenario_draft(&self, idea: &str) -> Result<ScenarioDraft>;
}
