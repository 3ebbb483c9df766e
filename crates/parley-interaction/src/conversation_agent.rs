//! `ConversationAgent` backed by any `LanguageModel`.
//!
//! Each port method renders its prompt, attaches the matching response
//! schema, and decodes the answer through the typed contracts. Nothing here
//! falls back: every failure is returned to the application layer.

use async_trait::async_trait;
use parley_core::Result;
use parley_core::agent::{AiReply, ConversationAgent};
use parley_core::metrics::{Metrics, MetricsReading};
use parley_core::scenario::{PersonaTips, Scenario, ScenarioDraft};
use parley_core::session::{Message, Sender};
use parley_core::trainer::TrainerOptions;

use crate::contracts::{
    AnalysisResponse, PersonaTipsResponse, ReplyResponse, ScenarioSuggestionResponse,
    TrainerOptionsResponse, decode_json,
};
use crate::language_model::{Content, GenerationRequest, LanguageModel};
use crate::{prompts, schema};

pub struct GeminiConversationAgent<M> {
    model: M,
}

impl<M: LanguageModel> GeminiConversationAgent<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }

    pub fn model(&self) -> &M {
        &self.model
    }
}

/// Builds the role-play contents: preface, acknowledgement, then the history.
fn roleplay_contents(history: &[Message], scenario: &Scenario) -> Result<Vec<Content>> {
    let mut contents = Vec::with_capacity(history.len() + 2);
    contents.push(Content::user(prompts::roleplay_preface(scenario)?));
    contents.push(Content::model(prompts::ROLEPLAY_ACK));
    contents.extend(history.iter().map(|message| match message.sender {
        Sender::User => Content::user(message.text.clone()),
        Sender::Ai => Content::model(message.text.clone()),
    }));
    Ok(contents)
}

#[async_trait]
impl<M: LanguageModel> ConversationAgent for GeminiConversationAgent<M> {
    async fn analyze(
        &self,
        prior: &[Message],
        scenario: &Scenario,
        user_text: &str,
        previous: &Metrics,
    ) -> Result<MetricsReading> {
        let prompt = prompts::analysis(prior, scenario, user_text, previous)?;
        let raw = self
            .model
            .generate(GenerationRequest::json(prompt, schema::analysis()))
            .await?;
        decode_json::<AnalysisResponse>(&raw)?.into_reading()
    }

    async fn generate_reply(&self, history: &[Message], scenario: &Scenario) -> Result<AiReply> {
        let contents = roleplay_contents(history, scenario)?;
        let raw = self
            .model
            .generate(GenerationRequest::conversation(contents, schema::reply()))
            .await?;
        let reply = decode_json::<ReplyResponse>(&raw)?.validate()?;
        Ok(AiReply {
            text: reply.response,
            insight: reply.insight,
        })
    }

    async fn trainer_options(
        &self,
        recent: &[Message],
        scenario: &Scenario,
    ) -> Result<TrainerOptions> {
        let prompt = prompts::trainer_options(recent, scenario)?;
        let raw = self
            .model
            .generate(GenerationRequest::json(prompt, schema::trainer_options()))
            .await?;
        decode_json::<TrainerOptionsResponse>(&raw)?.into_options()
    }

    async fn suggestions(&self, recent: &[Message], scenario: &Scenario) -> Result<String> {
        let prompt = prompts::suggestions(recent, scenario)?;
        self.model.generate(GenerationRequest::text(prompt)).await
    }

    async fn persona_tips(&self, scenario: &Scenario) -> Result<PersonaTips> {
        let prompt = prompts::persona_tips(scenario)?;
        let raw = self
            .model
            .generate(GenerationRequest::json(prompt, schema::persona_tips()))
            .await?;
        Ok(decode_json::<PersonaTipsResponse>(&raw)?.into())
    }

    async fn scenario_draft(&self, idea: &str) -> Result<ScenarioDraft> {
        let prompt = prompts::scenario_draft(idea)?;
        let raw = self
            .model
            .generate(GenerationRequest::json(prompt, schema::scenario_suggestion()))
            .await?;
        Ok(decode_json::<ScenarioSuggestionResponse>(&raw)?.into())
    }
}
