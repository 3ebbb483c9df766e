#![allow(dead_code)]

use async_trait::async_trait;
use parley_core::agent::{AiReply, ConversationAgent};
use parley_core::metrics::{Metrics, MetricsReading};
use parley_core::scenario::{PersonaTips, Scenario, ScenarioDraft};
use parley_core::session::Message;
use parley_core::trainer::TrainerOptions;
use parley_core::{ParleyError, Result};
use std::collections::{HashSet, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use tokio::sync::Notify;

/// Behaviour of one scripted call.
pub enum Script<T> {
    Answer(T),
    Fail,
    /// Never resolves.
    Hang,
}

// Mock ConversationAgent with scripted answers and call recording
#[derive(Default)]
pub struct MockAgent {
    pub readings: Mutex<VecDeque<Script<MetricsReading>>>,
    pub replies: Mutex<VecDeque<Script<AiReply>>>,
    pub suggestions_text: Mutex<Option<Script<String>>>,
    pub tips: Mutex<Option<Script<PersonaTips>>>,
    pub draft: Mutex<Option<Script<ScenarioDraft>>>,
    /// Zero-based trainer call indices that never resolve
    pub hanging_trainer_calls: Mutex<HashSet<usize>>,
    /// When set, every analyze call waits for a permit first
    pub analyze_gate: Option<Arc<Notify>>,

    pub analyze_calls: AtomicUsize,
    pub generate_calls: AtomicUsize,
    pub tips_calls: AtomicUsize,
    pub analyze_previous: Mutex<Vec<Metrics>>,
    pub generate_transcripts: Mutex<Vec<Vec<Message>>>,
    pub trainer_requests: Mutex<Vec<Vec<Message>>>,
    pub suggestion_requests: Mutex<Vec<Vec<Message>>>,
}

impl MockAgent {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_analyze_gate(mut self, gate: Arc<Notify>) -> Self {
        self.analyze_gate = Some(gate);
        self
    }

    pub fn push_reading(&self, script: Script<MetricsReading>) {
        self.readings.lock().unwrap().push_back(script);
    }

    pub fn push_reply(&self, script: Script<AiReply>) {
        self.replies.lock().unwrap().push_back(script);
    }

    pub fn hang_trainer_call(&self, index: usize) {
        self.hanging_trainer_calls.lock().unwrap().insert(index);
    }

    pub fn trainer_requests(&self) -> Vec<Vec<Message>> {
        self.trainer_requests.lock().unwrap().clone()
    }

    pub fn analyze_count(&self) -> usize {
        self.analyze_calls.load(Ordering::SeqCst)
    }
}

pub fn reading(p: i64, a: i64, e: i64, g: i64, reason: &str) -> MetricsReading {
    MetricsReading {
        persuasion: p,
        agreement: a,
        engagement: e,
        agitation: g,
        change_reason: reason.to_string(),
    }
}

pub fn reply(text: &str, insight: &str) -> AiReply {
    AiReply {
        text: text.to_string(),
        insight: insight.to_string(),
    }
}

pub fn trainer_triple(tag: usize) -> TrainerOptions {
    TrainerOptions {
        positive: format!("positive #{tag}"),
        neutral: format!("neutral #{tag}"),
        negative: format!("negative #{tag}"),
    }
}

async fn run<T>(script: Option<Script<T>>, missing: &str) -> Result<T> {
    match script {
        Some(Script::Answer(value)) => Ok(value),
        Some(Script::Fail) => Err(ParleyError::model_status(500, "INTERNAL: scripted failure")),
        Some(Script::Hang) => std::future::pending().await,
        None => Err(ParleyError::model(format!("no scripted {missing}"))),
    }
}

#[async_trait]
impl ConversationAgent for MockAgent {
    async fn analyze(
        &self,
        _prior: &[Message],
        _scenario: &Scenario,
        _user_text: &str,
        previous: &Metrics,
    ) -> Result<MetricsReading> {
        self.analyze_calls.fetch_add(1, Ordering::SeqCst);
        self.analyze_previous.lock().unwrap().push(previous.clone());
        if let Some(gate) = &self.analyze_gate {
            gate.notified().await;
        }
        let script = self.readings.lock().unwrap().pop_front();
        run(script, "reading").await
    }

    async fn generate_reply(&self, history: &[Message], _scenario: &Scenario) -> Result<AiReply> {
        self.generate_calls.fetch_add(1, Ordering::SeqCst);
        self.generate_transcripts
            .lock()
            .unwrap()
            .push(history.to_vec());
        let script = self
            .replies
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Script::Answer(reply("Let me check on that.", "Buying time")));
        run(Some(script), "reply").await
    }

    async fn trainer_options(
        &self,
        recent: &[Message],
        _scenario: &Scenario,
    ) -> Result<TrainerOptions> {
        let index = {
            let mut requests = self.trainer_requests.lock().unwrap();
            requests.push(recent.to_vec());
            requests.len() - 1
        };
        if self.hanging_trainer_calls.lock().unwrap().contains(&index) {
            std::future::pending::<()>().await;
        }
        Ok(trainer_triple(index))
    }

    async fn suggestions(&self, recent: &[Message], _scenario: &Scenario) -> Result<String> {
        self.suggestion_requests
            .lock()
            .unwrap()
            .push(recent.to_vec());
        let script = self.suggestions_text.lock().unwrap().take();
        run(script, "suggestions").await
    }

    async fn persona_tips(&self, _scenario: &Scenario) -> Result<PersonaTips> {
        self.tips_calls.fetch_add(1, Ordering::SeqCst);
        let script = self.tips.lock().unwrap().take();
        run(script, "tips").await
    }

    async fn scenario_draft(&self, _idea: &str) -> Result<ScenarioDraft> {
        let script = self.draft.lock().unwrap().take();
        run(script, "draft").await
    }
}
