//! Turn orchestration for a single role-play session.
//!
//! A turn runs Analyze, then Generate, then (in trainer mode) a background
//! trainer-options refresh. The turn guard is the session's [`TurnPhase`]:
//! it leaves `Idle` before the first external call and returns to `Idle`
//! only once history has been committed. The lock is never held across an
//! external call.

use std::sync::Arc;
use std::time::Duration;

use parley_core::agent::{AiReply, ConversationAgent};
use parley_core::metrics::Metrics;
use parley_core::replay::ViewMode;
use parley_core::scenario::Scenario;
use parley_core::session::{History, Message, TurnPhase};
use parley_core::trainer::TrainerOptionsSet;
use parley_core::{ParleyError, Result};
use tokio::sync::RwLock;

use super::state::{SessionState, SessionView};
use crate::bounded::bounded;
use crate::fallback;

/// Number of most recent messages given to the trainer-options call.
pub const TRAINER_CONTEXT: usize = 4;

/// Result of one completed turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TurnOutcome {
    pub turn_seq: u64,
    /// The user message with its analysed metrics and annotation.
    pub user_message: Message,
    pub ai_message: Message,
    /// Current metrics after the turn.
    pub metrics: Metrics,
}

/// A running session. Clones share the same state.
#[derive(Clone)]
pub struct ChatSession {
    agent: Arc<dyn ConversationAgent>,
    state: Arc<RwLock<SessionState>>,
    request_timeout: Duration,
}

impl ChatSession {
    /// Starts a session on `scenario`.
    ///
    /// In trainer mode the opening message gets its options right away.
    pub async fn start(
        scenario: Scenario,
        agent: Arc<dyn ConversationAgent>,
        request_timeout: Duration,
    ) -> Self {
        tracing::info!(scenario = %scenario.id, trainer = scenario.trainer_mode, "session started");
        let trainer_mode = scenario.trainer_mode;
        let session = Self {
            agent,
            state: Arc::new(RwLock::new(SessionState::new(scenario))),
            request_timeout,
        };
        if trainer_mode {
            let mut state = session.state.write().await;
            session.spawn_trainer_refresh(&mut state);
        }
        session
    }

    /// Runs one full turn for `text`.
    ///
    /// Rejects empty input and any submission while another turn is
    /// outstanding. External failures never surface here; each call falls
    /// back to a fixed value and the turn completes.
    pub async fn submit_turn(&self, text: &str) -> Result<TurnOutcome> {
        if text.trim().is_empty() {
            return Err(ParleyError::EmptyInput);
        }

        let (turn_seq, user_id, scenario, prior, previous) = {
            let mut state = self.state.write().await;
            if !state.phase.is_idle() {
                tracing::debug!(phase = %state.phase, "turn rejected, another is outstanding");
                return Err(ParleyError::TurnInProgress);
            }
            state.turn_seq += 1;
            let turn_seq = state.turn_seq;
            state.cancel_trainer();
            if state.scenario.trainer_mode {
                state.trainer.begin(turn_seq);
            }

            let previous = state.current_metrics.clone();
            let prior = state.history.committed().to_vec();
            let user_id = state.history.push_user(text, previous.clone())?;
            if let Err(err) = state.history.open_placeholder(previous.clone()) {
                state.abandon_turn();
                return Err(err);
            }
            state.phase = TurnPhase::AwaitingAnalysis;
            (turn_seq, user_id, state.scenario.clone(), prior, previous)
        };

        let analyzed = self.analyze(turn_seq, &prior, &scenario, text, &previous).await;

        let transcript = {
            let mut state = self.state.write().await;
            if let Err(err) = state.history.annotate_user(user_id, analyzed.clone()) {
                state.abandon_turn();
                return Err(err);
            }
            state.phase = TurnPhase::AwaitingReply;
            state.history.committed().to_vec()
        };

        let reply = self.generate_reply(turn_seq, &transcript, &scenario).await;

        let mut state = self.state.write().await;
        let ai_message = match state
            .history
            .commit_reply(reply.text, reply.insight, analyzed.clone())
        {
            Ok(message) => message.clone(),
            Err(err) => {
                state.abandon_turn();
                return Err(err);
            }
        };
        state.current_metrics = analyzed.clone();
        state.phase = TurnPhase::Idle;
        state.sync_cursor();
        if state.scenario.trainer_mode {
            self.spawn_trainer_refresh(&mut state);
        }

        let user_message = state.history.committed()[user_id].clone();
        tracing::info!(
            turn_seq,
            persuasion = analyzed.persuasion,
            agreement = analyzed.agreement,
            engagement = analyzed.engagement,
            agitation = analyzed.agitation,
            "turn committed"
        );
        Ok(TurnOutcome {
            turn_seq,
            user_message,
            ai_message,
            metrics: analyzed,
        })
    }

    async fn analyze(
        &self,
        turn_seq: u64,
        prior: &[Message],
        scenario: &Scenario,
        text: &str,
        previous: &Metrics,
    ) -> Metrics {
        let result = bounded(
            self.request_timeout,
            self.agent.analyze(prior, scenario, text, previous),
        )
        .await
        .and_then(|reading| Metrics::after(previous, &reading));

        result.unwrap_or_else(|err| {
            tracing::warn!(turn_seq, error = %err, "analysis failed, keeping previous metrics");
            Metrics::unchanged(previous, fallback::ANALYSIS_FAILED)
        })
    }

    async fn generate_reply(
        &self,
        turn_seq: u64,
        transcript: &[Message],
        scenario: &Scenario,
    ) -> AiReply {
        bounded(
            self.request_timeout,
            self.agent.generate_reply(transcript, scenario),
        )
        .await
        .unwrap_or_else(|err| {
            tracing::warn!(turn_seq, error = %err, "reply generation failed");
            AiReply {
                text: fallback::REPLY_TEXT.to_string(),
                insight: fallback::REPLY_INSIGHT.to_string(),
            }
        })
    }

    /// Starts the refresh for the current turn; its result only lands if no
    /// newer turn has begun by then.
    fn spawn_trainer_refresh(&self, state: &mut SessionState) {
        let turn_seq = state.turn_seq;
        state.trainer.begin(turn_seq);

        let recent = state.history.recent(TRAINER_CONTEXT).to_vec();
        let scenario = state.scenario.clone();
        let agent = Arc::clone(&self.agent);
        let shared = Arc::clone(&self.state);
        let limit = self.request_timeout;

        state.trainer_task = Some(tokio::spawn(async move {
            let options = bounded(limit, agent.trainer_options(&recent, &scenario))
                .await
                .unwrap_or_else(|err| {
                    tracing::warn!(turn_seq, error = %err, "trainer options failed");
                    fallback::trainer_options()
                });

            let mut state = shared.write().await;
            if !state.trainer.resolve(turn_seq, options) {
                tracing::debug!(turn_seq, "discarding stale trainer options");
            }
        }));
    }

    /// The options for the newest turn, if they have arrived.
    pub async fn trainer_options(&self) -> Option<TrainerOptionsSet> {
        self.state.read().await.trainer.ready().cloned()
    }

    /// Waits for the in-flight trainer refresh, then returns what it produced.
    pub async fn wait_for_trainer_options(&self) -> Option<TrainerOptionsSet> {
        let task = self.state.write().await.trainer_task.take();
        if let Some(task) = task {
            // An aborted refresh simply leaves the slot as the newer turn set it.
            let _ = task.await;
        }
        self.trainer_options().await
    }

    /// Submits the trainer option shown at `index` (0-based) as the user's turn.
    pub async fn choose_trainer_option(&self, index: usize) -> Result<TurnOutcome> {
        let text = {
            let state = self.state.read().await;
            let set = state
                .trainer
                .ready()
                .ok_or_else(|| ParleyError::not_found("trainer options", state.turn_seq.to_string()))?;
            let (tone, text) = set
                .pick(index)
                .ok_or_else(|| ParleyError::not_found("trainer option", (index + 1).to_string()))?;
            tracing::debug!(%tone, "trainer option chosen");
            text.to_string()
        };
        self.submit_turn(&text).await
    }

    /// Switches to replay, parked at the newest step.
    pub async fn enter_replay(&self) -> SessionView {
        let mut state = self.state.write().await;
        state.view_mode = ViewMode::Replay;
        let total = state.history.len();
        state.cursor.sync(total);
        self.render(&state)
    }

    /// Back to the live view. History and metrics are exactly as before.
    pub async fn exit_replay(&self) -> SessionView {
        let mut state = self.state.write().await;
        state.view_mode = ViewMode::Live;
        self.render(&state)
    }

    /// Moves the replay cursor to `step`; `step` may not exceed committed history.
    pub async fn replay_seek(&self, step: usize) -> Result<SessionView> {
        let mut state = self.state.write().await;
        let available = state.history.len();
        if step > available {
            return Err(ParleyError::ReplayOutOfRange {
                requested: step,
                available,
            });
        }
        state.cursor.seek(step);
        state.view()
    }

    pub async fn replay_step_backward(&self) -> SessionView {
        let mut state = self.state.write().await;
        state.cursor.step_backward();
        self.render(&state)
    }

    pub async fn replay_step_forward(&self) -> SessionView {
        let mut state = self.state.write().await;
        state.cursor.step_forward();
        self.render(&state)
    }

    /// The view for whichever mode is active.
    pub async fn view(&self) -> SessionView {
        let state = self.state.read().await;
        self.render(&state)
    }

    // Cursor steps are clamped to committed history, so projection cannot fail;
    // the live view is the fallback should that ever change.
    fn render(&self, state: &SessionState) -> SessionView {
        state.view().unwrap_or_else(|err| {
            tracing::warn!(error = %err, "replay projection failed, showing live view");
            SessionView {
                mode: ViewMode::Live,
                messages: state.history.entries().cloned().collect(),
                metrics: state.current_metrics.clone(),
                phase: state.phase,
                step: state.cursor.total(),
                total: state.cursor.total(),
            }
        })
    }

    pub async fn phase(&self) -> TurnPhase {
        self.state.read().await.phase
    }

    pub async fn view_mode(&self) -> ViewMode {
        self.state.read().await.view_mode
    }

    pub async fn turn_seq(&self) -> u64 {
        self.state.read().await.turn_seq
    }

    pub async fn current_metrics(&self) -> Metrics {
        self.state.read().await.current_metrics.clone()
    }

    /// Snapshot of the history (placeholder excluded from `committed()`).
    pub async fn history(&self) -> History {
        self.state.read().await.history.clone()
    }

    pub async fn scenario(&self) -> Scenario {
        self.state.read().await.scenario.clone()
    }
}
