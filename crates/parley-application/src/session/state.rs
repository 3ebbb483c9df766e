use parley_core::Result;
use parley_core::metrics::Metrics;
use parley_core::replay::{self, ReplayCursor, ViewMode};
use parley_core::scenario::Scenario;
use parley_core::session::{History, Message, TurnPhase};
use parley_core::trainer::TrainerSlot;
use tokio::task::JoinHandle;

/// Mutable state of one running session, guarded by the session's lock.
pub(crate) struct SessionState {
    pub(crate) scenario: Scenario,
    pub(crate) history: History,
    pub(crate) current_metrics: Metrics,
    pub(crate) phase: TurnPhase,
    /// Incremented at the start of every turn; 0 is the opening message.
    pub(crate) turn_seq: u64,
    pub(crate) trainer: TrainerSlot,
    pub(crate) trainer_task: Option<JoinHandle<()>>,
    pub(crate) view_mode: ViewMode,
    pub(crate) cursor: ReplayCursor,
}

impl SessionState {
    pub(crate) fn new(scenario: Scenario) -> Self {
        let history = History::start(&scenario);
        let cursor = ReplayCursor::at_end(history.len());
        Self {
            current_metrics: scenario.initial_metrics.clone(),
            scenario,
            history,
            phase: TurnPhase::Idle,
            turn_seq: 0,
            trainer: TrainerSlot::Empty,
            trainer_task: None,
            view_mode: ViewMode::Live,
            cursor,
        }
    }

    /// Aborts any in-flight trainer refresh and empties the slot.
    pub(crate) fn cancel_trainer(&mut self) {
        if let Some(task) = self.trainer_task.take() {
            task.abort();
        }
        self.trainer.clear();
    }

    /// Releases the turn guard after an unexpected history error.
    pub(crate) fn abandon_turn(&mut self) {
        self.history.discard_placeholder();
        self.phase = TurnPhase::Idle;
    }

    /// Keeps the scrubber range in step with committed history.
    ///
    /// Live sessions follow the newest message; a replay keeps its position.
    pub(crate) fn sync_cursor(&mut self) {
        let step = self.cursor.step();
        self.cursor.sync(self.history.len());
        if self.view_mode == ViewMode::Replay {
            self.cursor.seek(step);
        }
    }

    pub(crate) fn view(&self) -> Result<SessionView> {
        match self.view_mode {
            ViewMode::Live => Ok(SessionView {
                mode: ViewMode::Live,
                messages: self.history.entries().cloned().collect(),
                metrics: self.current_metrics.clone(),
                phase: self.phase,
                step: self.cursor.total(),
                total: self.cursor.total(),
            }),
            ViewMode::Replay => {
                let frame = replay::project(
                    &self.history,
                    &self.scenario.initial_metrics,
                    self.cursor.step(),
                )?;
                Ok(SessionView {
                    mode: ViewMode::Replay,
                    messages: frame.messages.to_vec(),
                    metrics: frame.metrics,
                    phase: self.phase,
                    step: self.cursor.step(),
                    total: self.cursor.total(),
                })
            }
        }
    }
}

/// What a front end renders for the active view mode.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionView {
    pub mode: ViewMode,
    /// Live views include the reply placeholder while a turn is outstanding.
    pub messages: Vec<Message>,
    pub metrics: Metrics,
    pub phase: TurnPhase,
    /// Replay position; equals `total` in live mode.
    pub step: usize,
    pub total: usize,
}
