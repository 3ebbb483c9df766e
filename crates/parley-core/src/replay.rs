//! Read-only projection of committed history for scrubbing.

use serde::{Deserialize, Serialize};

use crate::error::{ParleyError, Result};
use crate::metrics::Metrics;
use crate::session::{History, Message};

/// Whether a session shows live state or a replayed prefix.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewMode {
    #[default]
    Live,
    Replay,
}

/// The first `n` committed messages and the metrics as of the n-th.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplayFrame<'a> {
    pub messages: &'a [Message],
    pub metrics: Metrics,
}

/// Projects the prefix of length `step`.
///
/// `step == 0` yields no messages and `initial_metrics`. The placeholder is
/// never part of a frame, and `history` is only read.
pub fn project<'a>(
    history: &'a History,
    initial_metrics: &Metrics,
    step: usize,
) -> Result<ReplayFrame<'a>> {
    let committed = history.committed();
    if step > committed.len() {
        return Err(ParleyError::ReplayOutOfRange {
            requested: step,
            available: committed.len(),
        });
    }
    let messages = &committed[..step];
    let metrics = messages
        .last()
        .map(|m| m.metrics.clone())
        .unwrap_or_else(|| initial_metrics.clone());
    Ok(ReplayFrame { messages, metrics })
}

/// Scrubber position over `0..=total`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ReplayCursor {
    step: usize,
    total: usize,
}

impl ReplayCursor {
    /// A cursor parked at the newest step.
    pub fn at_end(total: usize) -> Self {
        Self { step: total, total }
    }

    pub fn step(&self) -> usize {
        self.step
    }

    pub fn total(&self) -> usize {
        self.total
    }

    pub fn step_backward(&mut self) -> usize {
        self.step = self.step.saturating_sub(1);
        self.step
    }

    pub fn step_forward(&mut self) -> usize {
        self.step = (self.step + 1).min(self.total);
        self.step
    }

    pub fn seek(&mut self, step: usize) -> usize {
        self.step = step.min(self.total);
        self.step
    }

    /// Follows history growth: the cursor jumps to the new end.
    pub fn sync(&mut self, total: usize) {
        *self = Self::at_end(total);
    }

    pub fn can_step_backward(&self) -> bool {
        self.step > 0
    }

    pub fn can_step_forward(&self) -> bool {
        self.step < self.total
    }
}
