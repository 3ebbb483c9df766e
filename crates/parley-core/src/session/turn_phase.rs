//! Turn state for a chat session.

use serde::{Deserialize, Serialize};
use strum::Display;

/// Where the session is within a turn.
///
/// Anything other than `Idle` means a turn is outstanding and new
/// submissions must be refused.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum TurnPhase {
    /// Waiting for user input.
    #[default]
    Idle,
    /// The user message is recorded; the analysis call is in flight.
    AwaitingAnalysis,
    /// Analysis is folded in; the reply call is in flight.
    AwaitingReply,
}

impl TurnPhase {
    pub fn is_idle(self) -> bool {
        self == TurnPhase::Idle
    }
}
