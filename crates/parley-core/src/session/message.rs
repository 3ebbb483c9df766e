//! Conversation message types.

use serde::{Deserialize, Serialize};

use crate::metrics::Metrics;

/// Who wrote a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Sender {
    /// The person practising the conversation.
    User,
    /// The role-played persona.
    Ai,
}

/// Per-turn analysis attached to a user message.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnAnalysis {
    pub reason: String,
    pub persuasion: i16,
    pub agreement: i16,
    pub engagement: i16,
    pub agitation: i16,
}

impl TurnAnalysis {
    /// Mirrors the justification and deltas of a snapshot (absent deltas are zero).
    pub fn from_metrics(metrics: &Metrics) -> Self {
        let deltas = metrics.deltas_or_zero();
        Self {
            reason: metrics.change_reason.clone().unwrap_or_default(),
            persuasion: deltas.persuasion,
            agreement: deltas.agreement,
            engagement: deltas.engagement,
            agitation: deltas.agitation,
        }
    }
}

/// Sender-specific annotation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Annotation {
    /// The persona's note on its own strategy (AI messages).
    Insight(String),
    /// How the user's message moved the metrics (user messages).
    Analysis(TurnAnalysis),
}

/// A single message in a conversation history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    /// Position in the history.
    pub id: usize,
    pub sender: Sender,
    pub text: String,
    /// Metrics in effect right after this message.
    pub metrics: Metrics,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub annotation: Option<Annotation>,
    /// Timestamp when the message was created (ISO 8601 format).
    pub created_at: String,
}

impl Message {
    pub(crate) fn new(id: usize, sender: Sender, text: impl Into<String>, metrics: Metrics) -> Self {
        Self {
            id,
            sender,
            text: text.into(),
            metrics,
            annotation: None,
            created_at: chrono::Utc::now().to_rfc3339(),
        }
    }

    pub fn is_user(&self) -> bool {
        self.sender == Sender::User
    }

    pub fn insight(&self) -> Option<&str> {
        match &self.annotation {
            Some(Annotation::Insight(insight)) => Some(insight),
            _ => None,
        }
    }

    pub fn analysis(&self) -> Option<&TurnAnalysis> {
        match &self.annotation {
            Some(Annotation::Analysis(analysis)) => Some(analysis),
            _ => None,
        }
    }
}
