//! Append-only conversation history.

use serde::{Deserialize, Serialize};

use super::message::{Annotation, Message, Sender, TurnAnalysis};
use crate::error::{ParleyError, Result};
use crate::metrics::Metrics;
use crate::scenario::Scenario;

/// Text of the in-flight reply placeholder.
pub const PLACEHOLDER_TEXT: &str = "...";

/// The definitive session record.
///
/// Committed messages never move once appended. While a turn is outstanding
/// a single transient placeholder sits after them; it is visible through
/// [`History::entries`] but never part of [`History::committed`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct History {
    messages: Vec<Message>,
    #[serde(skip)]
    placeholder: Option<Message>,
}

impl History {
    /// Seeds the history with the scenario's opening AI message.
    pub fn start(scenario: &Scenario) -> Self {
        Self {
            messages: vec![Message::new(
                0,
                Sender::Ai,
                scenario.initial_ai_message.clone(),
                scenario.initial_metrics.clone(),
            )],
            placeholder: None,
        }
    }

    /// Committed messages, placeholder excluded.
    pub fn committed(&self) -> &[Message] {
        &self.messages
    }

    /// Number of committed messages.
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    /// Committed messages followed by the placeholder, if any.
    pub fn entries(&self) -> impl Iterator<Item = &Message> {
        self.messages.iter().chain(self.placeholder.iter())
    }

    pub fn has_placeholder(&self) -> bool {
        self.placeholder.is_some()
    }

    pub fn last(&self) -> Option<&Message> {
        self.messages.last()
    }

    pub fn last_metrics(&self) -> Option<&Metrics> {
        self.messages.last().map(|m| &m.metrics)
    }

    /// The `count` most recent committed messages.
    pub fn recent(&self, count: usize) -> &[Message] {
        let start = self.messages.len().saturating_sub(count);
        &self.messages[start..]
    }

    /// Appends a user message carrying the pre-turn metrics. Returns its id.
    pub fn push_user(&mut self, text: impl Into<String>, metrics: Metrics) -> Result<usize> {
        if self.placeholder.is_some() {
            return Err(ParleyError::TurnInProgress);
        }
        let id = self.messages.len();
        self.messages.push(Message::new(id, Sender::User, text, metrics));
        Ok(id)
    }

    /// Opens the transient reply placeholder at the tail.
    pub fn open_placeholder(&mut self, metrics: Metrics) -> Result<()> {
        if self.placeholder.is_some() {
            return Err(ParleyError::TurnInProgress);
        }
        self.placeholder = Some(Message::new(
            self.messages.len(),
            Sender::Ai,
            PLACEHOLDER_TEXT,
            metrics,
        ));
        Ok(())
    }

    /// Replaces a user message's metrics with the analysed snapshot and
    /// attaches the matching analysis annotation.
    pub fn annotate_user(&mut self, id: usize, metrics: Metrics) -> Result<&Message> {
        let message = self
            .messages
            .get_mut(id)
            .filter(|m| m.is_user())
            .ok_or_else(|| ParleyError::not_found("user message", id.to_string()))?;
        message.annotation = Some(Annotation::Analysis(TurnAnalysis::from_metrics(&metrics)));
        message.metrics = metrics;
        Ok(message)
    }

    /// Replaces the placeholder with the real AI reply.
    pub fn commit_reply(
        &mut self,
        text: impl Into<String>,
        insight: impl Into<String>,
        metrics: Metrics,
    ) -> Result<&Message> {
        if self.placeholder.take().is_none() {
            return Err(ParleyError::internal("no reply placeholder is open"));
        }
        let mut message = Message::new(self.messages.len(), Sender::Ai, text, metrics);
        message.annotation = Some(Annotation::Insight(insight.into()));
        self.messages.push(message);
        Ok(&self.messages[self.messages.len() - 1])
    }

    /// Drops the placeholder without committing anything.
    pub fn discard_placeholder(&mut self) {
        self.placeholder = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::default_scenarios;

    fn started() -> (Scenario, History) {
        let scenario = default_scenarios().remove(0);
        let history = History::start(&scenario);
        (scenario, history)
    }

    #[test]
    fn test_start_seeds_initial_message() {
        let (scenario, history) = started();
        assert_eq!(history.len(), 1);
        let first = &history.committed()[0];
        assert_eq!(first.sender, Sender::Ai);
        assert_eq!(first.text, scenario.initial_ai_message);
        assert_eq!(first.metrics, scenario.initial_metrics);
    }

    #[test]
    fn test_placeholder_is_never_committed() {
        let (scenario, mut history) = started();
        let id = history
            .push_user("I want a refund", scenario.initial_metrics.clone())
            .unwrap();
        history
            .open_placeholder(scenario.initial_metrics.clone())
            .unwrap();

        assert_eq!(id, 1);
        assert_eq!(history.len(), 2);
        assert_eq!(history.entries().count(), 3);
        assert_eq!(history.entries().last().unwrap().text, PLACEHOLDER_TEXT);
        assert!(history.committed().iter().all(|m| m.text != PLACEHOLDER_TEXT));

        let reply = history
            .commit_reply("Let me check.", "Buying time", scenario.initial_metrics.clone())
            .unwrap();
        assert_eq!(reply.id, 2);
        assert_eq!(reply.insight(), Some("Buying time"));
        assert!(!history.has_placeholder());
        assert_eq!(history.entries().count(), 3);
    }

    #[test]
    fn test_second_placeholder_is_rejected() {
        let (scenario, mut history) = started();
        history
            .open_placeholder(scenario.initial_metrics.clone())
            .unwrap();
        assert_eq!(
            history.open_placeholder(scenario.initial_metrics.clone()),
            Err(ParleyError::TurnInProgress)
        );
        assert_eq!(
            history.push_user("again", scenario.initial_metrics.clone()),
            Err(ParleyError::TurnInProgress)
        );
    }

    #[test]
    fn test_annotate_user_rejects_ai_messages() {
        let (scenario, mut history) = started();
        let err = history
            .annotate_user(0, scenario.initial_metrics.clone())
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_commit_without_placeholder_fails() {
        let (scenario, mut history) = started();
        assert!(history
            .commit_reply("hi", "none", scenario.initial_metrics.clone())
            .is_err());
    }

    #[test]
    fn test_recent_returns_tail() {
        let (scenario, mut history) = started();
        for i in 0..3 {
            history
                .push_user(format!("msg {i}"), scenario.initial_metrics.clone())
                .unwrap();
        }
        let recent = history.recent(2);
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[1].text, "msg 2");
        assert_eq!(history.recent(10).len(), 4);
    }
}
