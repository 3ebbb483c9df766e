//! Application layer for Parley.
//!
//! Coordinates the domain types of `parley-core` with any
//! `ConversationAgent`: the turn orchestrator, session start-up and the
//! advisory requests. Every external failure is absorbed here into a
//! fallback value.

pub mod advisory_service;
mod bounded;
pub mod fallback;
pub mod session;

pub use advisory_service::AdvisoryService;
pub use session::{ChatSession, SessionFactory, SessionView, TurnOutcome};
