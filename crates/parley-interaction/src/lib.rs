//! Generative model access for Parley.
//!
//! `GeminiApiAgent` is the raw transport. `GeminiConversationAgent` turns any
//! `LanguageModel` into the domain's `ConversationAgent` port.

pub mod contracts;
pub mod conversation_agent;
pub mod gemini_api_agent;
pub mod language_model;
pub mod prompts;
pub mod schema;

pub use conversation_agent::GeminiConversationAgent;
pub use gemini_api_agent::GeminiApiAgent;
pub use language_model::{Content, GenerationRequest, LanguageModel, Role};
