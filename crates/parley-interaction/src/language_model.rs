//! Transport-level abstraction over a generative model.

use async_trait::async_trait;
use parley_core::Result;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Speaker of one entry in a model request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Model,
}

/// One turn of request content.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Content {
    pub role: Role,
    pub text: String,
}

impl Content {
    pub fn user(text: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            text: text.into(),
        }
    }

    pub fn model(text: impl Into<String>) -> Self {
        Self {
            role: Role::Model,
            text: text.into(),
        }
    }
}

/// A single generate call: ordered contents plus an optional output schema.
///
/// When `response_schema` is set the model is asked for JSON matching it.
#[derive(Debug, Clone, PartialEq)]
pub struct GenerationRequest {
    pub contents: Vec<Content>,
    pub response_schema: Option<Value>,
}

impl GenerationRequest {
    /// A one-shot prompt with free-text output.
    pub fn text(prompt: impl Into<String>) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            response_schema: None,
        }
    }

    /// A one-shot prompt constrained to a JSON schema.
    pub fn json(prompt: impl Into<String>, schema: Value) -> Self {
        Self {
            contents: vec![Content::user(prompt)],
            response_schema: Some(schema),
        }
    }

    /// A multi-turn conversation constrained to a JSON schema.
    pub fn conversation(contents: Vec<Content>, schema: Value) -> Self {
        Self {
            contents,
            response_schema: Some(schema),
        }
    }
}

/// Anything that can answer a `GenerationRequest` with raw text.
#[async_trait]
pub trait LanguageModel: Send + Sync {
    async fn generate(&self, request: GenerationRequest) -> Result<String>;
}
