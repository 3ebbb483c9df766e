//! GeminiApiAgent - Direct REST API implementation for Gemini.
//!
//! Calls `models/{model}:generateContent` and returns the first text part
//! of the first candidate. Structured output is requested through
//! `generationConfig.responseSchema`.

use async_trait::async_trait;
use parley_core::config::ParleyConfig;
use parley_core::{ParleyError, Result};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;

use crate::language_model::{Content, GenerationRequest, LanguageModel};

const BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta/models";
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Agent implementation that talks to the Gemini HTTP API.
#[derive(Clone)]
pub struct GeminiApiAgent {
    client: Client,
    api_key: String,
    model: String,
    base_url: String,
    timeout: Duration,
}

impl GeminiApiAgent {
    /// Creates a new agent with the provided API key, model and request timeout.
    pub fn new(
        api_key: impl Into<String>,
        model: impl Into<String>,
        timeout: Duration,
    ) -> Result<Self> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|err| ParleyError::config(format!("Failed to build HTTP client: {err}")))?;
        Ok(Self {
            client,
            api_key: api_key.into(),
            model: model.into(),
            base_url: BASE_URL.to_string(),
            timeout,
        })
    }

    /// Builds an agent from the loaded configuration (key, model, timeout).
    pub fn from_config(config: &ParleyConfig) -> Result<Self> {
        Self::new(
            config.resolve_api_key()?,
            config.gemini.model.clone(),
            config.session.request_timeout(),
        )
    }

    /// Overrides the model after construction.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// Points the agent at a different endpoint root (proxies, test servers).
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    async fn send_request(&self, body: &GenerateContentRequest) -> Result<String> {
        let url = format!("{}/{}:generateContent", self.base_url, self.model);
        tracing::debug!(model = %self.model, turns = body.contents.len(), "sending Gemini request");

        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.api_key)
            .json(body)
            .send()
            .await
            .map_err(|err| self.map_transport_error(err))?;

        if !response.status().is_success() {
            let status = response.status();
            let body_text = response
                .text()
                .await
                .unwrap_or_else(|_| "Failed to read Gemini error body".to_string());
            return Err(map_http_error(status, body_text));
        }

        let parsed: GenerateContentResponse = response.json().await.map_err(|err| {
            ParleyError::invalid_response(format!("Failed to parse Gemini response: {err}"))
        })?;

        extract_text_response(parsed)
    }

    fn map_transport_error(&self, err: reqwest::Error) -> ParleyError {
        if err.is_timeout() {
            ParleyError::Timeout {
                seconds: self.timeout.as_secs(),
            }
        } else {
            ParleyError::model(format!("Gemini API request failed: {err}"))
        }
    }
}

#[async_trait]
impl LanguageModel for GeminiApiAgent {
    async fn generate(&self, request: GenerationRequest) -> Result<String> {
        if request.contents.iter().all(|c| c.text.trim().is_empty()) {
            return Err(ParleyError::internal(
                "Gemini payload must include non-empty text",
            ));
        }
        let body = GenerateContentRequest::from(request);
        self.send_request(&body).await
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<ContentPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation_config: Option<GenerationConfig>,
}

impl From<GenerationRequest> for GenerateContentRequest {
    fn from(request: GenerationRequest) -> Self {
        Self {
            contents: request.contents.into_iter().map(ContentPayload::from).collect(),
            generation_config: request.response_schema.map(|schema| GenerationConfig {
                response_mime_type: "application/json".to_string(),
                response_schema: schema,
            }),
        }
    }
}

#[derive(Serialize)]
struct ContentPayload {
    role: crate::language_model::Role,
    parts: Vec<Part>,
}

impl From<Content> for ContentPayload {
    fn from(content: Content) -> Self {
        Self {
            role: content.role,
            parts: vec![Part { text: content.text }],
        }
    }
}

#[derive(Serialize)]
struct Part {
    text: String,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: String,
    response_schema: Value,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    candidates: Option<Vec<Candidate>>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<ContentResponse>,
}

#[derive(Deserialize)]
struct ContentResponse {
    #[serde(default)]
    parts: Vec<PartResponse>,
}

#[derive(Deserialize)]
struct PartResponse {
    text: Option<String>,
}

#[derive(Deserialize)]
struct ErrorWrapper {
    error: ErrorBody,
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
    status: Option<String>,
}

fn extract_text_response(response: GenerateContentResponse) -> Result<String> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts.into_iter().find_map(|part| part.text))
        .ok_or_else(|| ParleyError::model("Gemini API returned no text in the response candidates"))
}

fn map_http_error(status: StatusCode, body: String) -> ParleyError {
    let message = serde_json::from_str::<ErrorWrapper>(&body)
        .map(|wrapper| {
            let status_text = wrapper.error.status.unwrap_or_default();
            let msg = wrapper.error.message.unwrap_or_else(|| body.clone());
            if status_text.is_empty() {
                msg
            } else {
                format!("{status_text}: {msg}")
            }
        })
        .unwrap_or_else(|_| body.clone());

    tracing::warn!(status = status.as_u16(), %message, "Gemini API returned an error");
    ParleyError::model_status(status.as_u16(), message)
}
