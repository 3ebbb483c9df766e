//! Typed response contracts, validated at the boundary.
//!
//! Every model answer is decoded into one of these types before it reaches
//! the domain. A missing field, a wrong type or an out-of-range value is an
//! `InvalidResponse` error, which callers treat like any other failed call.

use parley_core::metrics::MetricsReading;
use parley_core::scenario::{PersonaTips, ScenarioDraft};
use parley_core::trainer::TrainerOptions;
use parley_core::{ParleyError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

/// Decodes a JSON answer, tolerating a surrounding markdown code fence.
pub fn decode_json<T: DeserializeOwned>(raw: &str) -> Result<T> {
    let body = strip_code_fence(raw.trim());
    serde_json::from_str(body)
        .map_err(|err| ParleyError::invalid_response(format!("{err} in {:?}", truncate(body, 120))))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    let rest = rest.strip_prefix("json").unwrap_or(rest);
    rest.strip_suffix("```").unwrap_or(rest).trim()
}

fn truncate(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

fn require_text(field: &str, value: String) -> Result<String> {
    if value.trim().is_empty() {
        Err(ParleyError::invalid_response(format!("field '{field}' is empty")))
    } else {
        Ok(value)
    }
}

/// Answer to the per-turn analysis request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResponse {
    pub change_reason: String,
    pub persuasion: i64,
    pub agreement: i64,
    pub engagement: i64,
    pub agitation: i64,
}

impl AnalysisResponse {
    /// Rejects any value outside 0..=100.
    pub fn into_reading(self) -> Result<MetricsReading> {
        for (name, value) in [
            ("persuasion", self.persuasion),
            ("agreement", self.agreement),
            ("engagement", self.engagement),
            ("agitation", self.agitation),
        ] {
            if !(0..=100).contains(&value) {
                return Err(ParleyError::invalid_response(format!(
                    "{name} = {value} is outside 0..=100"
                )));
            }
        }
        Ok(MetricsReading {
            persuasion: self.persuasion,
            agreement: self.agreement,
            engagement: self.engagement,
            agitation: self.agitation,
            change_reason: self.change_reason,
        })
    }
}

/// Answer to the reply-generation request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplyResponse {
    pub response: String,
    pub insight: String,
}

impl ReplyResponse {
    pub fn validate(self) -> Result<Self> {
        Ok(Self {
            response: require_text("response", self.response)?,
            insight: self.insight,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrainerOptionsResponse {
    pub positive: String,
    pub neutral: String,
    pub negative: String,
}

impl TrainerOptionsResponse {
    pub fn into_options(self) -> Result<TrainerOptions> {
        Ok(TrainerOptions {
            positive: require_text("positive", self.positive)?,
            neutral: require_text("neutral", self.neutral)?,
            negative: require_text("negative", self.negative)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonaTipsResponse {
    pub dos: Vec<String>,
    pub donts: Vec<String>,
}

impl From<PersonaTipsResponse> for PersonaTips {
    fn from(response: PersonaTipsResponse) -> Self {
        let clean = |items: Vec<String>| -> Vec<String> {
            items
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect()
        };
        PersonaTips {
            dos: clean(response.dos),
            donts: clean(response.donts),
        }
    }
}

/// Answer to the scenario-drafting request (flat, camelCase fields).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScenarioSuggestionResponse {
    pub title: String,
    pub description: String,
    pub user_objective: String,
    pub ai_persona_name: String,
    pub ai_persona_role: String,
    pub ai_persona_key_traits: Vec<String>,
    pub ai_persona_motivations: String,
    pub initial_ai_message: String,
}

impl From<ScenarioSuggestionResponse> for ScenarioDraft {
    fn from(response: ScenarioSuggestionResponse) -> Self {
        ScenarioDraft {
            title: response.title,
            description: response.description,
            user_objective: response.user_objective,
            persona_name: response.ai_persona_name,
            persona_role: response.ai_persona_role,
            persona_key_traits: response.ai_persona_key_traits,
            persona_motivations: response.ai_persona_motivations,
            initial_ai_message: response.initial_ai_message,
        }
    }
}
