//! Response schemas sent as `generationConfig.responseSchema`.
//!
//! Gemini accepts an OpenAPI subset with upper-case type names.

use serde_json::{Value, json};

/// New metric values after the latest user message plus a justification.
pub fn analysis() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "changeReason": {
                "type": "STRING",
                "description": "A brief, 20-word-max explanation for why the metrics changed based on the user's last message."
            },
            "persuasion": {
                "type": "INTEGER",
                "description": "An integer from 0-100 representing the user's current persuasion level."
            },
            "agreement": {
                "type": "INTEGER",
                "description": "An integer from 0-100 representing the user's current agreement level."
            },
            "engagement": {
                "type": "INTEGER",
                "description": "An integer from 0-100 representing the user's current engagement level."
            },
            "agitation": {
                "type": "INTEGER",
                "description": "An integer from 0-100 representing the user's current agitation level."
            }
        },
        "required": ["changeReason", "persuasion", "agreement", "engagement", "agitation"]
    })
}

/// The persona's reply and self-insight.
pub fn reply() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "response": {
                "type": "STRING",
                "description": "The AI's response to the user."
            },
            "insight": {
                "type": "STRING",
                "description": "A brief, 20-word-max insight into the AI's own conversational strategy with its response."
            }
        },
        "required": ["response", "insight"]
    })
}

pub fn trainer_options() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "positive": {
                "type": "STRING",
                "description": "A response that is likely to advance the user's objective."
            },
            "neutral": {
                "type": "STRING",
                "description": "A response that is passive or doesn't significantly alter the conversation's direction."
            },
            "negative": {
                "type": "STRING",
                "description": "A response that is likely to harm the user's objective or worsen the situation."
            }
        },
        "required": ["positive", "neutral", "negative"]
    })
}

pub fn persona_tips() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "dos": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 2-3 brief 'Do' tips for the user."
            },
            "donts": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "A list of 2-3 brief 'Don't' tips for the user."
            }
        },
        "required": ["dos", "donts"]
    })
}

/// A complete custom scenario drafted from an idea.
pub fn scenario_suggestion() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "title": { "type": "STRING", "description": "A concise, engaging title for the scenario." },
            "description": { "type": "STRING", "description": "A description of the user's role and the situation." },
            "userObjective": { "type": "STRING", "description": "The user's specific goal in the conversation." },
            "aiPersonaName": { "type": "STRING", "description": "A plausible name for the AI character." },
            "aiPersonaRole": { "type": "STRING", "description": "The AI character's job or role in the scenario." },
            "aiPersonaKeyTraits": {
                "type": "ARRAY",
                "items": { "type": "STRING" },
                "description": "An array of 3-4 key personality traits for the AI."
            },
            "aiPersonaMotivations": { "type": "STRING", "description": "The core motivation or goal of the AI character in this conversation." },
            "initialAiMessage": { "type": "STRING", "description": "The first thing the AI says to start the conversation." }
        },
        "required": [
            "title",
            "description",
            "userObjective",
            "aiPersonaName",
            "aiPersonaRole",
            "aiPersonaKeyTraits",
            "aiPersonaMotivations",
            "initialAiMessage"
        ]
    })
}
