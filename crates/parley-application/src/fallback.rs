//! Values substituted when an external call fails or times out.
//!
//! Every call the simulator makes has a total fallback, so a turn always
//! completes and the session can always continue.

use parley_core::scenario::{PersonaTips, ScenarioDraft};
use parley_core::trainer::TrainerOptions;

/// Justification recorded when the analysis call fails.
pub const ANALYSIS_FAILED: &str = "Analysis failed.";

pub const REPLY_TEXT: &str = "Sorry, I encountered an error. Please try again.";
pub const REPLY_INSIGHT: &str = "Error in generation.";

pub const SUGGESTIONS_APOLOGY: &str = "Sorry, couldn't generate suggestions right now.";

pub fn trainer_options() -> TrainerOptions {
    TrainerOptions {
        positive: "I understand your position, but my situation is...".to_string(),
        neutral: "Okay, I see.".to_string(),
        negative: "This is unacceptable!".to_string(),
    }
}

pub fn suggestions() -> Vec<String> {
    vec![SUGGESTIONS_APOLOGY.to_string()]
}

pub fn persona_tips() -> PersonaTips {
    PersonaTips {
        dos: vec!["Be clear and concise.".to_string()],
        donts: vec!["Don't be overly aggressive.".to_string()],
    }
}

/// Error-shaped draft. Its objective is empty, so it never builds into a scenario.
pub fn scenario_draft() -> ScenarioDraft {
    ScenarioDraft {
        title: "Error".to_string(),
        description: "Could not generate suggestions. Please try again.".to_string(),
        user_objective: String::new(),
        persona_name: "ErrorBot".to_string(),
        persona_role: "Error Bot".to_string(),
        persona_key_traits: vec!["buggy".to_string()],
        persona_motivations: "An error occurred.".to_string(),
        initial_ai_message: "Sorry, I couldn't generate a scenario.".to_string(),
    }
}
