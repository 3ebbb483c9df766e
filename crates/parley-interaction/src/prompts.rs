//! Prompt templates (Jinja2 syntax, rendered with minijinja).

use minijinja::Environment;
use parley_core::metrics::Metrics;
use parley_core::scenario::Scenario;
use parley_core::session::{Message, Sender};
use parley_core::{ParleyError, Result};
use serde::Serialize;

/// The model's first turn in every role-play conversation.
pub const ROLEPLAY_ACK: &str = "Understood. I will stick to my character.";

const ROLEPLAY_PREFACE_TEMPLATE: &str = "SYSTEM: You are in a role-play scenario. Do not break character. Your name is {{ name }}. Your persona: {{ biography }}";

const ANALYSIS_TEMPLATE: &str = r#"Analyze the last user message in the context of this conversation.
Your persona is: {{ biography }}
The user's objective is: {{ objective }}
The conversation history is:
{% for line in history -%}
{{ line.speaker }}: {{ line.text }}
{% endfor %}
The user's latest message is: "{{ user_text }}"

The PREVIOUS metrics were:
- Persuasion: {{ previous.persuasion }}%
- Agreement: {{ previous.agreement }}%
- Engagement: {{ previous.engagement }}%
- Agitation: {{ previous.agitation }}%

Based on the user's last message, provide the NEW, updated values for these four metrics.
Also, provide a brief "changeReason" explaining the metric changes.
Return ONLY the JSON object."#;

const SUGGESTIONS_TEMPLATE: &str = r#"You are a conversational coach. Based on the following scenario and conversation history, provide three brief, distinct suggestions for what the user could say next to better achieve their objective.

Scenario:
- User's Objective: {{ objective }}
- AI's Persona: {{ biography }}

Conversation History (last few messages):
{% for line in history -%}
{{ line.speaker }}: {{ line.text }}
{% endfor %}
Provide three distinct, actionable suggestions for the user's next message. Each suggestion should be a single sentence."#;

const TRAINER_OPTIONS_TEMPLATE: &str = r#"You are a conversational training AI. Your task is to generate three potential responses for the user in a role-play scenario.
The user's objective is: {{ objective }}
The AI persona they are talking to is: {{ biography }}
The conversation history is:
{% for line in history -%}
{{ line.speaker }}: {{ line.text }}
{% endfor %}
Based on the last message from the AI, generate three distinct responses for the USER.
1. A 'positive' response that is assertive, strategic, and likely to advance the user's objective.
2. A 'neutral' response that is passive, safe, or doesn't significantly change the conversation's direction.
3. A 'negative' response that is counter-productive, aggressive, or likely to harm the user's chances of success.

Return ONLY the JSON object with the three responses."#;

const PERSONA_TIPS_TEMPLATE: &str = r#"Based on the AI persona and the user's objective, generate a short list of "Do's" and "Don'ts" to help the user succeed.

AI Persona: {{ biography }}
User's Objective: {{ objective }}

Provide 2-3 brief "Do" tips and 2-3 brief "Don't" tips.
Return ONLY the JSON object."#;

const SCENARIO_TEMPLATE: &str = r#"You are a creative assistant designing a role-play conversation scenario.
Based on the user's idea, generate a complete and coherent scenario. All the fields must logically connect to create a believable situation.

User's Idea: "{{ idea }}"

Generate all the necessary fields for the scenario.
Return ONLY the JSON object."#;

/// How speakers are labelled in a transcript.
#[derive(Debug, Clone, Copy)]
enum SpeakerStyle {
    /// `user:` / `ai:`
    Lower,
    /// `USER:` / `AI:`
    Upper,
}

#[derive(Serialize)]
struct TranscriptLine<'a> {
    speaker: &'static str,
    text: &'a str,
}

fn transcript(messages: &[Message], style: SpeakerStyle) -> Vec<TranscriptLine<'_>> {
    messages
        .iter()
        .map(|m| TranscriptLine {
            speaker: match (m.sender, style) {
                (Sender::User, SpeakerStyle::Lower) => "user",
                (Sender::Ai, SpeakerStyle::Lower) => "ai",
                (Sender::User, SpeakerStyle::Upper) => "USER",
                (Sender::Ai, SpeakerStyle::Upper) => "AI",
            },
            text: &m.text,
        })
        .collect()
}

fn render<S: Serialize>(template: &str, ctx: S) -> Result<String> {
    Environment::new()
        .render_str(template, ctx)
        .map_err(|err| ParleyError::Template(err.to_string()))
}

#[derive(Serialize)]
struct PrefaceContext<'a> {
    name: &'a str,
    biography: String,
}

pub fn roleplay_preface(scenario: &Scenario) -> Result<String> {
    render(
        ROLEPLAY_PREFACE_TEMPLATE,
        PrefaceContext {
            name: &scenario.persona.name,
            biography: scenario.persona.biography(),
        },
    )
}

#[derive(Serialize)]
struct AnalysisContext<'a> {
    biography: String,
    objective: &'a str,
    history: Vec<TranscriptLine<'a>>,
    user_text: &'a str,
    previous: &'a Metrics,
}

pub fn analysis(
    prior: &[Message],
    scenario: &Scenario,
    user_text: &str,
    previous: &Metrics,
) -> Result<String> {
    render(
        ANALYSIS_TEMPLATE,
        AnalysisContext {
            biography: scenario.persona.biography(),
            objective: &scenario.user_objective,
            history: transcript(prior, SpeakerStyle::Lower),
            user_text,
            previous,
        },
    )
}

#[derive(Serialize)]
struct CoachingContext<'a> {
    biography: String,
    objective: &'a str,
    history: Vec<TranscriptLine<'a>>,
}

impl<'a> CoachingContext<'a> {
    fn new(recent: &'a [Message], scenario: &'a Scenario) -> Self {
        Self {
            biography: scenario.persona.biography(),
            objective: &scenario.user_objective,
            history: transcript(recent, SpeakerStyle::Upper),
        }
    }
}

pub fn suggestions(recent: &[Message], scenario: &Scenario) -> Result<String> {
    render(SUGGESTIONS_TEMPLATE, CoachingContext::new(recent, scenario))
}

pub fn trainer_options(recent: &[Message], scenario: &Scenario) -> Result<String> {
    render(TRAINER_OPTIONS_TEMPLATE, CoachingContext::new(recent, scenario))
}

pub fn persona_tips(scenario: &Scenario) -> Result<String> {
    render(
        PERSONA_TIPS_TEMPLATE,
        CoachingContext::new(&[], scenario),
    )
}

#[derive(Serialize)]
struct ScenarioContext<'a> {
    idea: &'a str,
}

pub fn scenario_draft(idea: &str) -> Result<String> {
    render(SCENARIO_TEMPLATE, ScenarioContext { idea })
}
