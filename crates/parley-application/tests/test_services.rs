mod support;

use parley_application::{AdvisoryService, SessionFactory, fallback};
use parley_core::config::SessionSettings;
use parley_core::scenario::{PersonaTips, ScenarioBuilder, ScenarioDraft, default_scenarios};
use parley_core::session::History;
use std::sync::Arc;
use std::sync::atomic::Ordering;
use std::time::Duration;
use support::{MockAgent, Script};

fn settings(fetch_persona_tips: bool) -> SessionSettings {
    SessionSettings {
        request_timeout_secs: 5,
        fetch_persona_tips,
    }
}

#[tokio::test]
async fn test_factory_applies_persona_tips_once() {
    let agent = Arc::new(MockAgent::new());
    *agent.tips.lock().unwrap() = Some(Script::Answer(PersonaTips {
        dos: vec!["Mention the warranty.".to_string()],
        donts: vec!["Don't threaten a chargeback.".to_string()],
    }));
    let factory = SessionFactory::new(agent.clone(), &settings(true));

    let session = factory.start(default_scenarios().remove(2)).await;
    let tips = session.scenario().await.persona.tips.expect("tips applied");
    assert_eq!(tips.dos, vec!["Mention the warranty."]);
    assert_eq!(agent.tips_calls.load(Ordering::SeqCst), 1);

    session.submit_turn("Hi").await.unwrap();
    assert_eq!(agent.tips_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_factory_falls_back_to_literal_tips() {
    let agent = Arc::new(MockAgent::new());
    *agent.tips.lock().unwrap() = Some(Script::Fail);
    let factory = SessionFactory::new(agent.clone(), &settings(true));

    let session = factory.start(default_scenarios().remove(2)).await;
    let tips = session.scenario().await.persona.tips.unwrap();
    assert_eq!(tips.dos, vec!["Be clear and concise."]);
    assert_eq!(tips.donts, vec!["Don't be overly aggressive."]);
}

#[tokio::test]
async fn test_factory_skips_tips_when_disabled() {
    let agent = Arc::new(MockAgent::new());
    let factory = SessionFactory::new(agent.clone(), &settings(false));

    let session = factory.start(default_scenarios().remove(2)).await;
    assert_eq!(session.scenario().await.persona.tips, None);
    assert_eq!(agent.tips_calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_suggestions_are_parsed_from_recent_messages() {
    let agent = Arc::new(MockAgent::new());
    *agent.suggestions_text.lock().unwrap() = Some(Script::Answer(
        "1. Point to your open-source work.\n\n2.  Quote the market rate.\n3. Ask about the review cycle.\n"
            .to_string(),
    ));
    let advisory = AdvisoryService::new(agent.clone(), Duration::from_secs(5));

    let scenario = default_scenarios().remove(1);
    let mut history = History::start(&scenario);
    for text in ["Thanks!", "Could we revisit the base?", "I have another offer."] {
        history.push_user(text, scenario.initial_metrics.clone()).unwrap();
    }
    history.push_user("Well?", scenario.initial_metrics.clone()).unwrap();

    let suggestions = advisory.suggestions(&history, &scenario).await;
    assert_eq!(
        suggestions,
        vec![
            "Point to your open-source work.",
            "Quote the market rate.",
            "Ask about the review cycle."
        ]
    );

    let requests = agent.suggestion_requests.lock().unwrap().clone();
    assert_eq!(requests[0].len(), 4);
    assert_eq!(requests[0][0].text, "Thanks!");
}

#[tokio::test]
async fn test_failed_suggestions_return_apology() {
    let agent = Arc::new(MockAgent::new());
    let advisory = AdvisoryService::new(agent.clone(), Duration::from_secs(5));
    let scenario = default_scenarios().remove(1);

    let suggestions = advisory
        .suggestions(&History::start(&scenario), &scenario)
        .await;
    assert_eq!(suggestions, vec!["Sorry, couldn't generate suggestions right now."]);
}

#[tokio::test]
async fn test_draft_scenario_builds_custom_scenario() {
    let agent = Arc::new(MockAgent::new());
    *agent.draft.lock().unwrap() = Some(Script::Answer(ScenarioDraft {
        title: "Landlord Dispute".to_string(),
        description: "Your heating has been broken for a week.".to_string(),
        user_objective: "Get the heating fixed by Friday.".to_string(),
        persona_name: "Mr. Grant".to_string(),
        persona_role: "Landlord".to_string(),
        persona_key_traits: vec!["Busy".to_string(), "Frugal".to_string()],
        persona_motivations: "Avoid expensive repairs.".to_string(),
        initial_ai_message: "What is it this time?".to_string(),
    }));
    let advisory = AdvisoryService::new(agent.clone(), Duration::from_secs(5));

    let draft = advisory.draft_scenario("broken heating").await;
    let scenario = ScenarioBuilder::new(draft).trainer_mode(true).build().unwrap();
    assert!(scenario.id.starts_with("custom-"));
    assert!(scenario.trainer_mode);
    assert_eq!(scenario.persona.name, "Mr. Grant");
}

#[tokio::test]
async fn test_failed_draft_is_error_shaped() {
    let agent = Arc::new(MockAgent::new());
    *agent.draft.lock().unwrap() = Some(Script::Fail);
    let advisory = AdvisoryService::new(agent.clone(), Duration::from_secs(5));

    let draft = advisory.draft_scenario("anything").await;
    assert_eq!(draft, fallback::scenario_draft());
    assert_eq!(draft.title, "Error");
    assert_eq!(draft.persona_name, "ErrorBot");
    assert!(ScenarioBuilder::new(draft).build().is_err());
}
