mod support;

use parley_application::ChatSession;
use parley_application::fallback;
use parley_core::ParleyError;
use parley_core::replay::ViewMode;
use parley_core::scenario::{Scenario, default_scenarios};
use parley_core::session::{PLACEHOLDER_TEXT, TurnPhase};
use std::sync::Arc;
use std::time::Duration;
use support::{MockAgent, Script, reading, reply};
use tokio::sync::Notify;

const TIMEOUT: Duration = Duration::from_secs(5);

fn scenario(id: &str) -> Scenario {
    default_scenarios()
        .into_iter()
        .find(|s| s.id == id)
        .expect("preset exists")
}

#[tokio::test]
async fn test_refund_turn_records_metrics_and_deltas() {
    let agent = Arc::new(MockAgent::new());
    agent.push_reading(Script::Answer(reading(30, 35, 65, 45, "Clear, polite demand")));
    let session = ChatSession::start(scenario("customer-support"), agent.clone(), TIMEOUT).await;

    let outcome = session.submit_turn("I want a refund").await.unwrap();

    let analysis = outcome.user_message.analysis().expect("user message is annotated");
    assert_eq!(
        (analysis.persuasion, analysis.agreement, analysis.engagement, analysis.agitation),
        (10, -5, 5, -5)
    );
    assert_eq!(analysis.reason, "Clear, polite demand");

    let metrics = session.current_metrics().await;
    assert_eq!(
        (metrics.persuasion, metrics.agreement, metrics.engagement, metrics.agitation),
        (30, 35, 65, 45)
    );
    assert_eq!(outcome.metrics, metrics);
    assert_eq!(outcome.ai_message.metrics, metrics);
    assert_eq!(outcome.user_message.metrics, metrics);
    assert_eq!(outcome.turn_seq, 1);

    let previous = agent.analyze_previous.lock().unwrap().clone();
    assert_eq!(previous, vec![scenario("customer-support").initial_metrics]);
}

#[tokio::test]
async fn test_completed_turn_grows_history_by_two() {
    let agent = Arc::new(MockAgent::new());
    agent.push_reading(Script::Answer(reading(55, 50, 80, 5, "Good point")));
    agent.push_reply(Script::Answer(reply("Fine, but sweet and savoury?", "Probing")));
    let session = ChatSession::start(scenario("debate"), agent.clone(), TIMEOUT).await;

    let before = session.history().await.len();
    let outcome = session.submit_turn("Pineapple adds balance.").await.unwrap();
    let history = session.history().await;

    assert_eq!(history.len(), before + 2);
    assert!(!history.has_placeholder());
    assert!(history.committed().iter().all(|m| m.text != PLACEHOLDER_TEXT));
    assert_eq!(outcome.ai_message.text, "Fine, but sweet and savoury?");
    assert_eq!(outcome.ai_message.insight(), Some("Probing"));
    assert_eq!(session.phase().await, TurnPhase::Idle);

    // Generate sees the analysed user message as the last entry.
    let transcripts = agent.generate_transcripts.lock().unwrap().clone();
    let last = transcripts[0].last().unwrap();
    assert_eq!(last.text, "Pineapple adds balance.");
    assert!(last.analysis().is_some());
}

#[tokio::test]
async fn test_generation_failure_uses_fixed_reply() {
    let agent = Arc::new(MockAgent::new());
    agent.push_reading(Script::Answer(reading(30, 35, 65, 45, "Firm")));
    agent.push_reply(Script::Fail);
    let session = ChatSession::start(scenario("debate"), agent.clone(), TIMEOUT).await;

    let outcome = session.submit_turn("I want a refund").await.unwrap();

    assert_eq!(
        outcome.ai_message.text,
        "Sorry, I encountered an error. Please try again."
    );
    assert_eq!(outcome.ai_message.insight(), Some("Error in generation."));
    assert_eq!(outcome.ai_message.metrics, outcome.user_message.metrics);
    assert_eq!(outcome.ai_message.metrics.persuasion, 30);
}

#[tokio::test]
async fn test_analysis_failure_keeps_previous_metrics() {
    let agent = Arc::new(MockAgent::new());
    agent.push_reading(Script::Fail);
    let initial = scenario("negotiation").initial_metrics;
    let session = ChatSession::start(scenario("negotiation"), agent.clone(), TIMEOUT).await;

    let outcome = session.submit_turn("I was hoping for more.").await.unwrap();
    let metrics = &outcome.user_message.metrics;

    assert!(metrics.same_values(&initial));
    assert_eq!(metrics.change_reason.as_deref(), Some(fallback::ANALYSIS_FAILED));
    assert_eq!(metrics.deltas, None);
    let analysis = outcome.user_message.analysis().unwrap();
    assert_eq!(analysis.reason, "Analysis failed.");
    assert_eq!(analysis.persuasion, 0);
    assert!(session.current_metrics().await.same_values(&initial));
}

#[tokio::test]
async fn test_out_of_range_reading_is_treated_as_failure() {
    let agent = Arc::new(MockAgent::new());
    agent.push_reading(Script::Answer(reading(120, 35, 65, 45, "Overjoyed")));
    let initial = scenario("debate").initial_metrics;
    let session = ChatSession::start(scenario("debate"), agent.clone(), TIMEOUT).await;

    let outcome = session.submit_turn("Trust me.").await.unwrap();
    assert!(outcome.metrics.same_values(&initial));
    assert_eq!(outcome.metrics.change_reason.as_deref(), Some("Analysis failed."));
}

#[tokio::test(start_paused = true)]
async fn test_hung_calls_time_out_into_fallbacks() {
    let agent = Arc::new(MockAgent::new());
    agent.push_reading(Script::Hang);
    agent.push_reply(Script::Hang);
    let session =
        ChatSession::start(scenario("debate"), agent.clone(), Duration::from_secs(30)).await;

    let outcome = session.submit_turn("Still there?").await.unwrap();
    assert_eq!(outcome.metrics.change_reason.as_deref(), Some("Analysis failed."));
    assert_eq!(outcome.ai_message.text, fallback::REPLY_TEXT);
    assert_eq!(session.phase().await, TurnPhase::Idle);
}

#[tokio::test]
async fn test_empty_input_is_rejected() {
    let agent = Arc::new(MockAgent::new());
    let session = ChatSession::start(scenario("debate"), agent.clone(), TIMEOUT).await;

    assert_eq!(
        session.submit_turn("   \n").await.unwrap_err(),
        ParleyError::EmptyInput
    );
    assert_eq!(session.history().await.len(), 1);
    assert_eq!(agent.analyze_count(), 0);
    assert_eq!(session.turn_seq().await, 0);
}

#[tokio::test]
async fn test_second_submit_while_outstanding_is_rejected() {
    let gate = Arc::new(Notify::new());
    let agent = Arc::new(MockAgent::new().with_analyze_gate(gate.clone()));
    agent.push_reading(Script::Answer(reading(60, 55, 80, 5, "Funny")));
    let session = ChatSession::start(scenario("debate"), agent.clone(), TIMEOUT).await;

    let first = {
        let session = session.clone();
        tokio::spawn(async move { session.submit_turn("It's sweet and salty.").await })
    };
    while session.phase().await != TurnPhase::AwaitingAnalysis {
        tokio::task::yield_now().await;
    }

    let view = session.view().await;
    assert_eq!(view.messages.len(), 3);
    assert_eq!(
        view.messages.iter().filter(|m| m.text == PLACEHOLDER_TEXT).count(),
        1
    );

    let err = session.submit_turn("And another thing!").await.unwrap_err();
    assert_eq!(err, ParleyError::TurnInProgress);
    assert_eq!(agent.analyze_count(), 1);
    assert_eq!(
        session
            .view()
            .await
            .messages
            .iter()
            .filter(|m| m.text == PLACEHOLDER_TEXT)
            .count(),
        1
    );

    gate.notify_one();
    let outcome = first.await.unwrap().unwrap();
    assert_eq!(outcome.metrics.persuasion, 60);
    assert_eq!(session.history().await.len(), 3);
    assert_eq!(agent.analyze_count(), 1);
}

#[tokio::test]
async fn test_trainer_options_use_latest_four_messages() {
    let agent = Arc::new(MockAgent::new());
    let session = ChatSession::start(scenario("customer-support"), agent.clone(), TIMEOUT).await;

    let opening = session.wait_for_trainer_options().await.unwrap();
    assert_eq!(opening.turn_seq(), 0);
    assert_eq!(agent.trainer_requests()[0].len(), 1);

    session.submit_turn("It leaks everywhere.").await.unwrap();
    let first = session.wait_for_trainer_options().await.unwrap();
    assert_eq!(first.turn_seq(), 1);
    assert_eq!(agent.trainer_requests()[1], session.history().await.committed());

    session.submit_turn("I want my money back.").await.unwrap();
    let second = session.wait_for_trainer_options().await.unwrap();
    assert_eq!(second.turn_seq(), 2);
    assert_eq!(second.options().positive, "positive #2");

    let history = session.history().await;
    assert_eq!(history.len(), 5);
    assert_eq!(agent.trainer_requests()[2], history.committed()[1..].to_vec());
}

#[tokio::test]
async fn test_stale_trainer_options_are_discarded() {
    let agent = Arc::new(MockAgent::new());
    agent.hang_trainer_call(1);
    let session = ChatSession::start(scenario("customer-support"), agent.clone(), TIMEOUT).await;
    session.wait_for_trainer_options().await.unwrap();

    session.submit_turn("It stopped brewing.").await.unwrap();
    while agent.trainer_requests().len() < 2 {
        tokio::task::yield_now().await;
    }
    // Turn 1's refresh is still outstanding and the opening set is gone.
    assert_eq!(session.trainer_options().await, None);

    session.submit_turn("Hello? Are you there?").await.unwrap();
    let set = session.wait_for_trainer_options().await.unwrap();
    assert_eq!(set.turn_seq(), 2);
    assert_eq!(set.options().neutral, "neutral #2");
    assert_eq!(agent.trainer_requests().len(), 3);
}

#[tokio::test]
async fn test_chosen_trainer_option_is_submitted_verbatim() {
    let agent = Arc::new(MockAgent::new());
    let session = ChatSession::start(scenario("customer-support"), agent.clone(), TIMEOUT).await;
    let set = session.wait_for_trainer_options().await.unwrap();
    let (_, expected) = set.pick(2).unwrap();
    let expected = expected.to_string();

    let outcome = session.choose_trainer_option(2).await.unwrap();
    assert_eq!(outcome.user_message.text, expected);

    assert!(matches!(
        session.choose_trainer_option(3).await,
        Err(ParleyError::NotFound { .. })
    ));
}

#[tokio::test]
async fn test_trainer_is_idle_without_trainer_mode() {
    let agent = Arc::new(MockAgent::new());
    let session = ChatSession::start(scenario("debate"), agent.clone(), TIMEOUT).await;

    session.submit_turn("Pineapple is fruit, pizza is bread.").await.unwrap();
    assert_eq!(session.wait_for_trainer_options().await, None);
    assert!(agent.trainer_requests().is_empty());
}

#[tokio::test]
async fn test_replay_never_alters_history_or_metrics() {
    let agent = Arc::new(MockAgent::new());
    agent.push_reading(Script::Answer(reading(30, 35, 65, 45, "Firm")));
    let initial = scenario("debate").initial_metrics;
    let session = ChatSession::start(scenario("debate"), agent.clone(), TIMEOUT).await;
    session.submit_turn("Pineapple is great.").await.unwrap();

    let history = session.history().await;
    let metrics = session.current_metrics().await;

    let view = session.enter_replay().await;
    assert_eq!((view.mode, view.step, view.total), (ViewMode::Replay, 3, 3));
    assert_eq!(view.messages, history.committed());

    let start = session.replay_seek(0).await.unwrap();
    assert!(start.messages.is_empty());
    assert_eq!(start.metrics, initial);

    let one = session.replay_step_forward().await;
    assert_eq!(one.messages.len(), 1);
    assert_eq!(session.replay_step_backward().await.step, 0);
    assert_eq!(session.replay_step_backward().await.step, 0);

    assert_eq!(
        session.replay_seek(4).await.unwrap_err(),
        ParleyError::ReplayOutOfRange {
            requested: 4,
            available: 3
        }
    );

    let live = session.exit_replay().await;
    assert_eq!(live.mode, ViewMode::Live);
    assert_eq!(live.messages, history.committed());
    assert_eq!(live.metrics, metrics);
    assert_eq!(session.history().await, history);
}

#[tokio::test]
async fn test_turn_during_replay_keeps_scrubber_position() {
    let agent = Arc::new(MockAgent::new());
    let session = ChatSession::start(scenario("debate"), agent.clone(), TIMEOUT).await;
    session.enter_replay().await;
    session.replay_seek(1).await.unwrap();

    session.submit_turn("Hear me out.").await.unwrap();

    let view = session.view().await;
    assert_eq!(view.mode, ViewMode::Replay);
    assert_eq!((view.step, view.total), (1, 3));
    assert_eq!(view.messages.len(), 1);

    let live = session.exit_replay().await;
    assert_eq!(live.messages.len(), 3);
}
