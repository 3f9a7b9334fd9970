//! End-to-end session scenarios across the submit/resolve turn cycle:
//! transcript invariants, in-flight guarding, and mid-flight teardown.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;

use stint_assistant::{
    LocalRuleEngine, RemoteDelegate, ResponseSource, SessionStore, StoreError, SubmitOutcome,
    SERVICE_APOLOGY,
};
use stint_core::{AssistantReply, AuthContext, Category, Speaker, TurnRejection};

/// Holds its response until released, so tests can act while a turn is
/// suspended at the await point.
struct GatedSource {
    entered: Arc<Notify>,
    release: Arc<Notify>,
}

impl GatedSource {
    fn new() -> (Arc<Self>, Arc<Notify>, Arc<Notify>) {
        let entered = Arc::new(Notify::new());
        let release = Arc::new(Notify::new());
        let source =
            Arc::new(Self { entered: Arc::clone(&entered), release: Arc::clone(&release) });
        (source, entered, release)
    }
}

#[async_trait]
impl ResponseSource for GatedSource {
    fn greeting(&self) -> AssistantReply {
        AssistantReply {
            text: "gated greeting".to_string(),
            opportunities: Vec::new(),
            suggestions: vec!["go".to_string()],
        }
    }

    async fn respond(&self, _utterance: &str) -> AssistantReply {
        self.entered.notify_one();
        self.release.notified().await;
        AssistantReply::text_only("released reply")
    }
}

#[tokio::test]
async fn anonymous_tech_query_round_trip() {
    let store = SessionStore::new();
    let (session_id, greeting) = store.create(Arc::new(LocalRuleEngine::default()), None);
    assert!(!greeting.suggestions.is_empty());

    let outcome = store
        .submit(session_id, "Show me tech internships")
        .await
        .expect("session exists");

    let turn = match outcome {
        SubmitOutcome::Answered(turn) => turn,
        other => panic!("expected an answered turn, got {other:?}"),
    };

    assert_eq!(turn.speaker, Speaker::Assistant);
    assert!(!turn.opportunities.is_empty());
    assert!(turn.opportunities.iter().all(|entry| entry.category == Category::Tech));
    assert!(!turn.suggestions.is_empty());

    let transcript = store.transcript(session_id).expect("session exists");
    assert_eq!(transcript.len(), 3);
    assert_eq!(transcript[1].speaker, Speaker::User);
    assert_eq!(transcript[1].text, "Show me tech internships");
    assert_eq!(transcript[2], turn);
}

#[tokio::test]
async fn transcript_alternates_and_stays_odd_across_many_submissions() {
    let store = SessionStore::new();
    let (session_id, _) = store.create(Arc::new(LocalRuleEngine::default()), None);

    for text in ["tech roles", "", "remote positions", "   ", "salary info", "hello there"] {
        let _ = store.submit(session_id, text).await.expect("session exists");
    }

    let transcript = store.transcript(session_id).expect("session exists");
    assert_eq!(transcript.len() % 2, 1);
    assert_eq!(transcript.len(), 9, "two rejected submissions add no turns");
    for (index, turn) in transcript.iter().enumerate() {
        let expected = if index % 2 == 0 { Speaker::Assistant } else { Speaker::User };
        assert_eq!(turn.speaker, expected, "turn {index} out of order");
    }
}

#[tokio::test]
async fn suggestion_chip_activation_is_a_plain_submission() {
    let store = SessionStore::new();
    let (session_id, greeting) = store.create(Arc::new(LocalRuleEngine::default()), None);

    let chip = greeting.suggestions[0].clone();
    let outcome = store.submit(session_id, &chip).await.expect("session exists");
    assert!(matches!(outcome, SubmitOutcome::Answered(_)));
    assert_eq!(store.transcript(session_id).expect("session exists").len(), 3);
}

#[tokio::test]
async fn submissions_while_a_turn_is_in_flight_are_rejected() {
    let (source, entered, release) = GatedSource::new();
    let store = Arc::new(SessionStore::new());
    let (session_id, _) = store.create(source, None);

    let submitting_store = Arc::clone(&store);
    let in_flight =
        tokio::spawn(async move { submitting_store.submit(session_id, "first").await });
    entered.notified().await;

    let outcome = store.submit(session_id, "second").await.expect("session exists");
    assert_eq!(outcome, SubmitOutcome::Rejected(TurnRejection::ResponseInFlight));

    release.notify_one();
    let resolved = in_flight.await.expect("task joins").expect("session exists");
    assert!(matches!(resolved, SubmitOutcome::Answered(_)));

    let transcript = store.transcript(session_id).expect("session exists");
    assert_eq!(transcript.len(), 3, "the rejected submission left no trace");
}

#[tokio::test]
async fn teardown_mid_flight_discards_the_resolution() {
    let (source, entered, release) = GatedSource::new();
    let store = Arc::new(SessionStore::new());
    let (session_id, _) = store.create(source, None);

    let submitting_store = Arc::clone(&store);
    let in_flight =
        tokio::spawn(async move { submitting_store.submit(session_id, "anything").await });
    entered.notified().await;

    store.end(session_id).expect("session exists");
    release.notify_one();

    let outcome = in_flight.await.expect("task joins").expect("submit began on a live session");
    assert_eq!(outcome, SubmitOutcome::Discarded);
    assert_eq!(store.session_count(), 0);
    assert_eq!(store.transcript(session_id), Err(StoreError::UnknownSession(session_id)));
}

#[tokio::test]
async fn authenticated_session_with_unreachable_service_gets_the_apology() {
    let auth = AuthContext::new("student-9", "tok-e2e");
    let delegate = RemoteDelegate::new(
        reqwest::Client::new(),
        "http://127.0.0.1:1",
        Some(auth.clone()),
    );

    let store = SessionStore::new();
    let (session_id, greeting) = store.create(Arc::new(delegate), Some(auth));
    assert!(greeting.suggestions.is_empty(), "delegate greeting carries no chips");

    let outcome = store.submit(session_id, "recommend something").await.expect("session exists");
    let turn = match outcome {
        SubmitOutcome::Answered(turn) => turn,
        other => panic!("expected an answered turn, got {other:?}"),
    };

    assert_eq!(turn.text, SERVICE_APOLOGY);
    assert!(turn.opportunities.is_empty());
}
