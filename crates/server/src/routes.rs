//! Chat routes consumed by the portal frontend.
//!
//! Endpoints:
//! - `POST   /api/v1/chat/sessions`                — open a session (201);
//!   an `Authorization: Bearer` header selects the remote delegate,
//!   otherwise the local rule engine answers
//! - `POST   /api/v1/chat/sessions/{id}/messages`  — submit one utterance;
//!   200 with the assistant turn, 204 when the input was silently rejected
//!   or the session ended mid-flight
//! - `GET    /api/v1/chat/sessions/{id}`           — full transcript
//! - `DELETE /api/v1/chat/sessions/{id}`           — end the session (204)
//! - `GET    /healthz`                             — liveness probe

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::{HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use stint_assistant::{
    LocalRuleEngine, RemoteDelegate, ResponseSource, SessionStore, StoreError, SubmitOutcome,
};
use stint_core::{AppConfig, AuthContext, Catalog, SessionId, Turn};

#[derive(Clone)]
pub struct AppState {
    store: Arc<SessionStore>,
    local: Arc<LocalRuleEngine>,
    http: reqwest::Client,
    delegate_base_url: String,
}

impl AppState {
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.delegate.timeout_secs))
            .build()?;

        Ok(Self {
            store: Arc::new(SessionStore::new()),
            local: Arc::new(LocalRuleEngine::new(Catalog::built_in())),
            http,
            delegate_base_url: config.delegate.base_url.clone(),
        })
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/v1/chat/sessions", post(create_session))
        .route("/api/v1/chat/sessions/{id}", get(read_transcript).delete(end_session))
        .route("/api/v1/chat/sessions/{id}/messages", post(post_message))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Request / Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Default, Deserialize)]
pub struct CreateSessionRequest {
    pub subject: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct SessionCreated {
    pub session_id: SessionId,
    pub greeting: Turn,
}

#[derive(Debug, Deserialize)]
pub struct MessageRequest {
    pub text: String,
}

#[derive(Debug, Serialize)]
pub struct TranscriptResponse {
    pub session_id: SessionId,
    pub turns: Vec<Turn>,
}

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: &'static str,
}

#[derive(Debug, Serialize)]
struct HealthBody {
    status: &'static str,
    active_sessions: usize,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn create_session(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Result<Json<CreateSessionRequest>, JsonRejection>,
) -> impl IntoResponse {
    // A missing or malformed body still opens a session; the body only
    // carries the optional subject label.
    let request = body.map(|Json(request)| request).unwrap_or_default();
    let subject = request.subject.unwrap_or_else(|| "student".to_string());
    let auth = bearer_token(&headers).map(|token| AuthContext::new(subject, token));

    let (session_id, greeting) = match &auth {
        Some(context) => {
            let delegate = RemoteDelegate::new(
                state.http.clone(),
                state.delegate_base_url.clone(),
                Some(context.clone()),
            );
            state.store.create(Arc::new(delegate), auth.clone())
        }
        None => {
            let local: Arc<dyn ResponseSource> = state.local.clone();
            state.store.create(local, None)
        }
    };

    info!(
        event_name = "chat.session_created",
        session_id = %session_id,
        authenticated = auth.is_some(),
        "chat session created"
    );

    (StatusCode::CREATED, Json(SessionCreated { session_id, greeting }))
}

async fn post_message(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
    Json(request): Json<MessageRequest>,
) -> Response {
    let session_id = SessionId(session_id);

    match state.store.submit(session_id, &request.text).await {
        Ok(SubmitOutcome::Answered(turn)) => {
            info!(
                event_name = "chat.turn_answered",
                session_id = %session_id,
                turn_id = turn.id.0,
                opportunity_count = turn.opportunities.len(),
                "assistant turn appended"
            );
            (StatusCode::OK, Json(turn)).into_response()
        }
        Ok(SubmitOutcome::Rejected(rejection)) => {
            debug!(
                event_name = "chat.submission_rejected",
                session_id = %session_id,
                reason = %rejection,
                "submission silently rejected"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Ok(SubmitOutcome::Discarded) => StatusCode::NO_CONTENT.into_response(),
        Err(StoreError::UnknownSession(_)) => unknown_session(),
    }
}

async fn read_transcript(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Response {
    let session_id = SessionId(session_id);
    match state.store.transcript(session_id) {
        Ok(turns) => (StatusCode::OK, Json(TranscriptResponse { session_id, turns }))
            .into_response(),
        Err(StoreError::UnknownSession(_)) => unknown_session(),
    }
}

async fn end_session(State(state): State<AppState>, Path(session_id): Path<Uuid>) -> Response {
    match state.store.end(SessionId(session_id)) {
        Ok(()) => {
            info!(
                event_name = "chat.session_ended",
                session_id = %session_id,
                "chat session ended"
            );
            StatusCode::NO_CONTENT.into_response()
        }
        Err(StoreError::UnknownSession(_)) => unknown_session(),
    }
}

async fn healthz(State(state): State<AppState>) -> impl IntoResponse {
    Json(HealthBody { status: "ok", active_sessions: state.store.session_count() })
}

fn unknown_session() -> Response {
    (StatusCode::NOT_FOUND, Json(ErrorBody { error: "unknown_session" })).into_response()
}

fn bearer_token(headers: &HeaderMap) -> Option<String> {
    let value = headers.get(axum::http::header::AUTHORIZATION)?.to_str().ok()?;
    value
        .strip_prefix("Bearer ")
        .map(|token| token.trim().to_string())
        .filter(|token| !token.is_empty())
}

#[cfg(test)]
mod tests {
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Method, Request, StatusCode};
    use serde_json::Value;
    use tower::ServiceExt;

    use stint_core::AppConfig;

    use super::{router, AppState};

    fn test_router() -> axum::Router {
        let state = AppState::from_config(&AppConfig::default()).expect("state builds");
        router(state)
    }

    async fn json_body(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.expect("body read");
        serde_json::from_slice(&bytes).expect("json body")
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method(Method::POST)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("request builds")
    }

    async fn open_session(app: &axum::Router) -> String {
        let response = app
            .clone()
            .oneshot(post_json("/api/v1/chat/sessions", "{}"))
            .await
            .expect("request served");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        body["session_id"].as_str().expect("session id").to_string()
    }

    #[tokio::test]
    async fn health_probe_reports_ok() {
        let app = test_router();
        let response = app
            .oneshot(Request::builder().uri("/healthz").body(Body::empty()).expect("request"))
            .await
            .expect("request served");

        assert_eq!(response.status(), StatusCode::OK);
        let body = json_body(response).await;
        assert_eq!(body["status"], "ok");
    }

    #[tokio::test]
    async fn anonymous_session_round_trip() {
        let app = test_router();
        let session_id = open_session(&app).await;

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/chat/sessions/{session_id}/messages"),
                r#"{"text": "Show me tech internships"}"#,
            ))
            .await
            .expect("request served");
        assert_eq!(response.status(), StatusCode::OK);

        let turn = json_body(response).await;
        assert_eq!(turn["speaker"], "assistant");
        let opportunities = turn["opportunities"].as_array().expect("opportunities array");
        assert!(!opportunities.is_empty());
        assert!(opportunities.iter().all(|entry| entry["category"] == "tech"));
        assert!(!turn["suggestions"].as_array().expect("suggestions array").is_empty());

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/chat/sessions/{session_id}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("request served");
        assert_eq!(response.status(), StatusCode::OK);
        let transcript = json_body(response).await;
        assert_eq!(transcript["turns"].as_array().expect("turns").len(), 3);
    }

    #[tokio::test]
    async fn rejected_submissions_return_no_content_and_append_nothing() {
        let app = test_router();
        let session_id = open_session(&app).await;

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/v1/chat/sessions/{session_id}/messages"),
                r#"{"text": "   "}"#,
            ))
            .await
            .expect("request served");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/chat/sessions/{session_id}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("request served");
        let transcript = json_body(response).await;
        assert_eq!(transcript["turns"].as_array().expect("turns").len(), 1);
    }

    #[tokio::test]
    async fn ended_sessions_become_unknown() {
        let app = test_router();
        let session_id = open_session(&app).await;

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .method(Method::DELETE)
                    .uri(format!("/api/v1/chat/sessions/{session_id}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("request served");
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app
            .clone()
            .oneshot(
                Request::builder()
                    .uri(format!("/api/v1/chat/sessions/{session_id}"))
                    .body(Body::empty())
                    .expect("request"),
            )
            .await
            .expect("request served");
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn unknown_session_ids_are_not_found() {
        let app = test_router();
        let response = app
            .oneshot(post_json(
                &format!("/api/v1/chat/sessions/{}/messages", uuid::Uuid::new_v4()),
                r#"{"text": "hello"}"#,
            ))
            .await
            .expect("request served");

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = json_body(response).await;
        assert_eq!(body["error"], "unknown_session");
    }

    #[tokio::test]
    async fn bearer_header_selects_the_delegate_greeting() {
        let app = test_router();
        let response = app
            .oneshot(
                Request::builder()
                    .method(Method::POST)
                    .uri("/api/v1/chat/sessions")
                    .header(header::AUTHORIZATION, "Bearer tok-test")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{}"))
                    .expect("request"),
            )
            .await
            .expect("request served");
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = json_body(response).await;
        // The delegate greeting carries no suggestion chips; the local one does.
        assert!(body["greeting"]["suggestions"].as_array().expect("suggestions").is_empty());
    }
}
