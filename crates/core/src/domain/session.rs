use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::domain::turn::{AssistantReply, Turn, TurnId};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SessionId(pub Uuid);

impl SessionId {
    pub fn random() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for SessionId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    Idle,
    AwaitingResponse,
}

/// Credentials supplied by the external auth collaborator. Read-only here;
/// presence decides delegation at session creation and never changes after.
#[derive(Clone, Debug)]
pub struct AuthContext {
    pub subject: String,
    pub token: SecretString,
}

impl AuthContext {
    pub fn new(subject: impl Into<String>, token: impl Into<String>) -> Self {
        Self { subject: subject.into(), token: SecretString::from(token.into()) }
    }
}

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum TurnRejection {
    #[error("submission text is empty or whitespace-only")]
    EmptySubmission,
    #[error("a turn is already awaiting a response")]
    ResponseInFlight,
}

/// A single conversation: the append-only transcript plus the two-state
/// turn machine (`Idle` / `AwaitingResponse`).
///
/// A session always holds at least its greeting turn, so after any sequence
/// of accepted submissions the transcript alternates
/// assistant/user/assistant/… and has odd length.
#[derive(Clone, Debug)]
pub struct Session {
    id: SessionId,
    status: SessionStatus,
    turns: Vec<Turn>,
    next_turn_id: u64,
    auth: Option<AuthContext>,
}

impl Session {
    pub fn new(greeting: AssistantReply, auth: Option<AuthContext>) -> Self {
        let mut session = Self {
            id: SessionId::random(),
            status: SessionStatus::Idle,
            turns: Vec::new(),
            next_turn_id: 1,
            auth,
        };
        session.push_assistant(greeting);
        session
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn turns(&self) -> &[Turn] {
        &self.turns
    }

    pub fn auth(&self) -> Option<&AuthContext> {
        self.auth.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.auth.is_some()
    }

    /// `Idle --submit--> AwaitingResponse`.
    ///
    /// Empty or whitespace-only text is rejected, as is a submission while a
    /// response is already in flight; rejection leaves the transcript and
    /// status untouched. On acceptance the user turn is appended
    /// synchronously, before any response work begins.
    pub fn begin_turn(&mut self, text: &str) -> Result<&Turn, TurnRejection> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(TurnRejection::EmptySubmission);
        }
        if self.status == SessionStatus::AwaitingResponse {
            return Err(TurnRejection::ResponseInFlight);
        }

        self.status = SessionStatus::AwaitingResponse;
        let id = self.allocate_turn_id();
        self.turns.push(Turn::user(id, trimmed));
        Ok(self.latest_turn())
    }

    /// `AwaitingResponse --responseReady--> Idle`.
    ///
    /// Appends the assistant turn and returns to `Idle` whether the reply
    /// was a success or a fallback/error body; error is never a distinct
    /// terminal state.
    pub fn resolve_turn(&mut self, reply: AssistantReply) -> &Turn {
        self.status = SessionStatus::Idle;
        self.push_assistant(reply)
    }

    fn push_assistant(&mut self, reply: AssistantReply) -> &Turn {
        let id = self.allocate_turn_id();
        self.turns.push(Turn::assistant(id, reply));
        self.latest_turn()
    }

    fn allocate_turn_id(&mut self) -> TurnId {
        let id = TurnId(self.next_turn_id);
        self.next_turn_id += 1;
        id
    }

    fn latest_turn(&self) -> &Turn {
        // A session always holds at least the greeting turn.
        &self.turns[self.turns.len() - 1]
    }
}
