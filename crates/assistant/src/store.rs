use std::collections::HashMap;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use thiserror::Error;
use tracing::debug;

use stint_core::{AuthContext, Session, SessionId, Turn, TurnRejection};

use crate::source::ResponseSource;

#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("unknown session `{0}`")]
    UnknownSession(SessionId),
}

#[derive(Clone, Debug, PartialEq)]
pub enum SubmitOutcome {
    /// The assistant turn appended for this submission.
    Answered(Turn),
    /// Input rejected by the turn machine; nothing changed.
    Rejected(TurnRejection),
    /// The session was torn down while the response was in flight; the
    /// resolution was dropped without mutating anything.
    Discarded,
}

struct SessionSlot {
    session: Session,
    source: Arc<dyn ResponseSource>,
}

/// In-memory registry of live sessions, each bound to the response source
/// chosen at creation. Sessions are exclusive to their slot; the catalog
/// behind the local source is the only shared data and it is read-only.
#[derive(Default)]
pub struct SessionStore {
    slots: Mutex<HashMap<SessionId, SessionSlot>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Opens a session seeded with the source's greeting turn and returns
    /// that turn alongside the new id.
    pub fn create(
        &self,
        source: Arc<dyn ResponseSource>,
        auth: Option<AuthContext>,
    ) -> (SessionId, Turn) {
        let session = Session::new(source.greeting(), auth);
        let session_id = session.id();
        let greeting = session.turns()[0].clone();

        self.lock().insert(session_id, SessionSlot { session, source });
        (session_id, greeting)
    }

    /// Drives one full turn: guarded synchronous begin under the registry
    /// lock, the single suspension point with the lock released, then a
    /// re-check of the registry before resolving. A session ended while the
    /// response was in flight yields [`SubmitOutcome::Discarded`].
    pub async fn submit(
        &self,
        session_id: SessionId,
        text: &str,
    ) -> Result<SubmitOutcome, StoreError> {
        let (source, accepted_text) = {
            let mut slots = self.lock();
            let slot =
                slots.get_mut(&session_id).ok_or(StoreError::UnknownSession(session_id))?;

            let accepted_text = match slot.session.begin_turn(text) {
                Ok(turn) => turn.text.clone(),
                Err(rejection) => return Ok(SubmitOutcome::Rejected(rejection)),
            };
            (Arc::clone(&slot.source), accepted_text)
        };

        let reply = source.respond(&accepted_text).await;

        let mut slots = self.lock();
        match slots.get_mut(&session_id) {
            Some(slot) => Ok(SubmitOutcome::Answered(slot.session.resolve_turn(reply).clone())),
            None => {
                debug!(session_id = %session_id, "session ended mid-flight; discarding resolution");
                Ok(SubmitOutcome::Discarded)
            }
        }
    }

    pub fn transcript(&self, session_id: SessionId) -> Result<Vec<Turn>, StoreError> {
        let slots = self.lock();
        let slot = slots.get(&session_id).ok_or(StoreError::UnknownSession(session_id))?;
        Ok(slot.session.turns().to_vec())
    }

    /// Ends the session. Any in-flight resolution for it becomes a no-op.
    pub fn end(&self, session_id: SessionId) -> Result<(), StoreError> {
        self.lock()
            .remove(&session_id)
            .map(|_| ())
            .ok_or(StoreError::UnknownSession(session_id))
    }

    pub fn session_count(&self) -> usize {
        self.lock().len()
    }

    fn lock(&self) -> MutexGuard<'_, HashMap<SessionId, SessionSlot>> {
        self.slots.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
