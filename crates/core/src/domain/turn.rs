use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::opportunity::Opportunity;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TurnId(pub u64);

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Speaker {
    User,
    Assistant,
}

/// The response contract handed back to the UI layer: prose plus zero or
/// more opportunity records and follow-up suggestion chips.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct AssistantReply {
    pub text: String,
    pub opportunities: Vec<Opportunity>,
    pub suggestions: Vec<String>,
}

impl AssistantReply {
    pub fn text_only(text: impl Into<String>) -> Self {
        Self { text: text.into(), opportunities: Vec::new(), suggestions: Vec::new() }
    }
}

/// One message in a conversation session. Immutable once appended.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Turn {
    pub id: TurnId,
    pub speaker: Speaker,
    pub text: String,
    pub created_at: DateTime<Utc>,
    pub opportunities: Vec<Opportunity>,
    pub suggestions: Vec<String>,
}

impl Turn {
    pub(crate) fn user(id: TurnId, text: impl Into<String>) -> Self {
        Self {
            id,
            speaker: Speaker::User,
            text: text.into(),
            created_at: Utc::now(),
            opportunities: Vec::new(),
            suggestions: Vec::new(),
        }
    }

    pub(crate) fn assistant(id: TurnId, reply: AssistantReply) -> Self {
        Self {
            id,
            speaker: Speaker::Assistant,
            text: reply.text,
            created_at: Utc::now(),
            opportunities: reply.opportunities,
            suggestions: reply.suggestions,
        }
    }
}
