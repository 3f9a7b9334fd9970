pub mod catalog;
pub mod compose;
pub mod config;
pub mod domain;
pub mod intent;

pub use catalog::Catalog;
pub use compose::ResponseComposer;
pub use config::{AppConfig, ConfigError, ConfigOverrides, LoadOptions, LogFormat};
pub use domain::opportunity::{
    Category, EngagementType, Opportunity, OpportunityId, REMOTE_LOCATION,
};
pub use domain::session::{AuthContext, Session, SessionId, SessionStatus, TurnRejection};
pub use domain::turn::{AssistantReply, Speaker, Turn, TurnId};
pub use intent::{Intent, IntentClassifier};
