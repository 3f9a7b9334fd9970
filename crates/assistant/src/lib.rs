//! Assistant runtime - response sources and session orchestration
//!
//! This crate sits between the portal's transport layer and the core chat
//! engine:
//! - **Response sources** (`source`) - the per-session strategy producing
//!   assistant replies: `LocalRuleEngine` (keyword classifier + composer) or
//!   `RemoteDelegate` (external recommendation/advice service)
//! - **Remote delegation** (`remote`) - bearer-authenticated HTTP exchange
//!   with the recommendation service, plus normalization of its wire shapes
//!   into the canonical `Opportunity` record
//! - **Session store** (`store`) - in-memory registry of live sessions that
//!   drives the submit/resolve turn cycle across the one async suspension
//!   point
//!
//! # Key Types
//!
//! - `ResponseSource` - pluggable trait selected once per session from the
//!   authenticated/anonymous flag
//! - `SessionStore` - create/submit/transcript/end lifecycle with the
//!   teardown no-op guard
//!
//! # Safety Principle
//!
//! A response source never fails: missing credentials, transport errors, and
//! malformed service replies are all resolved into well-formed assistant
//! replies, so a broken chat turn can never leave a session stuck awaiting a
//! response.

pub mod remote;
pub mod source;
pub mod store;

pub use remote::{DelegateError, RemoteDelegate, SERVICE_APOLOGY, SIGN_IN_NOTICE};
pub use source::{LocalRuleEngine, ResponseSource};
pub use store::{SessionStore, StoreError, SubmitOutcome};
