//! agora-core: campaign backend core (shared types, role dispatch, demo
//! credentials, simulated-assistant gating).
//!
//! The gateway and the role agents build on these pieces; everything here is
//! free of HTTP concerns.

mod analytics;
mod chatbot;
mod credentials;
mod datasource;
mod dispatch;
mod resolver;
mod shared;

pub use analytics::{AnalyticsEmitter, NoopEmitter, TracingEmitter};
pub use chatbot::{
    is_active, ActiveHours, BotProfile, ChatMessage, ChatSession, ChatState, Clock, FixedClock,
    Responder, Sender, SimulatedResponder, SystemClock,
};
pub use credentials::{Credential, CredentialStore};
pub use datasource::{RowFetcher, StaticRows};
pub use dispatch::{error_envelope, ok_envelope, AgentRegistry, Dispatcher, RoleAgent};
pub use resolver::{merge, merge_values};
pub use shared::{ActionRequest, AgentContext, AgentError, CoreConfig, Role};
