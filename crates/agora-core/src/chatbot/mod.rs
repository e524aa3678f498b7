//! Simulated campaign assistant: persona selection, availability gating and
//! the canned responder.

mod gate;
mod profile;
mod responder;
mod session;

pub use gate::{is_active, Clock, FixedClock, SystemClock};
pub use profile::{ActiveHours, BotProfile};
pub use responder::{Responder, SimulatedResponder};
pub use session::{ChatMessage, ChatSession, ChatState, Sender};
