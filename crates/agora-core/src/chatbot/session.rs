//! One chat conversation: transcript plus the per-turn state machine.

use super::profile::BotProfile;
use super::responder::Responder;
use crate::shared::{AgentError, Role};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

/// Who produced a transcript entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// A rendered transcript entry. Entries are never revisited once pushed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub text: String,
    pub sender: Sender,
    pub timestamp: DateTime<Utc>,
}

impl ChatMessage {
    fn new(text: String, sender: Sender) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            text,
            sender,
            timestamp: Utc::now(),
        }
    }
}

/// Turn state. The only externally observable transition trigger is
/// completion of the responder's asynchronous step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatState {
    Idle,
    AwaitingResponse,
    Responding,
}

/// A chat conversation bound to one persona and one responder.
///
/// A turn runs `Idle → AwaitingResponse → Responding → Idle`. Dropping the
/// `send` future mid-await cancels the turn: no reply is recorded and the
/// next `send` starts fresh.
pub struct ChatSession {
    profile: BotProfile,
    role: Option<Role>,
    responder: Arc<dyn Responder>,
    state: ChatState,
    messages: Vec<ChatMessage>,
}

impl ChatSession {
    pub fn new(profile: BotProfile, role: Option<Role>, responder: Arc<dyn Responder>) -> Self {
        Self {
            profile,
            role,
            responder,
            state: ChatState::Idle,
            messages: Vec::new(),
        }
    }

    pub fn state(&self) -> ChatState {
        self.state
    }

    pub fn profile(&self) -> &BotProfile {
        &self.profile
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// Runs one turn: records the user message, awaits the responder and
    /// records its reply. Returns the rendered bot message.
    pub async fn send(&mut self, text: &str) -> Result<ChatMessage, AgentError> {
        if text.trim().is_empty() {
            return Err(AgentError::Validation("mensaje vacío".to_string()));
        }

        self.messages.push(ChatMessage::new(text.to_string(), Sender::User));
        self.state = ChatState::AwaitingResponse;

        match self.responder.respond(&self.profile, self.role, text).await {
            Ok(reply) => {
                self.state = ChatState::Responding;
                let message = ChatMessage::new(reply, Sender::Bot);
                self.messages.push(message.clone());
                self.state = ChatState::Idle;
                Ok(message)
            }
            Err(e) => {
                self.state = ChatState::Idle;
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chatbot::gate::FixedClock;
    use crate::chatbot::responder::SimulatedResponder;
    use std::time::Duration;

    fn session(now: &str, delay: Duration) -> ChatSession {
        let responder = Arc::new(SimulatedResponder::new(
            Arc::new(FixedClock(now.to_string())),
            delay,
        ));
        ChatSession::new(
            BotProfile::for_role(Some(Role::Votante)),
            Some(Role::Votante),
            responder,
        )
    }

    #[tokio::test]
    async fn turn_records_user_then_bot_and_returns_to_idle() {
        let mut s = session("10:00", Duration::ZERO);
        assert_eq!(s.state(), ChatState::Idle);

        let reply = s.send("hola").await.unwrap();
        assert_eq!(reply.sender, Sender::Bot);
        assert_eq!(s.state(), ChatState::Idle);
        assert_eq!(s.messages().len(), 2);
        assert_eq!(s.messages()[0].sender, Sender::User);
        assert_eq!(s.messages()[0].text, "hola");
        assert_eq!(s.messages()[1].id, reply.id);
    }

    #[tokio::test]
    async fn empty_message_is_rejected_without_a_turn() {
        let mut s = session("10:00", Duration::ZERO);
        assert!(s.send("   ").await.is_err());
        assert!(s.messages().is_empty());
        assert_eq!(s.state(), ChatState::Idle);
    }

    #[tokio::test]
    async fn out_of_hours_turn_renders_the_unavailability_reply() {
        let mut s = session("23:30", Duration::ZERO);
        let reply = s.send("hola").await.unwrap();
        assert!(reply.text.contains("SupportBot"));
        assert!(reply.text.contains("09:00 - 19:00"));
    }

    #[tokio::test]
    async fn dropping_the_turn_cancels_the_reply() {
        let mut s = session("10:00", Duration::from_secs(30));
        let cancelled =
            tokio::time::timeout(Duration::from_millis(20), s.send("hola")).await;
        assert!(cancelled.is_err());

        // The user message was recorded but no reply ever lands.
        assert_eq!(s.messages().len(), 1);
        assert_eq!(s.messages()[0].sender, Sender::User);
    }
}
