//! Voter agent: polling-place location and campaign messages.

use agora_core::{merge_values, AgentContext, AgentError, Role, RoleAgent};
use serde_json::{json, Value};

const ACTIONS: &[&str] = &["get_location", "receive_message"];

#[derive(Default)]
pub struct VotanteAgent;

impl VotanteAgent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl RoleAgent for VotanteAgent {
    fn role(&self) -> Role {
        Role::Votante
    }

    fn actions(&self) -> &'static [&'static str] {
        ACTIONS
    }

    async fn handle(
        &self,
        _ctx: &AgentContext,
        action: &str,
        _payload: Option<&Value>,
        user_config: Option<&Value>,
    ) -> Result<Value, AgentError> {
        match action {
            "get_location" => {
                let mut effective =
                    merge_values(&json!({ "location": "Ubicación estándar." }), user_config);
                let location = effective.remove("location").unwrap_or(Value::Null);
                Ok(json!({ "location": location }))
            }
            "receive_message" => {
                let mut effective = merge_values(
                    &json!({ "voterMessage": "Mensaje de campaña recibido." }),
                    user_config,
                );
                let message = effective.remove("voterMessage").unwrap_or(Value::Null);
                Ok(json!({ "message": message }))
            }
            _ => Err(AgentError::UnsupportedAction(Role::Votante)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn get_location_uses_the_standard_default() {
        let out = VotanteAgent::new()
            .handle(&AgentContext::default(), "get_location", None, None)
            .await
            .unwrap();
        assert_eq!(out["location"], "Ubicación estándar.");
    }

    #[tokio::test]
    async fn get_location_override_wins() {
        let config = json!({ "location": "Puesto 14, Escuela Central" });
        let out = VotanteAgent::new()
            .handle(&AgentContext::default(), "get_location", None, Some(&config))
            .await
            .unwrap();
        assert_eq!(out["location"], "Puesto 14, Escuela Central");
    }

    #[tokio::test]
    async fn empty_location_override_falls_back() {
        let config = json!({ "location": "" });
        let out = VotanteAgent::new()
            .handle(&AgentContext::default(), "get_location", None, Some(&config))
            .await
            .unwrap();
        assert_eq!(out["location"], "Ubicación estándar.");
    }

    #[tokio::test]
    async fn unknown_action_matches_the_documented_message() {
        let err = VotanteAgent::new()
            .handle(&AgentContext::default(), "unknown_action", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Acción no reconocida para votante.");
    }
}
