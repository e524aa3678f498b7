//! Leader agent: helper network and team messaging.

use agora_core::{merge_values, AgentContext, AgentError, Role, RoleAgent, RowFetcher};
use serde_json::{json, Value};
use std::sync::Arc;

const ACTIONS: &[&str] = &["get_network", "send_team_message"];

pub struct LiderAgent {
    rows: Arc<dyn RowFetcher>,
}

impl LiderAgent {
    pub fn new(rows: Arc<dyn RowFetcher>) -> Self {
        Self { rows }
    }
}

#[async_trait::async_trait]
impl RoleAgent for LiderAgent {
    fn role(&self) -> Role {
        Role::Lider
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
            "get_network" => {
                let default_network = self.rows.fetch_rows("network").await?;
                let mut effective =
                    merge_values(&json!({ "network": default_network }), user_config);
                let network = effective.remove("network").unwrap_or(Value::Null);
                Ok(json!({ "network": network }))
            }
            "send_team_message" => {
                let mut effective = merge_values(
                    &json!({ "teamMessage": "Mensaje a equipo enviado." }),
                    user_config,
                );
                let message = effective.remove("teamMessage").unwrap_or(Value::Null);
                Ok(json!({ "message": message }))
            }
            _ => Err(AgentError::UnsupportedAction(Role::Lider)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use agora_core::StaticRows;

    fn agent() -> LiderAgent {
        LiderAgent::new(Arc::new(StaticRows::demo()))
    }

    #[tokio::test]
    async fn get_network_defaults_to_the_backing_table() {
        let out = agent()
            .handle(&AgentContext::default(), "get_network", None, None)
            .await
            .unwrap();
        assert_eq!(out["network"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn send_team_message_override_wins() {
        let config = json!({ "teamMessage": "Reunión a las 18:00." });
        let out = agent()
            .handle(&AgentContext::default(), "send_team_message", None, Some(&config))
            .await
            .unwrap();
        assert_eq!(out["message"], "Reunión a las 18:00.");
    }

    #[tokio::test]
    async fn unknown_action_uses_the_accented_label() {
        let err = agent()
            .handle(&AgentContext::default(), "get_team", None, None)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Acción no reconocida para líder.");
    }
}
