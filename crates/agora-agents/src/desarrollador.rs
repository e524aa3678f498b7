//! Developer agent: system audit, logs and admin tooling.

use agora_core::{merge_values, AgentContext, AgentError, Role, RoleAgent};
use serde_json::{json, Value};

const ACTIONS: &[&str] = &["system_audit", "get_logs", "admin_tools"];

#[derive(Default)]
pub struct DesarrolladorAgent;

impl DesarrolladorAgent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl RoleAgent for DesarrolladorAgent {
    fn role(&self) -> Role {
        Role::Desarrollador
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
            "system_audit" => {
                let mut effective =
                    merge_values(&json!({ "devAudit": "Auditoría completa." }), user_config);
                let audit = effective.remove("devAudit").unwrap_or(Value::Null);
                Ok(json!({ "audit": audit }))
            }
            "get_logs" => {
                let mut effective = merge_values(&json!({ "logs": [] }), user_config);
                let logs = effective.remove("logs").unwrap_or(Value::Null);
                Ok(json!({ "logs": logs }))
            }
            "admin_tools" => {
                let mut effective = merge_values(
                    &json!({ "tools": ["Herramienta 1", "Herramienta 2"] }),
                    user_config,
                );
                let tools = effective.remove("tools").unwrap_or(Value::Null);
                Ok(json!({ "tools": tools }))
            }
            _ => Err(AgentError::UnsupportedAction(Role::Desarrollador)),
        }
    }
}
