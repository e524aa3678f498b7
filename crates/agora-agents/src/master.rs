//! Master agent: user administration, automation runs and audits.

use agora_core::{merge_values, AgentContext, AgentError, Role, RoleAgent, RowFetcher};
use serde_json::{json, Value};
use std::sync::Arc;

const ACTIONS: &[&str] = &["manage_users", "run_automation", "get_audit"];

pub struct MasterAgent {
    rows: Arc<dyn RowFetcher>,
}

impl MasterAgent {
    pub fn new(rows: Arc<dyn RowFetcher>) -> Self {
        Self { rows }
    }
}

#[async_trait::async_trait]
impl RoleAgent for MasterAgent {
    fn role(&self) -> Role {
        Role::Master
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
            "manage_users" => {
                let default_users = self.rows.fetch_rows("users").await?;
                let mut effective =
                    merge_values(&json!({ "users": default_users }), user_config);
                let users = effective.remove("users").unwrap_or(Value::Null);
                Ok(json!({ "users": users }))
            }
            "run_automation" => {
                let mut effective = merge_values(
                    &json!({ "automationResult": "Automatización ejecutada." }),
                    user_config,
                );
                let result = effective.remove("automationResult").unwrap_or(Value::Null);
                Ok(json!({ "result": result }))
            }
            "get_audit" => {
                let mut effective =
                    merge_values(&json!({ "audit": "Auditoría estándar." }), user_config);
                let audit = effective.remove("audit").unwrap_or(Value::Null);
                Ok(json!({ "audit": audit }))
            }
            _ => Err(AgentError::UnsupportedAction(Role::Master)),
        }
    }
}
