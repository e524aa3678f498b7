//! Advertising agent: ad copy generation and campaign stats.

use agora_core::{merge_values, AgentContext, AgentError, Role, RoleAgent};
use serde_json::{json, Value};

const ACTIONS: &[&str] = &["generate_copy", "get_stats"];

#[derive(Default)]
pub struct PublicidadAgent;

impl PublicidadAgent {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait::async_trait]
impl RoleAgent for PublicidadAgent {
    fn role(&self) -> Role {
        Role::Publicidad
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
            "generate_copy" => {
                let mut effective = merge_values(
                    &json!({ "adCopy": "Copy publicitario estándar." }),
                    user_config,
                );
                let copy = effective.remove("adCopy").unwrap_or(Value::Null);
                Ok(json!({ "copy": copy }))
            }
            "get_stats" => {
                let mut effective = merge_values(
                    &json!({ "adStats": { "clicks": 0, "views": 0 } }),
                    user_config,
                );
                let stats = effective.remove("adStats").unwrap_or(Value::Null);
                Ok(json!({ "stats": stats }))
            }
            _ => Err(AgentError::UnsupportedAction(Role::Publicidad)),
        }
    }
}
