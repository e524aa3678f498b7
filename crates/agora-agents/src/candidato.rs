//! Candidate agent: team roster, campaign messaging and reports.

use agora_core::{merge_values, AgentContext, AgentError, Role, RoleAgent, RowFetcher};
use serde_json::{json, Value};
use std::sync::Arc;

const ACTIONS: &[&str] = &["get_team", "send_message", "get_reports"];

pub struct CandidatoAgent {
    rows: Arc<dyn RowFetcher>,
}

impl CandidatoAgent {
    pub fn new(rows: Arc<dyn RowFetcher>) -> Self {
        Self { rows }
    }
}

#[async_trait::async_trait]
impl RoleAgent for CandidatoAgent {
    fn role(&self) -> Role {
        Role::Candidato
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
            "get_team" => {
                let default_team = self.rows.fetch_rows("team").await?;
                let mut effective =
                    merge_values(&json!({ "team": default_team }), user_config);
                let team = effective.remove("team").unwrap_or(Value::Null);
                Ok(json!({ "team": team }))
            }
            "send_message" => {
                let mut effective = merge_values(
                    &json!({ "customMessage": "Mensaje estándar de campaña" }),
                    user_config,
                );
                let message = effective.remove("customMessage").unwrap_or(Value::Null);
                Ok(json!({ "message": message }))
            }
            "get_reports" => {
                let default_reports = self.rows.fetch_rows("reports").await?;
                let mut effective =
                    merge_values(&json!({ "customReports": default_reports }), user_config);
                let reports = effective.remove("customReports").unwrap_or(Value::Null);
                Ok(json!({ "reports": reports }))
            }
            _ => Err(AgentError::UnsupportedAction(Role::Candidato)),
        }
    }
}
