//! Role-scoped action dispatch: the per-role agent registry and the
//! boundary dispatcher that turns every handler outcome into data for the
//! uniform response envelope.

use crate::analytics::AnalyticsEmitter;
use crate::shared::{ActionRequest, AgentContext, AgentError, Role};
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

/// Trait implemented by all role agents.
#[async_trait::async_trait]
pub trait RoleAgent: Send + Sync {
    /// Role this agent serves.
    fn role(&self) -> Role;

    /// Closed action vocabulary for the role, fixed at build time.
    fn actions(&self) -> &'static [&'static str];

    /// Executes one action with the caller's payload and config overrides.
    async fn handle(
        &self,
        ctx: &AgentContext,
        action: &str,
        payload: Option<&Value>,
        user_config: Option<&Value>,
    ) -> Result<Value, AgentError>;
}

/// Per-role agent table. Populated once at startup, read-only afterwards;
/// no dynamic registration happens at request time.
pub struct AgentRegistry {
    agents: HashMap<Role, Arc<dyn RoleAgent>>,
}

impl AgentRegistry {
    pub fn new() -> Self {
        Self {
            agents: HashMap::new(),
        }
    }

    /// Registers an agent under its own role. Last registration wins.
    pub fn register(&mut self, agent: Arc<dyn RoleAgent>) {
        self.agents.insert(agent.role(), agent);
    }

    /// Startup check: every role in the fixed set must have an agent with a
    /// non-empty vocabulary, so an unhandled (role, action) pair is a
    /// startup-detectable gap instead of a runtime string-match miss.
    pub fn validate(&self) -> Result<(), AgentError> {
        for role in Role::all() {
            match self.agents.get(role) {
                None => {
                    return Err(AgentError::Validation(format!(
                        "sin agente registrado para {}",
                        role
                    )))
                }
                Some(agent) if agent.actions().is_empty() => {
                    return Err(AgentError::Validation(format!(
                        "vocabulario de acciones vacío para {}",
                        role
                    )))
                }
                Some(_) => {}
            }
        }
        Ok(())
    }

    pub fn get(&self, role: Role) -> Option<Arc<dyn RoleAgent>> {
        self.agents.get(&role).cloned()
    }

    /// Resolves and invokes the handler for `(role, action)`. The registry
    /// performs no I/O of its own.
    pub async fn dispatch(
        &self,
        ctx: &AgentContext,
        role: Role,
        action: &str,
        payload: Option<&Value>,
        user_config: Option<&Value>,
    ) -> Result<Value, AgentError> {
        let agent = self
            .get(role)
            .ok_or_else(|| AgentError::UnknownRole(role.as_str().to_string()))?;
        if !agent.actions().contains(&action) {
            return Err(AgentError::UnsupportedAction(role));
        }
        agent.handle(ctx, action, payload, user_config).await
    }
}

impl Default for AgentRegistry {
    fn default() -> Self {
        Self::new()
    }
}

/// Boundary dispatcher: validates the raw request body, bounds handler
/// execution and reports every outcome through the analytics emitter.
/// Nothing below this point escapes as an unhandled fault.
pub struct Dispatcher {
    registry: Arc<AgentRegistry>,
    analytics: Arc<dyn AnalyticsEmitter>,
    timeout: Duration,
}

impl Dispatcher {
    pub fn new(
        registry: Arc<AgentRegistry>,
        analytics: Arc<dyn AnalyticsEmitter>,
        timeout: Duration,
    ) -> Self {
        Self {
            registry,
            analytics,
            timeout,
        }
    }

    /// Validates and runs one raw request body. A missing or non-string
    /// `action` fails before the registry is consulted.
    pub async fn dispatch_value(
        &self,
        ctx: &AgentContext,
        role: Role,
        body: &Value,
    ) -> Result<Value, AgentError> {
        let action = match body.get("action") {
            Some(Value::String(action)) => action.clone(),
            _ => {
                return Err(AgentError::Validation(
                    "Falta el campo 'action' en la solicitud.".to_string(),
                ))
            }
        };
        let request = ActionRequest {
            action,
            payload: body.get("payload").cloned(),
            user_config: body.get("userConfig").cloned(),
        };
        self.dispatch(ctx, role, &request).await
    }

    /// Runs a parsed request inside the bounded execution window.
    pub async fn dispatch(
        &self,
        ctx: &AgentContext,
        role: Role,
        request: &ActionRequest,
    ) -> Result<Value, AgentError> {
        let handler = self.registry.dispatch(
            ctx,
            role,
            &request.action,
            request.payload.as_ref(),
            request.user_config.as_ref(),
        );
        let result = match tokio::time::timeout(self.timeout, handler).await {
            Ok(result) => result,
            Err(_) => Err(AgentError::Timeout),
        };

        let status = if result.is_ok() { "ok" } else { "error" };
        if let Err(e) = &result {
            tracing::warn!(role = %role, action = %request.action, error = %e, "acción fallida");
        }
        self.analytics.emit(
            "agent_action",
            serde_json::json!({
                "role": role.as_str(),
                "action": request.action,
                "status": status,
            }),
        );

        result
    }
}

/// Renders ok data into the uniform envelope: `{"status":"ok", ...data}`.
/// Non-object data lands under a `data` key.
pub fn ok_envelope(data: Value) -> Value {
    let mut map = match data {
        Value::Object(map) => map,
        other => {
            let mut map = serde_json::Map::new();
            map.insert("data".to_string(), other);
            map
        }
    };
    map.insert("status".to_string(), Value::String("ok".to_string()));
    Value::Object(map)
}

/// Renders an error into the uniform envelope, message verbatim.
pub fn error_envelope(err: &AgentError) -> Value {
    serde_json::json!({ "status": "error", "error": err.to_string() })
}
