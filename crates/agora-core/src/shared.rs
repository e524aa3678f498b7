//! Shared types used across all Agora crates.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Fixed set of user roles. The wire names double as route segments
/// (`/api/agent/{role}`); unknown values are invalid, never defaulted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Candidato,
    Master,
    Lider,
    Publicidad,
    Votante,
    Desarrollador,
}

impl Role {
    /// All roles, in registration order.
    pub fn all() -> &'static [Role] {
        &[
            Role::Candidato,
            Role::Master,
            Role::Lider,
            Role::Publicidad,
            Role::Votante,
            Role::Desarrollador,
        ]
    }

    /// Wire name, as it appears in routes and serialized requests.
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Candidato => "candidato",
            Role::Master => "master",
            Role::Lider => "lider",
            Role::Publicidad => "publicidad",
            Role::Votante => "votante",
            Role::Desarrollador => "desarrollador",
        }
    }

    /// Human label used in user-facing messages ("líder" keeps its accent).
    pub fn label(&self) -> &'static str {
        match self {
            Role::Lider => "líder",
            other => other.as_str(),
        }
    }

    /// Parses a route segment. Returns `None` for anything outside the set.
    pub fn parse(s: &str) -> Option<Role> {
        match s {
            "candidato" => Some(Role::Candidato),
            "master" => Some(Role::Master),
            "lider" => Some(Role::Lider),
            "publicidad" => Some(Role::Publicidad),
            "votante" => Some(Role::Votante),
            "desarrollador" => Some(Role::Desarrollador),
            _ => None,
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Per-request context threaded through every handler.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AgentContext {
    /// Email of the authenticated demo user, when known.
    #[serde(default)]
    pub user_email: Option<String>,
    /// Optional correlation id for request tracing.
    #[serde(default)]
    pub correlation_id: Option<String>,
}

/// One dispatch request: a role-scoped action plus opaque payload and
/// caller configuration overrides.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionRequest {
    pub action: String,
    #[serde(default)]
    pub payload: Option<serde_json::Value>,
    #[serde(default, rename = "userConfig")]
    pub user_config: Option<serde_json::Value>,
}

/// Errors raised below the dispatch boundary. Every variant is rendered as
/// the uniform `{status:"error", error}` envelope; none propagate as faults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AgentError {
    /// Malformed or missing request fields; never reaches the registry.
    Validation(String),
    /// Role outside the fixed set.
    UnknownRole(String),
    /// Role known, action not in its vocabulary.
    UnsupportedAction(Role),
    /// Credential store or external fetch failure surfaced by a handler.
    Upstream(String),
    /// Handler exceeded the bounded execution window.
    Timeout,
}

impl fmt::Display for AgentError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AgentError::Validation(msg) => write!(f, "{}", msg),
            AgentError::UnknownRole(role) => write!(f, "Rol no reconocido: {}.", role),
            AgentError::UnsupportedAction(role) => {
                write!(f, "Acción no reconocida para {}.", role.label())
            }
            AgentError::Upstream(msg) => write!(f, "{}", msg),
            AgentError::Timeout => {
                write!(f, "La acción excedió el tiempo máximo de ejecución.")
            }
        }
    }
}

impl std::error::Error for AgentError {}

/// Gateway configuration. Load from TOML or env.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CoreConfig {
    /// Application identity shown in logs.
    pub app_name: String,
    /// HTTP port for the gateway.
    pub port: u16,
    /// Upper bound for a single handler invocation, in seconds.
    pub handler_timeout_secs: u64,
    /// Simulated "thinking" delay of the chat responder, in milliseconds.
    pub chat_delay_ms: u64,
    /// Origins accepted by the CORS layer.
    #[serde(default)]
    pub allowed_origins: Vec<String>,
}

impl CoreConfig {
    /// Load config from file and environment. Precedence: env `AGORA_CONFIG`
    /// path > `config/gateway.toml` > defaults; `AGORA__*` env vars override.
    pub fn load() -> Result<Self, config::ConfigError> {
        let config_path =
            std::env::var("AGORA_CONFIG").unwrap_or_else(|_| "config/gateway".to_string());
        let builder = config::Config::builder()
            .set_default("app_name", "Agora Gateway")?
            .set_default("port", 5000_i64)?
            .set_default("handler_timeout_secs", 5_i64)?
            .set_default("chat_delay_ms", 1000_i64)?
            .set_default(
                "allowed_origins",
                vec![
                    "http://localhost:8080".to_string(),
                    "http://localhost:8082".to_string(),
                    "http://localhost:5678".to_string(),
                ],
            )?;

        let path = Path::new(&config_path);
        let builder = if path.exists() {
            builder.add_source(config::File::from(path))
        } else {
            builder
        };

        let built = builder
            .add_source(config::Environment::with_prefix("AGORA").separator("__"))
            .build()?;

        built.try_deserialize()
    }
}
