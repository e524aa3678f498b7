//! Row-fetch collaborator: stands in for the remote persistence backend.
//! The backend itself is out of scope; handlers only see this trait.

use crate::shared::AgentError;
use serde_json::{json, Value};
use std::collections::HashMap;

/// Opaque row-fetching service keyed by table name. Failures surface as
/// [`AgentError::Upstream`] and are never retried at this layer.
#[async_trait::async_trait]
pub trait RowFetcher: Send + Sync {
    /// Ordered rows of `table`.
    async fn fetch_rows(&self, table: &str) -> Result<Vec<Value>, AgentError>;
}

/// In-memory fixture tables for demo and test runs.
#[derive(Debug, Default)]
pub struct StaticRows {
    tables: HashMap<String, Vec<Value>>,
}

impl StaticRows {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_table(mut self, name: &str, rows: Vec<Value>) -> Self {
        self.tables.insert(name.to_string(), rows);
        self
    }

    /// Fixture mirroring the campaign dashboard's backing tables.
    pub fn demo() -> Self {
        Self::new()
            .with_table(
                "team",
                vec![
                    json!({ "id": 1, "name": "María Gómez", "role": "coordinadora" }),
                    json!({ "id": 2, "name": "Juan Pérez", "role": "voluntario" }),
                ],
            )
            .with_table(
                "users",
                vec![
                    json!({ "id": 1, "name": "Desarrollador", "role": "desarrollador" }),
                    json!({ "id": 2, "name": "Master", "role": "master" }),
                    json!({ "id": 3, "name": "Candidato", "role": "candidato" }),
                    json!({ "id": 4, "name": "Lider", "role": "lider" }),
                    json!({ "id": 5, "name": "Votante", "role": "votante" }),
                ],
            )
            .with_table(
                "network",
                vec![
                    json!({ "id": 1, "name": "Red Barrial Norte", "members": 12 }),
                    json!({ "id": 2, "name": "Red Barrial Sur", "members": 8 }),
                ],
            )
            .with_table(
                "reports",
                vec![json!({ "id": 1, "title": "Informe semanal", "status": "listo" })],
            )
    }
}

#[async_trait::async_trait]
impl RowFetcher for StaticRows {
    async fn fetch_rows(&self, table: &str) -> Result<Vec<Value>, AgentError> {
        self.tables
            .get(table)
            .cloned()
            .ok_or_else(|| AgentError::Upstream(format!("tabla desconocida: {table}")))
    }
}
