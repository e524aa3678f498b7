//! Per-role campaign agents. One module per role, each carrying the closed
//! action vocabulary of the dashboard backend.

mod candidato;
mod desarrollador;
mod lider;
mod master;
mod publicidad;
mod votante;

pub use candidato::CandidatoAgent;
pub use desarrollador::DesarrolladorAgent;
pub use lider::LiderAgent;
pub use master::MasterAgent;
pub use publicidad::PublicidadAgent;
pub use votante::VotanteAgent;

use agora_core::{AgentError, AgentRegistry, RowFetcher};
use std::sync::Arc;

/// Builds the registry with all six role agents and validates it, so a
/// missing role is caught at startup rather than on first request.
pub fn build_registry(rows: Arc<dyn RowFetcher>) -> Result<AgentRegistry, AgentError> {
    let mut registry = AgentRegistry::new();
    registry.register(Arc::new(CandidatoAgent::new(Arc::clone(&rows))));
    registry.register(Arc::new(MasterAgent::new(Arc::clone(&rows))));
    registry.register(Arc::new(LiderAgent::new(Arc::clone(&rows))));
    registry.register(Arc::new(PublicidadAgent::new()));
    registry.register(Arc::new(VotanteAgent::new()));
    registry.register(Arc::new(DesarrolladorAgent::new()));
    registry.validate()?;
    Ok(registry)
}
