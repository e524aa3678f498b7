//! Pluggable response generation for the simulated assistant.

use super::gate::{is_active, Clock};
use super::profile::BotProfile;
use crate::shared::{AgentError, Role};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Produces the assistant's reply for one chat turn.
#[async_trait::async_trait]
pub trait Responder: Send + Sync {
    async fn respond(
        &self,
        profile: &BotProfile,
        role: Option<Role>,
        message: &str,
    ) -> Result<String, AgentError>;
}

const RESPUESTAS_DESARROLLADOR: &[&str] = &[
    "Como desarrollador, puedo ayudarte con la arquitectura del sistema.",
    "Revisa los logs del sistema para más detalles técnicos.",
    "El sistema está funcionando correctamente según los indicadores.",
];

const RESPUESTAS_MASTER: &[&str] = &[
    "Como estratega, te recomiendo revisar los datos territoriales.",
    "La campaña está progresando según los objetivos planteados.",
    "Considera ajustar la estrategia en las zonas de menor penetración.",
];

const RESPUESTAS_CANDIDATO: &[&str] = &[
    "Como tu asistente de liderazgo, te sugiero revisar el estado de los equipos.",
    "Los resultados de la campaña muestran un avance positivo.",
    "Es recomendable programar más eventos en territorios clave.",
];

const RESPUESTAS_LIDER: &[&str] = &[
    "Como coordinador territorial, puedo ayudarte con la gestión de tu zona.",
    "Revisa las tareas pendientes de tu equipo.",
    "Los votantes en tu territorio muestran buen nivel de compromiso.",
];

const RESPUESTAS_VOTANTE: &[&str] = &[
    "Como tu asistente de apoyo, estoy aquí para guiarte.",
    "Revisa tus tareas asignadas en el panel principal.",
    "Tu participación es valiosa para el éxito de la campaña.",
];

const RESPUESTAS_GENERAL: &[&str] = &[
    "Gracias por tu mensaje. ¿En qué puedo ayudarte?",
    "Estoy aquí para apoyarte en lo que necesites.",
    "Puedes consultar la información disponible en el sistema.",
];

fn replies_for(role: Option<Role>) -> &'static [&'static str] {
    match role {
        Some(Role::Desarrollador) => RESPUESTAS_DESARROLLADOR,
        Some(Role::Master) => RESPUESTAS_MASTER,
        Some(Role::Candidato) => RESPUESTAS_CANDIDATO,
        Some(Role::Lider) => RESPUESTAS_LIDER,
        Some(Role::Votante) => RESPUESTAS_VOTANTE,
        Some(Role::Publicidad) | None => RESPUESTAS_GENERAL,
    }
}

/// Simulated responder: gates on the persona's active hours, waits a
/// configurable "thinking" delay and rotates through canned role replies.
///
/// Selection is a deterministic rotation and the clock is injected, so a
/// test double never depends on real time or randomness. The delay is a
/// plain `tokio::time::sleep`: dropping the future cancels the turn.
pub struct SimulatedResponder {
    clock: Arc<dyn Clock>,
    delay: Duration,
    cursor: AtomicUsize,
}

impl SimulatedResponder {
    pub fn new(clock: Arc<dyn Clock>, delay: Duration) -> Self {
        Self {
            clock,
            delay,
            cursor: AtomicUsize::new(0),
        }
    }

    /// Canonical unavailability line: names the persona and its window.
    fn unavailable_message(profile: &BotProfile) -> String {
        format!(
            "Lo siento, {} no está disponible en este momento. Horario de atención: {} - {}",
            profile.name, profile.active_hours.start, profile.active_hours.end
        )
    }
}

#[async_trait::async_trait]
impl Responder for SimulatedResponder {
    async fn respond(
        &self,
        profile: &BotProfile,
        role: Option<Role>,
        _message: &str,
    ) -> Result<String, AgentError> {
        let now = self.clock.now_hhmm();
        if !is_active(&now, &profile.active_hours) {
            return Ok(Self::unavailable_message(profile));
        }

        tokio::time::sleep(self.delay).await;

        let replies = replies_for(role);
        let idx = self.cursor.fetch_add(1, Ordering::Relaxed) % replies.len();
        Ok(replies[idx].to_string())
    }
}
