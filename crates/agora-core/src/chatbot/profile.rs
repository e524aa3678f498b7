//! Assistant personas per role, with their active-hour windows.

use crate::shared::{AgentError, Role};
use serde::{Deserialize, Serialize};

/// Wall-clock window in zero-padded 24-hour "HH:MM" strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveHours {
    pub start: String,
    pub end: String,
}

impl ActiveHours {
    /// Builds a window, rejecting anything that is not zero-padded "HH:MM".
    pub fn new(start: &str, end: &str) -> Result<Self, AgentError> {
        for value in [start, end] {
            if !is_well_formed(value) {
                return Err(AgentError::Validation(format!("horario inválido: {value}")));
            }
        }
        Ok(Self {
            start: start.to_string(),
            end: end.to_string(),
        })
    }

    /// True when the window crosses midnight (`start > end`). Lexicographic
    /// gating cannot represent these; see [`crate::chatbot::is_active`].
    pub fn is_overnight(&self) -> bool {
        self.start > self.end
    }
}

fn is_well_formed(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 5 || bytes[2] != b':' {
        return false;
    }
    if !bytes[0].is_ascii_digit()
        || !bytes[1].is_ascii_digit()
        || !bytes[3].is_ascii_digit()
        || !bytes[4].is_ascii_digit()
    {
        return false;
    }
    let hours = (bytes[0] - b'0') * 10 + (bytes[1] - b'0');
    let minutes = (bytes[3] - b'0') * 10 + (bytes[4] - b'0');
    hours < 24 && minutes < 60
}

/// An assistant persona: identity, tone and the window in which it answers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotProfile {
    pub id: String,
    pub name: String,
    /// Short role title shown in the chat header.
    pub title: String,
    pub personality: String,
    pub knowledge_tags: Vec<String>,
    pub active_hours: ActiveHours,
}

fn profile(
    id: &str,
    name: &str,
    title: &str,
    personality: &str,
    tags: &[&str],
    start: &str,
    end: &str,
) -> BotProfile {
    BotProfile {
        id: id.to_string(),
        name: name.to_string(),
        title: title.to_string(),
        personality: personality.to_string(),
        knowledge_tags: tags.iter().map(|t| t.to_string()).collect(),
        // Windows below are literal and well-formed by construction.
        active_hours: ActiveHours {
            start: start.to_string(),
            end: end.to_string(),
        },
    }
}

impl BotProfile {
    /// Persona for a role. Total and deterministic: unknown or absent roles
    /// get the general information persona, never an error.
    pub fn for_role(role: Option<Role>) -> BotProfile {
        match role {
            Some(Role::Desarrollador) => profile(
                "dev-bot-001",
                "TechBot",
                "Asistente Técnico",
                "Experto en desarrollo y sistemas",
                &["desarrollo", "sistemas", "debugging", "arquitectura"],
                "00:00",
                "23:59",
            ),
            Some(Role::Master) => profile(
                "master-bot-001",
                "MasterBot",
                "Estratega de Campaña",
                "Experto en gestión y estrategia electoral",
                &["estrategia", "gestión", "análisis", "campañas"],
                "06:00",
                "22:00",
            ),
            Some(Role::Candidato) => profile(
                "candidate-bot-001",
                "LeaderBot",
                "Asistente de Liderazgo",
                "Apoyo en liderazgo y toma de decisiones",
                &["liderazgo", "propuestas", "eventos", "comunicación"],
                "07:00",
                "21:00",
            ),
            Some(Role::Lider) => profile(
                "leader-bot-001",
                "CoordBot",
                "Coordinador Territorial",
                "Especialista en gestión territorial y equipos",
                &["coordinación", "territorios", "equipos", "logística"],
                "08:00",
                "20:00",
            ),
            Some(Role::Votante) => profile(
                "voter-bot-001",
                "SupportBot",
                "Asistente de Apoyo",
                "Guía amigable para colaboradores",
                &["tareas", "eventos", "participación", "comunidad"],
                "09:00",
                "19:00",
            ),
            // Publicidad has no dedicated persona; it shares the general
            // assistant with anonymous sessions.
            Some(Role::Publicidad) | None => profile(
                "general-bot-001",
                "InfoBot",
                "Asistente General",
                "Información general sobre la campaña",
                &["información", "propuestas", "eventos", "contacto"],
                "08:00",
                "18:00",
            ),
        }
    }
}
