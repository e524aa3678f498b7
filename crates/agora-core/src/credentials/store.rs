//! Static demo identities. The table is swapped wholesale on repair
//! (copy-on-write) so concurrent readers never observe a partially
//! repaired table.

use crate::shared::Role;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, RwLock};

/// A demo identity. `email` is the unique key; several display-name
/// spellings map onto the same email.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Credential {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub description: String,
    pub territory: String,
    pub verified: bool,
}

/// Known display-name spellings (case and accent variants) to canonical
/// email. Exact-match only: spellings not listed here are not found, even
/// when semantically equivalent.
const NAME_TO_EMAIL: &[(&str, &str)] = &[
    ("Desarrollador", "dev@demo.com"),
    ("desarrollador", "dev@demo.com"),
    ("DESARROLLADOR", "dev@demo.com"),
    ("dev", "dev@demo.com"),
    ("Dev", "dev@demo.com"),
    ("DEV", "dev@demo.com"),
    ("Master", "master@demo.com"),
    ("master", "master@demo.com"),
    ("MASTER", "master@demo.com"),
    ("master1", "master@demo.com"),
    ("Master1", "master@demo.com"),
    ("MASTER1", "master@demo.com"),
    ("Candidato", "candidato@demo.com"),
    ("candidato", "candidato@demo.com"),
    ("CANDIDATO", "candidato@demo.com"),
    ("Líder", "lider@demo.com"),
    ("líder", "lider@demo.com"),
    ("Lider", "lider@demo.com"),
    ("lider", "lider@demo.com"),
    ("LÍDER", "lider@demo.com"),
    ("LIDER", "lider@demo.com"),
    ("Votante", "votante@demo.com"),
    ("votante", "votante@demo.com"),
    ("VOTANTE", "votante@demo.com"),
];

fn seed_table() -> Vec<Credential> {
    fn entry(
        name: &str,
        email: &str,
        role: Role,
        description: &str,
        territory: &str,
    ) -> Credential {
        Credential {
            name: name.to_string(),
            email: email.to_string(),
            password: "12345678".to_string(),
            role,
            description: description.to_string(),
            territory: territory.to_string(),
            verified: true,
        }
    }

    vec![
        entry(
            "Desarrollador",
            "dev@demo.com",
            Role::Desarrollador,
            "Acceso completo de desarrollador - Control total del sistema",
            "Nacional",
        ),
        entry(
            "Master",
            "master@demo.com",
            Role::Master,
            "Gestión completa de campaña electoral y coordinación",
            "Regional",
        ),
        entry(
            "Candidato",
            "candidato@demo.com",
            Role::Candidato,
            "Gestión territorial especializada y estrategia política",
            "Local",
        ),
        entry(
            "Lider",
            "lider@demo.com",
            Role::Lider,
            "Coordinación territorial local y gestión de equipos",
            "Barrial",
        ),
        entry(
            "Votante",
            "votante@demo.com",
            Role::Votante,
            "Usuario final del sistema electoral y participación",
            "Individual",
        ),
    ]
}

/// Process-wide store of demo credentials. Immutable after startup except
/// through [`CredentialStore::repair`], which replaces the table atomically.
pub struct CredentialStore {
    table: RwLock<Arc<Vec<Credential>>>,
}

impl CredentialStore {
    /// Store seeded with the five demo identities.
    pub fn new() -> Self {
        Self::with_table(seed_table())
    }

    /// Store over an explicit table (tests and alternative seeds).
    pub fn with_table(table: Vec<Credential>) -> Self {
        Self {
            table: RwLock::new(Arc::new(table)),
        }
    }

    /// Snapshot of the current table. The snapshot is immutable; a later
    /// `repair` does not change it.
    pub fn all(&self) -> Arc<Vec<Credential>> {
        self.table.read().map(|t| Arc::clone(&t)).unwrap_or_default()
    }

    /// Resolves a display-name spelling to its canonical email. Exact match
    /// against the precomputed spelling table after trimming; this is not a
    /// general normalization algorithm.
    pub fn lookup_email(name: &str) -> Option<&'static str> {
        let clean = name.trim();
        NAME_TO_EMAIL
            .iter()
            .find(|(spelling, _)| *spelling == clean)
            .map(|(_, email)| *email)
    }

    pub fn credential_by_email(&self, email: &str) -> Option<Credential> {
        self.all().iter().find(|c| c.email == email).cloned()
    }

    pub fn credential_by_name(&self, name: &str) -> Option<Credential> {
        Self::lookup_email(name).and_then(|email| self.credential_by_email(email))
    }

    /// True iff an entry exists with that exact email, a matching password
    /// and `verified` set.
    pub fn validate(&self, email: &str, password: &str) -> bool {
        let valid = self
            .credential_by_email(email)
            .map(|c| c.password == password && c.verified)
            .unwrap_or(false);
        tracing::debug!(email, valid, "credencial validada");
        valid
    }

    /// Sets `verified` on every entry that fails validation with its own
    /// stored password, then swaps the table in one atomic replace. Never
    /// alters `email` or `password`, never removes an entry. Idempotent:
    /// a second pass on a repaired table changes nothing.
    pub fn repair(&self) -> usize {
        let mut next: Vec<Credential> = (*self.all()).clone();
        let mut repaired = 0;
        for cred in next.iter_mut() {
            if !self.validate(&cred.email, &cred.password) {
                tracing::info!(name = %cred.name, email = %cred.email, "reparando credencial");
                cred.verified = true;
                repaired += 1;
            }
        }
        if repaired > 0 {
            if let Ok(mut table) = self.table.write() {
                *table = Arc::new(next);
            }
        }
        tracing::info!(repaired, "reparación de credenciales completada");
        repaired
    }

    /// Logs the validation state of every entry; returns `(total, valid)`.
    pub fn diagnose(&self) -> (usize, usize) {
        let table = self.all();
        let mut valid = 0;
        for cred in table.iter() {
            let ok = self.validate(&cred.email, &cred.password);
            if ok {
                valid += 1;
            }
            tracing::info!(
                name = %cred.name,
                email = %cred.email,
                role = %cred.role,
                verified = cred.verified,
                ok,
                "credencial"
            );
        }
        (table.len(), valid)
    }
}

impl Default for CredentialStore {
    fn default() -> Self {
        Self::new()
    }
}
