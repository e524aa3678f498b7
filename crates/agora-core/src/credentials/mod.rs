//! Demo credential table: name→email normalization, validation and the
//! idempotent repair pass.

mod store;

pub use store::{Credential, CredentialStore};
