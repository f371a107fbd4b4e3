//! Session Key Value Object
//!
//! Per-account secret identifier that every login session snapshots.
//! Rotating it revokes all sessions issued before the rotation.

use derive_more::Display;
use uuid::Uuid;

use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display("{_0}")]
pub struct SessionKey(Uuid);

impl SessionKey {
    /// Fresh random key (UUID v4)
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse a stored key
    pub fn from_db(value: &str) -> AuthResult<Self> {
        value
            .parse()
            .map(Self)
            .map_err(|e| AuthError::Internal(format!("Corrupt session key: {e}")))
    }

    pub fn to_db(&self) -> String {
        self.0.to_string()
    }
}
