//! Account Entity
//!
//! A registered identity: login email, password hash, activation flag,
//! session key and held roles.

use chrono::{DateTime, Utc};
use kernel::id::AccountId;

use crate::domain::value_object::{
    account_password::AccountPassword, email::Email, role_name::RoleSet, session_key::SessionKey,
};

/// Account entity
#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    /// Unique, lower-cased login handle
    pub email: Email,
    pub password_hash: AccountPassword,
    /// Inactive accounts cannot sign in and lose their sessions
    pub active: bool,
    /// Snapshotted by every session; see [`SessionKey`]
    pub session_key: SessionKey,
    pub roles: RoleSet,
    pub created_at: DateTime<Utc>,
}

impl Account {
    pub fn can_login(&self) -> bool {
        self.active
    }

    pub fn has_role(&self, role: &str) -> bool {
        self.roles.contains(role)
    }
}

/// Account about to be inserted (no id yet)
#[derive(Debug, Clone)]
pub struct NewAccount {
    pub email: Email,
    pub password_hash: AccountPassword,
    pub session_key: SessionKey,
    pub created_at: DateTime<Utc>,
}

impl NewAccount {
    /// Active account with a freshly generated session key
    pub fn new(email: Email, password_hash: AccountPassword) -> Self {
        Self {
            email,
            password_hash,
            session_key: SessionKey::generate(),
            created_at: Utc::now(),
        }
    }
}
