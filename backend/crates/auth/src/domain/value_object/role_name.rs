//! Role Name Value Objects
//!
//! [`RoleName`] is a validated role label; [`RoleSet`] is the set of roles
//! an account holds.

use derive_more::Display;
use std::collections::BTreeSet;

use crate::error::{AuthError, AuthResult};

pub const ROLE_NAME_MAX_LENGTH: usize = 80;
pub const ROLE_DESCRIPTION_MAX_LENGTH: usize = 255;

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
#[display("{_0}")]
pub struct RoleName(String);

impl RoleName {
    pub fn new(name: impl AsRef<str>) -> AuthResult<Self> {
        let name = name.as_ref().trim();

        if name.is_empty() {
            return Err(AuthError::InvalidRole("role name cannot be empty".to_string()));
        }
        if name.chars().count() > ROLE_NAME_MAX_LENGTH {
            return Err(AuthError::InvalidRole(format!(
                "role name must be at most {} characters",
                ROLE_NAME_MAX_LENGTH
            )));
        }

        Ok(Self(name.to_string()))
    }

    pub fn from_db(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Roles held by one account
///
/// Membership is a set: inserting a held role is a no-op.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(BTreeSet<RoleName>);

impl RoleSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the role was already held
    pub fn insert(&mut self, role: RoleName) -> bool {
        self.0.insert(role)
    }

    pub fn remove(&mut self, role: &RoleName) -> bool {
        self.0.remove(role)
    }

    pub fn contains(&self, role: &str) -> bool {
        self.0.iter().any(|r| r.as_str() == role)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &RoleName> {
        self.0.iter()
    }
}

impl FromIterator<RoleName> for RoleSet {
    fn from_iter<I: IntoIterator<Item = RoleName>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_name_validation() {
        assert_eq!(RoleName::new(" admin ").unwrap().as_str(), "admin");
        assert!(RoleName::new("   ").is_err());
        assert!(RoleName::new("r".repeat(ROLE_NAME_MAX_LENGTH)).is_ok());
        assert!(RoleName::new("r".repeat(ROLE_NAME_MAX_LENGTH + 1)).is_err());
    }

    #[test]
    fn test_role_set_semantics() {
        let admin = RoleName::new("admin").unwrap();
        let mut roles = RoleSet::new();

        assert!(roles.insert(admin.clone()));
        assert!(!roles.insert(admin.clone()));
        assert_eq!(roles.len(), 1);
        assert!(roles.contains("admin"));

        assert!(roles.remove(&admin));
        assert!(roles.is_empty());
    }
}
