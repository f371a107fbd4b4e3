//! Role Entity

use kernel::id::RoleId;

use crate::domain::value_object::role_name::RoleName;

/// Named role that accounts may hold
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Role {
    pub role_id: RoleId,
    pub name: RoleName,
    pub description: Option<String>,
}
