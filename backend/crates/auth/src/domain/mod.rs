//! Domain Layer
//!
//! Contains entities, value objects, and repository traits.

pub mod entity;
pub mod repository;
pub mod value_object;

// Re-exports
pub use entity::{
    account::{Account, NewAccount},
    auth_session::AuthSession,
    role::Role,
};
pub use repository::{AccountRepository, AuthSessionRepository, RoleRepository};
