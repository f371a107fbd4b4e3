//! Auth (Authentication) Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Entities, value objects, repository traits
//! - `application/` - Use cases and configuration
//! - `infra/` - SQLite implementation
//! - `presentation/` - HTML handlers, forms, router, middleware
//!
//! ## Features
//! - Registration and login with email + password
//! - Server-side sessions behind a signed cookie, with "remember me"
//! - Account activation flag, roles and session-key rotation
//!
//! ## Security Model
//! - Passwords hashed with Argon2id, optional server-side pepper
//! - Sessions bound to a client fingerprint (User-Agent hash)
//! - Rotating an account's session key revokes all of its sessions
//! - Login failures never reveal which part was wrong

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use application::config::AuthConfig;
pub use application::CurrentAccount;
pub use error::{AuthError, AuthResult};
pub use infra::sqlite::SqliteAuthRepository;
pub use presentation::router::auth_router_generic;
pub use presentation::{AuthAppState, AuthStatus, AuthStore};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

/// Migrations for every table the application uses
pub static MIGRATOR: sqlx::migrate::Migrator = sqlx::migrate!("../../../database/migrations");

pub mod middleware {
    pub use crate::presentation::middleware::*;
}
