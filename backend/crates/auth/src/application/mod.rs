//! Application Layer
//!
//! Use cases and application services.

pub mod account_admin;
pub mod check_session;
pub mod config;
pub mod sign_in;
pub mod sign_out;
pub mod sign_up;

// Re-exports
pub use account_admin::AccountAdminUseCase;
pub use check_session::{CheckSessionUseCase, CurrentAccount};
pub use config::AuthConfig;
pub use sign_in::{ClientFingerprint, SignInInput, SignInOutput, SignInUseCase};
pub use sign_out::SignOutUseCase;
pub use sign_up::{SignUpInput, SignUpUseCase};
