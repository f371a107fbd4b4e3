//! Presentation Layer
//!
//! HTML handlers, form DTOs, pages, router and middleware.

pub mod dto;
pub mod handlers;
pub mod middleware;
pub mod router;
pub mod views;

pub use handlers::{AuthAppState, AuthStore};
pub use middleware::{AuthStatus, check_auth_session, require_auth_session};
pub use router::auth_router_generic;
