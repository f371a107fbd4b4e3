//! Blog Backend Module
//!
//! Posts written by signed-in accounts: a dashboard listing every post,
//! a new-post form and a detail page. Sessions come from the `auth` crate.
//!
//! Same layering as `auth`:
//! - `domain/` - Post entity, title/body value objects, repository trait
//! - `application/` - Use cases
//! - `infra/` - SQLite implementation
//! - `presentation/` - HTML handlers, forms, router

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


// Re-exports for convenience
pub use error::{BlogError, BlogResult};
pub use infra::sqlite::SqlitePostRepository;
pub use presentation::router::{blog_router, blog_router_generic};
pub use presentation::{BlogAppState, PostStore};
