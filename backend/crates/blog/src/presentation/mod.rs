//! Presentation Layer
//!
//! HTML handlers, form DTOs, pages and router.

pub mod dto;
pub mod handlers;
pub mod router;
pub mod views;

pub use handlers::{BlogAppState, PostStore};
pub use router::{blog_router, blog_router_generic};
