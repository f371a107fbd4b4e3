//! Application Layer
//!
//! Use cases for writing and reading posts.

pub mod create_post;
pub mod get_post;
pub mod list_posts;

// Re-exports
pub use create_post::{CreatePostInput, CreatePostUseCase};
pub use get_post::GetPostUseCase;
pub use list_posts::ListPostsUseCase;
