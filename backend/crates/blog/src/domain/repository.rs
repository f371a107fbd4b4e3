//! Repository Traits

use kernel::id::PostId;

use crate::domain::entity::post::{NewPost, Post};
use crate::error::BlogResult;

/// Post repository trait
#[trait_variant::make(PostRepository: Send)]
pub trait LocalPostRepository {
    /// Insert a post and return it with its author
    ///
    /// An unknown author fails with `BlogError::AuthorNotFound`.
    async fn create_post(&self, post: &NewPost) -> BlogResult<Post>;

    async fn find_post(&self, post_id: PostId) -> BlogResult<Option<Post>>;

    /// Every post, newest first
    async fn list_posts(&self) -> BlogResult<Vec<Post>>;
}
