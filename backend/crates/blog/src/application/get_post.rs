//! Get Post Use Case

use std::sync::Arc;

use kernel::id::PostId;

use crate::domain::entity::post::Post;
use crate::domain::repository::PostRepository;
use crate::error::{BlogError, BlogResult};

pub struct GetPostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> GetPostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    /// Fails with `PostNotFound` for an unknown id
    pub async fn execute(&self, post_id: PostId) -> BlogResult<Post> {
        self.post_repo
            .find_post(post_id)
            .await?
            .ok_or(BlogError::PostNotFound)
    }

    /// Resolve a raw path segment; anything that is not a post id is not found
    pub async fn execute_raw(&self, raw_id: &str) -> BlogResult<Post> {
        let post_id: PostId = raw_id.parse().map_err(|_| BlogError::PostNotFound)?;
        self.execute(post_id).await
    }
}
