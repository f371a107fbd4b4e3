//! Create Post Use Case

use std::sync::Arc;

use kernel::id::AccountId;

use crate::domain::entity::post::{NewPost, Post};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{post_body::PostBody, post_title::PostTitle};
use crate::error::BlogResult;

/// Create post input
pub struct CreatePostInput {
    pub title: String,
    pub body: String,
    pub author_id: AccountId,
}

/// Create post use case
pub struct CreatePostUseCase<P>
where
    P: PostRepository,
{
    post_repo: Arc<P>,
}

impl<P> CreatePostUseCase<P>
where
    P: PostRepository,
{
    pub fn new(post_repo: Arc<P>) -> Self {
        Self { post_repo }
    }

    pub async fn execute(&self, input: CreatePostInput) -> BlogResult<Post> {
        let title = PostTitle::new(&input.title)?;
        let body = PostBody::new(input.body)?;

        let post = self
            .post_repo
            .create_post(&NewPost::new(title, body, input.author_id))
            .await?;

        tracing::info!(
            post_id = %post.post_id,
            author_id = %post.author_id,
            "Post created"
        );

        Ok(post)
    }
}
