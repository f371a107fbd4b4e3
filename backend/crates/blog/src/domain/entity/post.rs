//! Post Entity

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, PostId};

use crate::domain::value_object::{post_body::PostBody, post_title::PostTitle};

/// Stored post with its author's email
#[derive(Debug, Clone)]
pub struct Post {
    pub post_id: PostId,
    pub title: PostTitle,
    pub body: PostBody,
    pub created_at: DateTime<Utc>,
    /// Fixed at creation
    pub author_id: AccountId,
    pub author_email: String,
}

impl Post {
    pub fn is_authored_by(&self, account_id: AccountId) -> bool {
        self.author_id == account_id
    }
}

/// Post ready for insert
#[derive(Debug, Clone)]
pub struct NewPost {
    pub title: PostTitle,
    pub body: PostBody,
    pub author_id: AccountId,
    pub created_at: DateTime<Utc>,
}

impl NewPost {
    pub fn new(title: PostTitle, body: PostBody, author_id: AccountId) -> Self {
        Self {
            title,
            body,
            author_id,
            created_at: Utc::now(),
        }
    }
}
