//! SQLite Repository Implementation

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, PostId};
use sqlx::SqlitePool;

use crate::domain::entity::post::{NewPost, Post};
use crate::domain::repository::PostRepository;
use crate::domain::value_object::{post_body::PostBody, post_title::PostTitle};
use crate::error::{BlogError, BlogResult};

const SELECT_POSTS: &str = r#"
    SELECT
        p.id,
        p.title,
        p.body,
        p.created_at,
        p.author_id,
        a.email AS author_email
    FROM posts p
    JOIN accounts a ON a.id = p.author_id
"#;

/// SQLite-backed post repository
#[derive(Clone)]
pub struct SqlitePostRepository {
    pool: SqlitePool,
}

impl SqlitePostRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

impl PostRepository for SqlitePostRepository {
    async fn create_post(&self, post: &NewPost) -> BlogResult<Post> {
        let result = sqlx::query(
            r#"
            INSERT INTO posts (title, body, created_at, author_id)
            VALUES (?, ?, ?, ?)
            "#,
        )
        .bind(post.title.as_str())
        .bind(post.body.as_str())
        .bind(post.created_at)
        .bind(post.author_id.get())
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_foreign_key_violation() => {
                BlogError::AuthorNotFound
            }
            other => BlogError::Database(other),
        })?;

        let post_id = PostId::new(result.last_insert_rowid());
        self.find_post(post_id).await?.ok_or_else(|| {
            BlogError::Internal(format!("post {post_id} missing right after insert"))
        })
    }

    async fn find_post(&self, post_id: PostId) -> BlogResult<Option<Post>> {
        let row = sqlx::query_as::<_, PostRow>(&format!("{SELECT_POSTS} WHERE p.id = ?"))
            .bind(post_id.get())
            .fetch_optional(&self.pool)
            .await?;

        Ok(row.map(PostRow::into_post))
    }

    async fn list_posts(&self) -> BlogResult<Vec<Post>> {
        let rows = sqlx::query_as::<_, PostRow>(&format!(
            "{SELECT_POSTS} ORDER BY p.created_at DESC, p.id DESC"
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(PostRow::into_post).collect())
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct PostRow {
    id: i64,
    title: String,
    body: String,
    created_at: DateTime<Utc>,
    author_id: i64,
    author_email: String,
}

impl PostRow {
    fn into_post(self) -> Post {
        Post {
            post_id: PostId::new(self.id),
            title: PostTitle::from_db(self.title),
            body: PostBody::from_db(self.body),
            created_at: self.created_at,
            author_id: AccountId::new(self.author_id),
            author_email: self.author_email,
        }
    }
}
