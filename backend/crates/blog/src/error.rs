//! Blog Error Types
//!
//! Blog-specific error variants that integrate with the unified
//! `kernel::error::AppError` system.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

/// Blog-specific result type alias
pub type BlogResult<T> = Result<T, BlogError>;

/// Blog-specific error variants
#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Post not found")]
    PostNotFound,

    #[error("{0}")]
    InvalidTitle(String),

    #[error("Post body cannot be empty")]
    EmptyBody,

    #[error("{0}")]
    InvalidBody(String),

    /// The author account disappeared between sign-in and insert
    #[error("Author account does not exist")]
    AuthorNotFound,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            BlogError::PostNotFound => StatusCode::NOT_FOUND,
            BlogError::InvalidTitle(_) | BlogError::EmptyBody | BlogError::InvalidBody(_) => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            BlogError::AuthorNotFound => StatusCode::CONFLICT,
            BlogError::Database(_) | BlogError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::PostNotFound => ErrorKind::NotFound,
            BlogError::InvalidTitle(_) | BlogError::EmptyBody | BlogError::InvalidBody(_) => {
                ErrorKind::UnprocessableEntity
            }
            BlogError::AuthorNotFound => ErrorKind::Conflict,
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    /// Convert to AppError; 5xx details stay in the logs
    pub fn to_app_error(&self) -> AppError {
        match self {
            BlogError::PostNotFound => AppError::not_found("That post does not exist.")
                .with_action("Check the link or go back to the dashboard"),
            _ if self.kind().is_server_error() => {
                AppError::new(self.kind(), "Something went wrong on our side")
                    .with_action("Please try again later")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            BlogError::Database(e) => {
                tracing::error!(error = %e, "Blog database error");
            }
            BlogError::Internal(msg) => {
                tracing::error!(message = %msg, "Blog internal error");
            }
            BlogError::AuthorNotFound => {
                tracing::warn!("Post author missing at insert time");
            }
            _ => {
                tracing::debug!(error = %self, "Blog error");
            }
        }
    }
}

impl From<BlogError> for AppError {
    fn from(err: BlogError) -> Self {
        match err {
            BlogError::Database(e) => AppError::from(e),
            other => other.to_app_error(),
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        AppError::from(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_and_kind_agree() {
        let errors = [
            BlogError::PostNotFound,
            BlogError::InvalidTitle("too long".to_string()),
            BlogError::EmptyBody,
            BlogError::InvalidBody("control characters".to_string()),
            BlogError::AuthorNotFound,
            BlogError::Internal("boom".to_string()),
        ];
        for err in errors {
            assert_eq!(err.status_code().as_u16(), err.kind().status_code(), "{err}");
        }
    }

    #[test]
    fn test_not_found_response() {
        let response = BlogError::PostNotFound.into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn test_database_details_hidden() {
        let app_err = BlogError::Database(sqlx::Error::PoolClosed).to_app_error();
        assert_eq!(app_err.status_code(), 500);
        assert!(!app_err.message().contains("pool"));
    }

    #[test]
    fn test_database_errors_classified_by_kind() {
        let app_err = AppError::from(BlogError::Database(sqlx::Error::PoolTimedOut));
        assert_eq!(app_err.kind(), ErrorKind::ServiceUnavailable);

        let response = BlogError::Database(sqlx::Error::PoolClosed).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
