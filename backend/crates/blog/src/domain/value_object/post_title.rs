//! Post Title Value Object

use derive_more::Display;

use crate::error::{BlogError, BlogResult};

/// Maximum title length in characters
pub const POST_TITLE_MAX_LENGTH: usize = 100;

/// Post title: 1..=100 characters, surrounding whitespace trimmed, no
/// control characters
#[derive(Debug, Clone, PartialEq, Eq, Display)]
#[display("{_0}")]
pub struct PostTitle(String);

impl PostTitle {
    pub fn new(title: impl AsRef<str>) -> BlogResult<Self> {
        let title = title.as_ref().trim();

        if title.is_empty() {
            return Err(BlogError::InvalidTitle("Title cannot be empty".to_string()));
        }

        if title.chars().any(char::is_control) {
            return Err(BlogError::InvalidTitle(
                "Title cannot contain control characters".to_string(),
            ));
        }

        if title.chars().count() > POST_TITLE_MAX_LENGTH {
            return Err(BlogError::InvalidTitle(format!(
                "Title must be at most {} characters",
                POST_TITLE_MAX_LENGTH
            )));
        }

        Ok(Self(title.to_string()))
    }

    /// Create from database value (assumed already validated)
    pub fn from_db(title: String) -> Self {
        Self(title)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}
