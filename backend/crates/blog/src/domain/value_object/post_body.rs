//! Post Body Value Object

use kernel::validation::is_disallowed_in_text;

use crate::error::{BlogError, BlogResult};

/// Post body: non-blank text with `\n` line breaks
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostBody(String);

impl PostBody {
    pub fn new(body: impl AsRef<str>) -> BlogResult<Self> {
        let body = body.as_ref();
        if body.trim().is_empty() {
            return Err(BlogError::EmptyBody);
        }

        if body.chars().any(is_disallowed_in_text) {
            return Err(BlogError::InvalidBody(
                "Post body cannot contain control characters".to_string(),
            ));
        }

        // textareas submit CRLF
        Ok(Self(body.replace("\r\n", "\n")))
    }

    pub fn from_db(body: String) -> Self {
        Self(body)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Body split into paragraphs on blank lines
    pub fn paragraphs(&self) -> impl Iterator<Item = &str> {
        self.0
            .split("\n\n")
            .map(str::trim)
            .filter(|p| !p.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_body_keeps_whitespace() {
        let body = PostBody::new("  World\n").unwrap();
        assert_eq!(body.as_str(), "  World\n");
        assert!(PostBody::new(" \n\t").is_err());
    }

    #[test]
    fn test_crlf_paragraphs() {
        let body = PostBody::new("one\r\n\r\ntwo").unwrap();
        assert_eq!(body.as_str(), "one\n\ntwo");
        let paragraphs: Vec<_> = body.paragraphs().collect();
        assert_eq!(paragraphs, ["one", "two"]);
    }

    #[test]
    fn test_body_rejects_nul() {
        assert!(matches!(
            PostBody::new("World\0"),
            Err(BlogError::InvalidBody(_))
        ));
        assert!(PostBody::new("tabs\tand\nlines").is_ok());
    }

    #[test]
    fn test_paragraphs() {
        let body = PostBody::new("one\n\n\n\ntwo\nstill two").unwrap();
        let paragraphs: Vec<_> = body.paragraphs().collect();
        assert_eq!(paragraphs, ["one", "two\nstill two"]);
    }
}
