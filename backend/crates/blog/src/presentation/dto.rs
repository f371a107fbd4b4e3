//! Form DTOs

use kernel::validation::{self, FieldErrors};
use serde::Deserialize;

use crate::domain::value_object::post_title::POST_TITLE_MAX_LENGTH;

/// New post form
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PostForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub csrf_token: String,
}

impl PostForm {
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        errors.check(
            "title",
            validation::required(&self.title)
                .and_then(|_| validation::printable(self.title.trim()))
                .and_then(|_| validation::max_chars(self.title.trim(), POST_TITLE_MAX_LENGTH)),
        );
        errors.check(
            "content",
            validation::required(&self.content)
                .and_then(|_| validation::printable_multiline(&self.content)),
        );

        errors
    }
}
