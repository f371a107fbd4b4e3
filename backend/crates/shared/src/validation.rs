//! Form Field Validation
//!
//! Synchronous, request-scoped field validators and a per-field error
//! collector. Every HTML form in the application validates through these.
//!
//! ## Usage
//! ```rust
//! use kernel::validation::{self, FieldErrors};
//!
//! let mut errors = FieldErrors::new();
//! errors.check("email", validation::required("").and_then(|_| validation::email("")));
//! errors.check("title", validation::max_chars("Hello", 100));
//!
//! assert!(errors.has("email"));
//! assert!(!errors.has("title"));
//! ```

use std::borrow::Cow;
use std::collections::BTreeMap;

/// Outcome of a single validator
pub type Check = Result<(), Cow<'static, str>>;

/// Key used for errors that belong to the form as a whole
pub const FORM_FIELD: &str = "__form__";

/// Maximum email length (per RFC 5321)
pub const EMAIL_MAX_LENGTH: usize = 254;

/// Field-level validation errors, keyed by form field name
#[derive(Debug, Clone, Default, PartialEq, Eq, thiserror::Error)]
#[error("form validation failed for {} field(s)", .errors.len())]
pub struct FieldErrors {
    errors: BTreeMap<&'static str, Vec<Cow<'static, str>>>,
}

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `result` against `field`. Returns `true` when the check passed.
    pub fn check(&mut self, field: &'static str, result: Check) -> bool {
        match result {
            Ok(()) => true,
            Err(message) => {
                self.add(field, message);
                false
            }
        }
    }

    pub fn add(&mut self, field: &'static str, message: impl Into<Cow<'static, str>>) {
        self.errors.entry(field).or_default().push(message.into());
    }

    /// Error attached to the whole form (e.g. CSRF, bad credentials)
    pub fn add_form_error(&mut self, message: impl Into<Cow<'static, str>>) {
        self.add(FORM_FIELD, message);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn has(&self, field: &str) -> bool {
        self.errors.contains_key(field)
    }

    /// Messages for one field, in insertion order
    pub fn get(&self, field: &str) -> &[Cow<'static, str>] {
        self.errors.get(field).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn form_errors(&self) -> &[Cow<'static, str>] {
        self.get(FORM_FIELD)
    }
}

// ============================================================================
// Validators
// ============================================================================

/// Value must contain something other than whitespace
pub fn required(value: &str) -> Check {
    if value.trim().is_empty() {
        Err(Cow::Borrowed("This field is required."))
    } else {
        Ok(())
    }
}

/// Value must look like an email address
///
/// Shape check only: one `@`, non-empty local part (≤ 64), dotted domain of
/// ASCII alphanumerics, dots and hyphens.
pub fn email(value: &str) -> Check {
    if is_email_shaped(value.trim()) {
        Ok(())
    } else {
        Err(Cow::Borrowed("Invalid email address."))
    }
}

/// Value must equal `other` (e.g. password confirmation)
pub fn equal_to(value: &str, other: &str, message: &'static str) -> Check {
    if value == other {
        Ok(())
    } else {
        Err(Cow::Borrowed(message))
    }
}

/// Value must be at most `max` characters (Unicode scalar values)
pub fn max_chars(value: &str, max: usize) -> Check {
    if value.chars().count() <= max {
        Ok(())
    } else {
        Err(Cow::Owned(format!(
            "Field cannot be longer than {} characters.",
            max
        )))
    }
}

/// Value must not contain control characters (single-line inputs)
pub fn printable(value: &str) -> Check {
    if value.chars().any(char::is_control) {
        Err(Cow::Borrowed("Field cannot contain control characters."))
    } else {
        Ok(())
    }
}

/// Like [`printable`], but tabs and line breaks are allowed (textareas)
pub fn printable_multiline(value: &str) -> Check {
    if value.chars().any(is_disallowed_in_text) {
        Err(Cow::Borrowed("Field cannot contain control characters."))
    } else {
        Ok(())
    }
}

/// Control characters other than `\t`, `\n` and `\r`
pub fn is_disallowed_in_text(c: char) -> bool {
    c.is_control() && !matches!(c, '\t' | '\n' | '\r')
}

pub fn is_email_shaped(email: &str) -> bool {
    if email.is_empty() || email.len() > EMAIL_MAX_LENGTH {
        return false;
    }

    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };

    if local.is_empty() || local.len() > 64 || local.chars().any(char::is_whitespace) {
        return false;
    }

    if domain.is_empty() || !domain.contains('.') || domain.contains('@') {
        return false;
    }

    if !domain
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
    {
        return false;
    }

    if domain.starts_with('.') || domain.ends_with('.') || domain.contains("..") {
        return false;
    }

    !(domain.starts_with('-') || domain.ends_with('-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_required() {
        assert!(required("x").is_ok());
        assert!(required("").is_err());
        assert!(required("   \n").is_err());
    }

    #[test]
    fn test_email_shape() {
        assert!(email("user@example.com").is_ok());
        assert!(email("user.name+tag@example.co.jp").is_ok());
        assert!(email("userexample.com").is_err());
        assert!(email("user@").is_err());
        assert!(email("@example.com").is_err());
        assert!(email("user@@example.com").is_err());
        assert!(email("user@example").is_err());
        assert!(email("user@exa..mple.com").is_err());
        assert!(email("us er@example.com").is_err());
    }

    #[test]
    fn test_equal_to() {
        assert!(equal_to("secret", "secret", "Passwords must match.").is_ok());
        let err = equal_to("secret", "other", "Passwords must match.").unwrap_err();
        assert_eq!(err, "Passwords must match.");
    }

    #[test]
    fn test_max_chars_counts_characters() {
        assert!(max_chars(&"a".repeat(100), 100).is_ok());
        assert!(max_chars(&"a".repeat(101), 100).is_err());
        // multi-byte characters count once
        assert!(max_chars(&"é".repeat(100), 100).is_ok());
    }

    #[test]
    fn test_field_errors_collects_per_field() {
        let mut errors = FieldErrors::new();
        assert!(errors.check("title", Ok(())));
        assert!(!errors.check("content", required("")));
        errors.add_form_error("The CSRF token is missing or invalid.");

        assert!(!errors.has("title"));
        assert_eq!(errors.get("content").len(), 1);
        assert_eq!(errors.form_errors().len(), 1);
    }

    #[test]
    fn test_printable() {
        assert!(printable("Hello, world").is_ok());
        assert!(printable("\0Hello").is_err());
        assert!(printable("two\nlines").is_err());

        assert!(printable_multiline("one\r\n\r\ntwo\tthree").is_ok());
        assert!(printable_multiline("World\0").is_err());
        assert!(printable_multiline("bell\u{7}").is_err());
    }
}
