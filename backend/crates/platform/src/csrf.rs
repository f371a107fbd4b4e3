//! CSRF Protection
//!
//! Double-submit token: a random value lives in the `csrf_token` cookie and
//! is echoed in a hidden form field. A POST is accepted only when the two
//! match.

use axum::http::{HeaderMap, HeaderValue};

use crate::cookie::{CookieConfig, extract_cookie, set_cookie_header};
use crate::crypto::{constant_time_eq, from_base64url, random_token};

/// Cookie carrying the token
pub const CSRF_COOKIE: &str = "csrf_token";

/// Hidden form field carrying the token
pub const CSRF_FIELD: &str = "csrf_token";

/// Bytes of entropy per token
const TOKEN_BYTES: usize = 32;

/// Form-level message shown on mismatch
pub const CSRF_ERROR: &str = "The CSRF token is missing or invalid.";

/// Token for the page being rendered
#[derive(Debug, Clone)]
pub struct CsrfToken {
    value: String,
    set_cookie: Option<HeaderValue>,
}

impl CsrfToken {
    /// Reuse the token from the request cookie, or mint a new one
    ///
    /// A newly minted token carries the Set-Cookie header that must be sent
    /// with the rendered form.
    pub fn issue(headers: &HeaderMap, secure: bool) -> Self {
        if let Some(existing) = extract_cookie(headers, CSRF_COOKIE).filter(|v| is_well_formed(v))
        {
            return Self {
                value: existing,
                set_cookie: None,
            };
        }

        let value = random_token(TOKEN_BYTES);
        let set_cookie = set_cookie_header(&cookie_config(secure), &value);
        Self { value, set_cookie }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn set_cookie(&self) -> Option<HeaderValue> {
        self.set_cookie.clone()
    }
}

/// True when `submitted` matches the request's CSRF cookie
pub fn verify(headers: &HeaderMap, submitted: &str) -> bool {
    let Some(expected) = extract_cookie(headers, CSRF_COOKIE) else {
        tracing::debug!("CSRF cookie missing");
        return false;
    };

    let ok =
        is_well_formed(&expected) && constant_time_eq(expected.as_bytes(), submitted.as_bytes());
    if !ok {
        tracing::debug!("CSRF token mismatch");
    }
    ok
}

fn is_well_formed(token: &str) -> bool {
    from_base64url(token).is_ok_and(|bytes| bytes.len() == TOKEN_BYTES)
}

fn cookie_config(secure: bool) -> CookieConfig {
    CookieConfig::named(CSRF_COOKIE).with_secure(secure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    fn headers_with_cookie(cookie: &str) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_str(cookie).unwrap());
        headers
    }

    #[test]
    fn test_issue_mints_token_without_cookie() {
        let token = CsrfToken::issue(&HeaderMap::new(), false);
        assert!(is_well_formed(token.value()));

        let cookie = token.set_cookie().unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with(&format!("{}={}", CSRF_COOKIE, token.value())));
        assert!(!cookie.contains("Secure"));
    }

    #[test]
    fn test_issue_reuses_existing_cookie() {
        let existing = random_token(TOKEN_BYTES);
        let headers = headers_with_cookie(&format!("{}={}", CSRF_COOKIE, existing));

        let token = CsrfToken::issue(&headers, true);
        assert_eq!(token.value(), existing);
        assert!(token.set_cookie().is_none());
    }

    #[test]
    fn test_issue_replaces_malformed_cookie() {
        let headers = headers_with_cookie("csrf_token=short");
        let token = CsrfToken::issue(&headers, true);
        assert_ne!(token.value(), "short");
        assert!(token.set_cookie().is_some());
    }

    #[test]
    fn test_verify() {
        let value = random_token(TOKEN_BYTES);
        let headers = headers_with_cookie(&format!("{}={}", CSRF_COOKIE, value));

        assert!(verify(&headers, &value));
        assert!(!verify(&headers, ""));
        assert!(!verify(&headers, &random_token(TOKEN_BYTES)));
        assert!(!verify(&HeaderMap::new(), &value));
    }
}
