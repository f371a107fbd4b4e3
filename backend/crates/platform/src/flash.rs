//! Flash Messages
//!
//! One-shot notices carried across a redirect in a cookie. The next page
//! that renders the message also clears the cookie.

use axum::http::{HeaderMap, HeaderValue};

use crate::cookie::{CookieConfig, delete_cookie_header, extract_cookie, set_cookie_header};
use crate::crypto::{from_base64url, to_base64url};

pub const FLASH_COOKIE: &str = "flash";

/// Flash category, rendered as a CSS class
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlashLevel {
    Info,
    Success,
    Warning,
    Danger,
}

impl FlashLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            FlashLevel::Info => "info",
            FlashLevel::Success => "success",
            FlashLevel::Warning => "warning",
            FlashLevel::Danger => "danger",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "info" => Some(FlashLevel::Info),
            "success" => Some(FlashLevel::Success),
            "warning" => Some(FlashLevel::Warning),
            "danger" => Some(FlashLevel::Danger),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Flash {
    pub level: FlashLevel,
    pub message: String,
}

impl Flash {
    pub fn new(level: FlashLevel, message: impl Into<String>) -> Self {
        Self {
            level,
            message: message.into(),
        }
    }

    pub fn success(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Success, message)
    }

    pub fn info(message: impl Into<String>) -> Self {
        Self::new(FlashLevel::Info, message)
    }

    /// Cookie value: base64url("level\nmessage")
    fn encode(&self) -> String {
        to_base64url(format!("{}\n{}", self.level.as_str(), self.message).as_bytes())
    }

    fn decode(value: &str) -> Option<Self> {
        let bytes = from_base64url(value).ok()?;
        let text = String::from_utf8(bytes).ok()?;
        let (level, message) = text.split_once('\n')?;
        Some(Self::new(FlashLevel::parse(level)?, message))
    }

    /// Set-Cookie header storing this message
    pub fn set_cookie(&self, secure: bool) -> Option<HeaderValue> {
        set_cookie_header(&cookie_config(secure), &self.encode())
    }
}

/// Read the pending flash, if any
///
/// Pair with [`clear_cookie`] on the response that displays it.
pub fn peek(headers: &HeaderMap) -> Option<Flash> {
    extract_cookie(headers, FLASH_COOKIE).and_then(|v| Flash::decode(&v))
}

/// Set-Cookie header removing the flash cookie
pub fn clear_cookie(secure: bool) -> Option<HeaderValue> {
    delete_cookie_header(&cookie_config(secure))
}

fn cookie_config(secure: bool) -> CookieConfig {
    CookieConfig::named(FLASH_COOKIE).with_secure(secure)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::header;

    fn cookie_pair(set_cookie: &HeaderValue) -> String {
        let raw = set_cookie.to_str().unwrap();
        raw.split(';').next().unwrap().to_string()
    }

    #[test]
    fn test_flash_survives_cookie_trip() {
        let flash = Flash::success("Your blog post has been created!");
        let set_cookie = flash.set_cookie(false).unwrap();

        let mut headers = HeaderMap::new();
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&cookie_pair(&set_cookie)).unwrap(),
        );

        assert_eq!(peek(&headers), Some(flash));
    }

    #[test]
    fn test_garbage_cookie_is_ignored() {
        let mut headers = HeaderMap::new();
        headers.insert(header::COOKIE, HeaderValue::from_static("flash=!!!"));
        assert_eq!(peek(&headers), None);

        // valid base64 but unknown level
        let bogus = to_base64url(b"shout\nhello");
        headers.insert(
            header::COOKIE,
            HeaderValue::from_str(&format!("flash={}", bogus)).unwrap(),
        );
        assert_eq!(peek(&headers), None);
    }

    #[test]
    fn test_clear_cookie() {
        let cookie = clear_cookie(true).unwrap();
        let cookie = cookie.to_str().unwrap();
        assert!(cookie.starts_with("flash=;"));
        assert!(cookie.contains("Max-Age=0"));
    }
}
