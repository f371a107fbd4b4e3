//! Application Configuration
//!
//! Configuration for the Auth application layer.

use std::time::Duration;

use platform::cookie::CookieConfig;
use platform::crypto::{derive_key, random_key};

/// Re-export SameSite from platform
pub use platform::cookie::SameSite;

/// Auth application configuration
#[derive(Debug, Clone)]
pub struct AuthConfig {
    /// Session cookie name
    pub session_cookie_name: String,
    /// Session secret key for HMAC signing (32 bytes)
    pub session_secret: [u8; 32],
    /// Session TTL without "Remember Me" (12 hours)
    pub session_ttl_short: Duration,
    /// Session TTL with "Remember Me" (1 week)
    pub session_ttl_long: Duration,
    /// Whether to require Secure cookies
    pub cookie_secure: bool,
    /// SameSite policy
    pub cookie_same_site: SameSite,
    /// Password pepper (optional, application-wide secret)
    pub password_pepper: Option<Vec<u8>>,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            session_cookie_name: "session".to_string(),
            session_secret: [0u8; 32],
            session_ttl_short: Duration::from_secs(12 * 3600),
            session_ttl_long: Duration::from_secs(7 * 24 * 3600),
            cookie_secure: true,
            cookie_same_site: SameSite::Lax,
            password_pepper: None,
        }
    }
}

impl AuthConfig {
    /// Config signing sessions with a key derived from `secret`
    pub fn with_secret(secret: &str) -> Self {
        Self {
            session_secret: derive_key(secret),
            ..Default::default()
        }
    }

    /// Create config with a random session secret (for development)
    pub fn with_random_secret() -> Self {
        Self {
            session_secret: random_key(),
            ..Default::default()
        }
    }

    /// Create config for development (insecure cookie)
    pub fn development() -> Self {
        Self {
            cookie_secure: false,
            ..Self::with_random_secret()
        }
    }

    pub fn with_pepper(mut self, pepper: Option<String>) -> Self {
        self.password_pepper = pepper.map(String::into_bytes);
        self
    }

    pub fn session_ttl(&self, remember_me: bool) -> chrono::Duration {
        let ttl = if remember_me {
            self.session_ttl_long
        } else {
            self.session_ttl_short
        };
        chrono::Duration::from_std(ttl).unwrap_or(chrono::Duration::hours(12))
    }

    /// Get password pepper as slice
    pub fn pepper(&self) -> Option<&[u8]> {
        self.password_pepper.as_deref()
    }

    /// Session cookie attributes; Max-Age matches the session TTL
    pub fn session_cookie(&self, remember_me: bool) -> CookieConfig {
        CookieConfig {
            same_site: self.cookie_same_site,
            ..CookieConfig::named(&self.session_cookie_name)
                .with_secure(self.cookie_secure)
                .with_max_age(Some(self.session_ttl(remember_me).num_seconds()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_secret_is_deterministic() {
        assert_eq!(
            AuthConfig::with_secret("s3cret").session_secret,
            AuthConfig::with_secret("s3cret").session_secret
        );
        assert_ne!(
            AuthConfig::with_random_secret().session_secret,
            AuthConfig::with_random_secret().session_secret
        );
    }

    #[test]
    fn test_session_cookie_max_age() {
        let config = AuthConfig::development();
        let short = config.session_cookie(false).build_set_cookie("t");
        let long = config.session_cookie(true).build_set_cookie("t");

        assert!(short.contains("Max-Age=43200"));
        assert!(long.contains("Max-Age=604800"));
        assert!(!short.contains("Secure"));
    }

    #[test]
    fn test_pepper() {
        let config = AuthConfig::default().with_pepper(Some("salt".to_string()));
        assert_eq!(config.pepper(), Some(&b"salt"[..]));
        assert_eq!(AuthConfig::default().pepper(), None);
    }
}
