//! Auth Session Entity
//!
//! Server-side login session, referenced from the cookie by a signed token.

use chrono::{DateTime, Duration, Utc};
use kernel::id::AccountId;
use uuid::Uuid;

use crate::domain::value_object::session_key::SessionKey;

/// Auth session entity
#[derive(Debug, Clone)]
pub struct AuthSession {
    /// Session ID (UUID v4)
    pub session_id: Uuid,
    pub account_id: AccountId,
    /// Account session key at sign-in; a rotated key invalidates the session
    pub session_key: SessionKey,
    /// Session expiration (Unix timestamp ms)
    pub expires_at_ms: i64,
    /// Whether "Remember Me" was checked
    pub remember_me: bool,
    /// Client fingerprint hash (User-Agent based)
    pub client_fingerprint_hash: Vec<u8>,
    /// Client IP (for logging)
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
    pub created_at: DateTime<Utc>,
    pub last_activity_at: DateTime<Utc>,
}

/// Client details captured at sign-in
#[derive(Debug, Clone)]
pub struct SessionClient {
    pub fingerprint_hash: Vec<u8>,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl AuthSession {
    /// Create a new auth session
    ///
    /// TTL comes from the application config.
    pub fn new(
        account_id: AccountId,
        session_key: SessionKey,
        remember_me: bool,
        client: SessionClient,
        ttl: Duration,
    ) -> Self {
        let now = Utc::now();

        Self {
            session_id: Uuid::new_v4(),
            account_id,
            session_key,
            expires_at_ms: (now + ttl).timestamp_millis(),
            remember_me,
            client_fingerprint_hash: client.fingerprint_hash,
            client_ip: client.ip,
            user_agent: client.user_agent,
            created_at: now,
            last_activity_at: now,
        }
    }

    pub fn is_expired(&self) -> bool {
        Utc::now().timestamp_millis() > self.expires_at_ms
    }

    /// Update last activity timestamp
    pub fn touch(&mut self) {
        self.last_activity_at = Utc::now();
    }

    pub fn remaining_ms(&self) -> i64 {
        let now_ms = Utc::now().timestamp_millis();
        (self.expires_at_ms - now_ms).max(0)
    }

    /// Slide a remember-me session forward
    ///
    /// Extends to (now + ttl_long) once less than half of ttl_long remains.
    /// Other sessions keep their fixed expiry.
    pub fn extend_if_needed(&mut self, ttl_long: Duration) {
        if !self.remember_me {
            return;
        }

        let now = Utc::now();
        if self.expires_at_ms < (now + (ttl_long / 2)).timestamp_millis() {
            self.expires_at_ms = (now + ttl_long).timestamp_millis();
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> SessionClient {
        SessionClient {
            fingerprint_hash: vec![1; 32],
            ip: None,
            user_agent: Some("test-agent".to_string()),
        }
    }

    #[test]
    fn test_new_session_not_expired() {
        let session = AuthSession::new(
            AccountId::new(1),
            SessionKey::generate(),
            false,
            client(),
            Duration::hours(12),
        );
        assert!(!session.is_expired());
        assert!(session.remaining_ms() > 11 * 3600 * 1000);
    }

    #[test]
    fn test_negative_ttl_is_expired() {
        let session = AuthSession::new(
            AccountId::new(1),
            SessionKey::generate(),
            false,
            client(),
            Duration::seconds(-1),
        );
        assert!(session.is_expired());
        assert_eq!(session.remaining_ms(), 0);
    }

    #[test]
    fn test_extend_only_remember_me() {
        let ttl_long = Duration::days(7);

        let mut short = AuthSession::new(
            AccountId::new(1),
            SessionKey::generate(),
            false,
            client(),
            Duration::hours(1),
        );
        let before = short.expires_at_ms;
        short.extend_if_needed(ttl_long);
        assert_eq!(short.expires_at_ms, before);

        let mut long = AuthSession::new(
            AccountId::new(1),
            SessionKey::generate(),
            true,
            client(),
            Duration::hours(1),
        );
        long.extend_if_needed(ttl_long);
        assert!(long.remaining_ms() > Duration::days(6).num_milliseconds());
    }
}
