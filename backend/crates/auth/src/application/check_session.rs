//! Check Session Use Case
//!
//! Resolves a session cookie to the signed-in account.

use std::sync::Arc;

use kernel::id::AccountId;
use platform::crypto::constant_time_eq;
use uuid::Uuid;

use crate::application::config::AuthConfig;
use crate::domain::entity::auth_session::AuthSession;
use crate::domain::repository::{AccountRepository, AuthSessionRepository};
use crate::domain::value_object::{email::Email, session_token};
use crate::error::{AuthError, AuthResult};

/// Signed-in account, inserted into request extensions by the middleware
#[derive(Debug, Clone)]
pub struct CurrentAccount {
    pub account_id: AccountId,
    pub email: Email,
    pub session_id: Uuid,
}

/// Check session use case
pub struct CheckSessionUseCase<A, S>
where
    A: AccountRepository,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    account_repo: Arc<A>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, S> CheckSessionUseCase<A, S>
where
    A: AccountRepository,
    S: AuthSessionRepository + Send + Sync + 'static,
{
    pub fn new(account_repo: Arc<A>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            session_repo,
            config,
        }
    }

    /// Validate the token and return the account it belongs to
    ///
    /// Rejects tampered tokens, unknown or expired sessions, a different
    /// client fingerprint, a rotated session key and inactive accounts.
    pub async fn execute(
        &self,
        session_token: &str,
        fingerprint_hash: &[u8],
    ) -> AuthResult<CurrentAccount> {
        let session_id = session_token::verify(session_token, &self.config.session_secret)
            .ok_or(AuthError::SessionInvalid)?;

        let session = self
            .session_repo
            .find_session(session_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if session.is_expired() {
            self.session_repo.delete_session(session_id).await?;
            return Err(AuthError::SessionInvalid);
        }

        if !constant_time_eq(&session.client_fingerprint_hash, fingerprint_hash) {
            return Err(AuthError::SessionFingerprintMismatch);
        }

        let account = self
            .account_repo
            .find_account_by_id(session.account_id)
            .await?
            .ok_or(AuthError::SessionInvalid)?;

        if !account.can_login() || account.session_key != session.session_key {
            self.session_repo.delete_session(session_id).await?;
            tracing::info!(
                account_id = %account.account_id,
                session_id = %session_id,
                "Revoked stale session"
            );
            return Err(AuthError::SessionInvalid);
        }

        self.record_activity(session)?;

        Ok(CurrentAccount {
            account_id: account.account_id,
            email: account.email,
            session_id,
        })
    }

    /// Just check if session is valid
    pub async fn is_valid(&self, session_token: &str, fingerprint_hash: &[u8]) -> bool {
        self.execute(session_token, fingerprint_hash).await.is_ok()
    }

    /// Touch the session and slide remember-me expiry (fire and forget)
    fn record_activity(&self, mut session: AuthSession) -> AuthResult<()> {
        let ttl_long = chrono::Duration::from_std(self.config.session_ttl_long)
            .map_err(|e| AuthError::Internal(format!("Invalid session TTL: {e}")))?;

        session.touch();
        session.extend_if_needed(ttl_long);

        let repo = self.session_repo.clone();
        tokio::spawn(async move {
            if let Err(e) = repo.update_session(&session).await {
                tracing::warn!(error = %e, "Failed to update session activity");
            }
        });

        Ok(())
    }
}
