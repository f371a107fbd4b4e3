//! Sign Out Use Case
//!
//! Invalidates login sessions.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::application::config::AuthConfig;
use crate::domain::repository::AuthSessionRepository;
use crate::domain::value_object::session_token;
use crate::error::{AuthError, AuthResult};

/// Sign out use case
pub struct SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<S> SignOutUseCase<S>
where
    S: AuthSessionRepository,
{
    pub fn new(session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            session_repo,
            config,
        }
    }

    /// Sign out from the session named by the cookie token
    pub async fn execute(&self, token: &str) -> AuthResult<()> {
        let session_id = session_token::verify(token, &self.config.session_secret)
            .ok_or(AuthError::SessionInvalid)?;
        self.session_repo.delete_session(session_id).await?;

        tracing::info!(session_id = %session_id, "Account signed out");
        Ok(())
    }

    /// Sign out every session of one account
    pub async fn execute_all(&self, account_id: AccountId) -> AuthResult<u64> {
        let deleted = self
            .session_repo
            .delete_sessions_for_account(account_id)
            .await?;

        tracing::info!(
            account_id = %account_id,
            deleted = deleted,
            "Account signed out from all sessions"
        );

        Ok(deleted)
    }
}
