//! Sign In Use Case
//!
//! Authenticates an account and creates a session.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::application::config::AuthConfig;
use crate::domain::entity::{
    account::Account,
    auth_session::{AuthSession, SessionClient},
};
use crate::domain::repository::{AccountRepository, AuthSessionRepository};
use crate::domain::value_object::{
    account_password::{RawPassword, verify_nothing},
    email::Email,
    session_token,
};
use crate::error::{AuthError, AuthResult};

/// Re-export ClientFingerprint from platform
pub use platform::client::ClientFingerprint;

/// Sign in input
pub struct SignInInput {
    pub email: String,
    pub password: String,
    pub remember_me: bool,
}

/// Sign in output
pub struct SignInOutput {
    /// Signed session token for the cookie
    pub session_token: String,
    pub account_id: AccountId,
    pub remember_me: bool,
}

/// Sign in use case
pub struct SignInUseCase<A, S>
where
    A: AccountRepository,
    S: AuthSessionRepository,
{
    account_repo: Arc<A>,
    session_repo: Arc<S>,
    config: Arc<AuthConfig>,
}

impl<A, S> SignInUseCase<A, S>
where
    A: AccountRepository,
    S: AuthSessionRepository,
{
    pub fn new(account_repo: Arc<A>, session_repo: Arc<S>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            session_repo,
            config,
        }
    }

    /// Check credentials and open a session
    ///
    /// Every failure (unknown email, wrong password, inactive account) is
    /// reported as `InvalidCredentials`.
    pub async fn execute(
        &self,
        input: SignInInput,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<SignInOutput> {
        let raw_password = RawPassword::for_login(input.password);

        let account = match Email::new(&input.email) {
            Ok(email) => self.account_repo.find_account_by_email(&email).await?,
            Err(_) => None,
        };

        let Some(account) = account else {
            verify_nothing(&raw_password, self.config.pepper());
            return Err(AuthError::InvalidCredentials);
        };

        if !account
            .password_hash
            .verify(&raw_password, self.config.pepper())
        {
            return Err(AuthError::InvalidCredentials);
        }

        if !account.can_login() {
            tracing::warn!(account_id = %account.account_id, "Sign-in attempt on inactive account");
            return Err(AuthError::InvalidCredentials);
        }

        self.start_session(&account, input.remember_me, fingerprint)
            .await
    }

    /// Open a session for an already-authenticated account
    ///
    /// Used directly after registration.
    pub async fn start_session(
        &self,
        account: &Account,
        remember_me: bool,
        fingerprint: ClientFingerprint,
    ) -> AuthResult<SignInOutput> {
        let client = SessionClient {
            fingerprint_hash: fingerprint.hash_vec(),
            ip: fingerprint.ip_string(),
            user_agent: fingerprint.user_agent,
        };

        let session = AuthSession::new(
            account.account_id,
            account.session_key,
            remember_me,
            client,
            self.config.session_ttl(remember_me),
        );

        self.session_repo.create_session(&session).await?;

        let session_token = session_token::sign(session.session_id, &self.config.session_secret);

        tracing::info!(
            account_id = %account.account_id,
            session_id = %session.session_id,
            remember_me = remember_me,
            "Account signed in"
        );

        Ok(SignInOutput {
            session_token,
            account_id: account.account_id,
            remember_me,
        })
    }
}
