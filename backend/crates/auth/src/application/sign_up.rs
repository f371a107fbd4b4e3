//! Sign Up Use Case
//!
//! Registers a new account.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::entity::account::{Account, NewAccount};
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{
    account_password::{AccountPassword, RawPassword},
    email::Email,
};
use crate::error::{AuthError, AuthResult};

/// Sign up input
pub struct SignUpInput {
    pub email: String,
    pub password: String,
}

/// Sign up use case
pub struct SignUpUseCase<A>
where
    A: AccountRepository,
{
    account_repo: Arc<A>,
    config: Arc<AuthConfig>,
}

impl<A> SignUpUseCase<A>
where
    A: AccountRepository,
{
    pub fn new(account_repo: Arc<A>, config: Arc<AuthConfig>) -> Self {
        Self {
            account_repo,
            config,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<Account> {
        let email = Email::new(&input.email).map_err(|_| AuthError::InvalidEmail)?;

        if self.account_repo.email_exists(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let raw_password = RawPassword::new(input.password)?;
        let password_hash = AccountPassword::from_raw(&raw_password, self.config.pepper())?;

        // A concurrent registration can still win the race; the UNIQUE
        // constraint reports it as EmailTaken.
        let account = self
            .account_repo
            .create_account(&NewAccount::new(email, password_hash))
            .await?;

        tracing::info!(
            account_id = %account.account_id,
            email = %account.email,
            "Account registered"
        );

        Ok(account)
    }
}
