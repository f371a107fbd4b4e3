//! Repository Traits
//!
//! Interfaces for data persistence. Implementation is in infrastructure layer.
//! Method names are distinct across traits so one type can implement all
//! three without ambiguous calls.

use kernel::id::{AccountId, RoleId};
use uuid::Uuid;

use crate::domain::entity::{
    account::{Account, NewAccount},
    auth_session::AuthSession,
    role::Role,
};
use crate::domain::value_object::{
    email::Email,
    role_name::{RoleName, RoleSet},
    session_key::SessionKey,
};
use crate::error::AuthResult;

/// Account repository trait
#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account
    ///
    /// A duplicate email fails with `AuthError::EmailTaken`.
    async fn create_account(&self, account: &NewAccount) -> AuthResult<Account>;

    async fn find_account_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>>;

    async fn find_account_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    async fn email_exists(&self, email: &Email) -> AuthResult<bool>;

    /// Fails with `AuthError::AccountNotFound` for an unknown id
    async fn set_account_active(&self, account_id: AccountId, active: bool) -> AuthResult<()>;

    /// Store a fresh session key and return it
    async fn rotate_session_key(&self, account_id: AccountId) -> AuthResult<SessionKey>;
}

/// Role repository trait
#[trait_variant::make(RoleRepository: Send)]
pub trait LocalRoleRepository {
    async fn create_role(&self, name: &RoleName, description: Option<&str>) -> AuthResult<Role>;

    async fn find_role_by_name(&self, name: &RoleName) -> AuthResult<Option<Role>>;

    /// Idempotent: holding the role already is not an error
    async fn add_role_to_account(&self, account_id: AccountId, role_id: RoleId) -> AuthResult<()>;

    async fn remove_role_from_account(
        &self,
        account_id: AccountId,
        role_id: RoleId,
    ) -> AuthResult<()>;

    async fn roles_for_account(&self, account_id: AccountId) -> AuthResult<RoleSet>;
}

/// Auth session repository trait
#[trait_variant::make(AuthSessionRepository: Send)]
pub trait LocalAuthSessionRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()>;

    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>>;

    /// Persist expiry and last activity
    async fn update_session(&self, session: &AuthSession) -> AuthResult<()>;

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()>;

    async fn delete_sessions_for_account(&self, account_id: AccountId) -> AuthResult<u64>;

    async fn cleanup_expired_sessions(&self) -> AuthResult<u64>;
}
