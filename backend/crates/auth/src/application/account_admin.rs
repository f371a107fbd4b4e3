//! Account Administration Use Case
//!
//! Activation, session key rotation and role membership. Not exposed over
//! HTTP; called by operators and tests.

use std::sync::Arc;

use kernel::id::AccountId;

use crate::domain::entity::role::Role;
use crate::domain::repository::{AccountRepository, RoleRepository};
use crate::domain::value_object::{
    role_name::{ROLE_DESCRIPTION_MAX_LENGTH, RoleName, RoleSet},
    session_key::SessionKey,
};
use crate::error::{AuthError, AuthResult};

pub struct AccountAdminUseCase<A, R>
where
    A: AccountRepository,
    R: RoleRepository,
{
    account_repo: Arc<A>,
    role_repo: Arc<R>,
}

impl<A, R> AccountAdminUseCase<A, R>
where
    A: AccountRepository,
    R: RoleRepository,
{
    pub fn new(account_repo: Arc<A>, role_repo: Arc<R>) -> Self {
        Self {
            account_repo,
            role_repo,
        }
    }

    /// Enable or disable sign-in; disabled accounts lose their sessions
    /// on next use
    pub async fn set_active(&self, account_id: AccountId, active: bool) -> AuthResult<()> {
        self.account_repo
            .set_account_active(account_id, active)
            .await?;
        tracing::info!(account_id = %account_id, active = active, "Account activation changed");
        Ok(())
    }

    /// Replace the session key, invalidating every existing session
    pub async fn rotate_session_key(&self, account_id: AccountId) -> AuthResult<SessionKey> {
        let key = self.account_repo.rotate_session_key(account_id).await?;
        tracing::info!(account_id = %account_id, "Session key rotated");
        Ok(key)
    }

    pub async fn create_role(&self, name: &str, description: Option<&str>) -> AuthResult<Role> {
        let name = RoleName::new(name)?;

        let description = description.map(str::trim).filter(|d| !d.is_empty());
        if description.is_some_and(|d| d.chars().count() > ROLE_DESCRIPTION_MAX_LENGTH) {
            return Err(AuthError::InvalidRole(format!(
                "description must be at most {} characters",
                ROLE_DESCRIPTION_MAX_LENGTH
            )));
        }

        if self.role_repo.find_role_by_name(&name).await?.is_some() {
            return Err(AuthError::InvalidRole(format!("role {name} already exists")));
        }

        let role = self.role_repo.create_role(&name, description).await?;
        tracing::info!(role = %role.name, "Role created");
        Ok(role)
    }

    /// Grant a role by name; granting a held role is a no-op
    pub async fn grant_role(&self, account_id: AccountId, role: &str) -> AuthResult<RoleSet> {
        let role = self.resolve_role(role).await?;
        self.ensure_account(account_id).await?;

        self.role_repo
            .add_role_to_account(account_id, role.role_id)
            .await?;
        self.role_repo.roles_for_account(account_id).await
    }

    pub async fn revoke_role(&self, account_id: AccountId, role: &str) -> AuthResult<RoleSet> {
        let role = self.resolve_role(role).await?;

        self.role_repo
            .remove_role_from_account(account_id, role.role_id)
            .await?;
        self.role_repo.roles_for_account(account_id).await
    }

    pub async fn roles_for(&self, account_id: AccountId) -> AuthResult<RoleSet> {
        self.role_repo.roles_for_account(account_id).await
    }

    async fn resolve_role(&self, role: &str) -> AuthResult<Role> {
        let name = RoleName::new(role)?;
        self.role_repo
            .find_role_by_name(&name)
            .await?
            .ok_or_else(|| AuthError::RoleNotFound(name.to_string()))
    }

    async fn ensure_account(&self, account_id: AccountId) -> AuthResult<()> {
        self.account_repo
            .find_account_by_id(account_id)
            .await?
            .map(|_| ())
            .ok_or(AuthError::AccountNotFound)
    }
}
