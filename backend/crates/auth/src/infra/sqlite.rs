//! SQLite Repository Implementations

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, RoleId};
use sqlx::SqlitePool;
use uuid::Uuid;

use crate::domain::entity::{
    account::{Account, NewAccount},
    auth_session::AuthSession,
    role::Role,
};
use crate::domain::repository::{AccountRepository, AuthSessionRepository, RoleRepository};
use crate::domain::value_object::{
    account_password::AccountPassword,
    email::Email,
    role_name::{RoleName, RoleSet},
    session_key::SessionKey,
};
use crate::error::{AuthError, AuthResult};

/// SQLite-backed auth repository
#[derive(Clone)]
pub struct SqliteAuthRepository {
    pool: SqlitePool,
}

impl SqliteAuthRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    async fn load_account(&self, row: Option<AccountRow>) -> AuthResult<Option<Account>> {
        let Some(row) = row else {
            return Ok(None);
        };
        let roles = self.roles_for_account(AccountId::new(row.id)).await?;
        row.into_account(roles).map(Some)
    }
}

// ============================================================================
// Account Repository Implementation
// ============================================================================

impl AccountRepository for SqliteAuthRepository {
    async fn create_account(&self, account: &NewAccount) -> AuthResult<Account> {
        let result = sqlx::query(
            r#"
            INSERT INTO accounts (
                email,
                password_hash,
                active,
                session_key,
                created_at
            ) VALUES (?, ?, 1, ?, ?)
            "#,
        )
        .bind(account.email.as_str())
        .bind(account.password_hash.as_str())
        .bind(account.session_key.to_db())
        .bind(account.created_at)
        .execute(&self.pool)
        .await
        .map_err(|e| match e {
            sqlx::Error::Database(ref db) if db.is_unique_violation() => AuthError::EmailTaken,
            other => AuthError::Database(other),
        })?;

        Ok(Account {
            account_id: AccountId::new(result.last_insert_rowid()),
            email: account.email.clone(),
            password_hash: account.password_hash.clone(),
            active: true,
            session_key: account.session_key,
            roles: RoleSet::new(),
            created_at: account.created_at,
        })
    }

    async fn find_account_by_id(&self, account_id: AccountId) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, active, session_key, created_at
            FROM accounts
            WHERE id = ?
            "#,
        )
        .bind(account_id.get())
        .fetch_optional(&self.pool)
        .await?;

        self.load_account(row).await
    }

    async fn find_account_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        let row = sqlx::query_as::<_, AccountRow>(
            r#"
            SELECT id, email, password_hash, active, session_key, created_at
            FROM accounts
            WHERE email = ?
            "#,
        )
        .bind(email.as_str())
        .fetch_optional(&self.pool)
        .await?;

        self.load_account(row).await
    }

    async fn email_exists(&self, email: &Email) -> AuthResult<bool> {
        let exists = sqlx::query_scalar::<_, bool>(
            "SELECT EXISTS(SELECT 1 FROM accounts WHERE email = ?)",
        )
        .bind(email.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(exists)
    }

    async fn set_account_active(&self, account_id: AccountId, active: bool) -> AuthResult<()> {
        let updated = sqlx::query("UPDATE accounts SET active = ? WHERE id = ?")
            .bind(active)
            .bind(account_id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AuthError::AccountNotFound);
        }
        Ok(())
    }

    async fn rotate_session_key(&self, account_id: AccountId) -> AuthResult<SessionKey> {
        let key = SessionKey::generate();

        let updated = sqlx::query("UPDATE accounts SET session_key = ? WHERE id = ?")
            .bind(key.to_db())
            .bind(account_id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        if updated == 0 {
            return Err(AuthError::AccountNotFound);
        }
        Ok(key)
    }
}

// ============================================================================
// Role Repository Implementation
// ============================================================================

impl RoleRepository for SqliteAuthRepository {
    async fn create_role(&self, name: &RoleName, description: Option<&str>) -> AuthResult<Role> {
        let result = sqlx::query("INSERT INTO roles (name, description) VALUES (?, ?)")
            .bind(name.as_str())
            .bind(description)
            .execute(&self.pool)
            .await?;

        Ok(Role {
            role_id: RoleId::new(result.last_insert_rowid()),
            name: name.clone(),
            description: description.map(str::to_string),
        })
    }

    async fn find_role_by_name(&self, name: &RoleName) -> AuthResult<Option<Role>> {
        let row = sqlx::query_as::<_, RoleRow>(
            "SELECT id, name, description FROM roles WHERE name = ?",
        )
        .bind(name.as_str())
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(RoleRow::into_role))
    }

    async fn add_role_to_account(&self, account_id: AccountId, role_id: RoleId) -> AuthResult<()> {
        // Composite primary key keeps membership a set
        sqlx::query("INSERT OR IGNORE INTO account_roles (account_id, role_id) VALUES (?, ?)")
            .bind(account_id.get())
            .bind(role_id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn remove_role_from_account(
        &self,
        account_id: AccountId,
        role_id: RoleId,
    ) -> AuthResult<()> {
        sqlx::query("DELETE FROM account_roles WHERE account_id = ? AND role_id = ?")
            .bind(account_id.get())
            .bind(role_id.get())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn roles_for_account(&self, account_id: AccountId) -> AuthResult<RoleSet> {
        let names = sqlx::query_scalar::<_, String>(
            r#"
            SELECT r.name
            FROM roles r
            JOIN account_roles ar ON ar.role_id = r.id
            WHERE ar.account_id = ?
            "#,
        )
        .bind(account_id.get())
        .fetch_all(&self.pool)
        .await?;

        Ok(names.into_iter().map(RoleName::from_db).collect())
    }
}

// ============================================================================
// Auth Session Repository Implementation
// ============================================================================

impl AuthSessionRepository for SqliteAuthRepository {
    async fn create_session(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            INSERT INTO auth_sessions (
                session_id,
                account_id,
                session_key,
                expires_at_ms,
                remember_me,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            ) VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(session.session_id.to_string())
        .bind(session.account_id.get())
        .bind(session.session_key.to_db())
        .bind(session.expires_at_ms)
        .bind(session.remember_me)
        .bind(&session.client_fingerprint_hash)
        .bind(&session.client_ip)
        .bind(&session.user_agent)
        .bind(session.created_at)
        .bind(session.last_activity_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_session(&self, session_id: Uuid) -> AuthResult<Option<AuthSession>> {
        let row = sqlx::query_as::<_, AuthSessionRow>(
            r#"
            SELECT
                session_id,
                account_id,
                session_key,
                expires_at_ms,
                remember_me,
                client_fingerprint_hash,
                client_ip,
                user_agent,
                created_at,
                last_activity_at
            FROM auth_sessions
            WHERE session_id = ?
            "#,
        )
        .bind(session_id.to_string())
        .fetch_optional(&self.pool)
        .await?;

        row.map(AuthSessionRow::into_session).transpose()
    }

    async fn update_session(&self, session: &AuthSession) -> AuthResult<()> {
        sqlx::query(
            r#"
            UPDATE auth_sessions SET
                expires_at_ms = ?,
                last_activity_at = ?
            WHERE session_id = ?
            "#,
        )
        .bind(session.expires_at_ms)
        .bind(session.last_activity_at)
        .bind(session.session_id.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn delete_session(&self, session_id: Uuid) -> AuthResult<()> {
        sqlx::query("DELETE FROM auth_sessions WHERE session_id = ?")
            .bind(session_id.to_string())
            .execute(&self.pool)
            .await?;

        Ok(())
    }

    async fn delete_sessions_for_account(&self, account_id: AccountId) -> AuthResult<u64> {
        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE account_id = ?")
            .bind(account_id.get())
            .execute(&self.pool)
            .await?
            .rows_affected();

        Ok(deleted)
    }

    async fn cleanup_expired_sessions(&self) -> AuthResult<u64> {
        let now_ms = Utc::now().timestamp_millis();

        let deleted = sqlx::query("DELETE FROM auth_sessions WHERE expires_at_ms < ?")
            .bind(now_ms)
            .execute(&self.pool)
            .await?
            .rows_affected();

        tracing::info!(sessions_deleted = deleted, "Cleaned up expired auth sessions");

        Ok(deleted)
    }
}

// ============================================================================
// Row Types for sqlx mapping
// ============================================================================

#[derive(sqlx::FromRow)]
struct AccountRow {
    id: i64,
    email: String,
    password_hash: String,
    active: bool,
    session_key: String,
    created_at: DateTime<Utc>,
}

impl AccountRow {
    fn into_account(self, roles: RoleSet) -> AuthResult<Account> {
        Ok(Account {
            account_id: AccountId::new(self.id),
            email: Email::from_db(self.email),
            password_hash: AccountPassword::from_db(&self.password_hash)?,
            active: self.active,
            session_key: SessionKey::from_db(&self.session_key)?,
            roles,
            created_at: self.created_at,
        })
    }
}

#[derive(sqlx::FromRow)]
struct RoleRow {
    id: i64,
    name: String,
    description: Option<String>,
}

impl RoleRow {
    fn into_role(self) -> Role {
        Role {
            role_id: RoleId::new(self.id),
            name: RoleName::from_db(self.name),
            description: self.description,
        }
    }
}

#[derive(sqlx::FromRow)]
struct AuthSessionRow {
    session_id: String,
    account_id: i64,
    session_key: String,
    expires_at_ms: i64,
    remember_me: bool,
    client_fingerprint_hash: Vec<u8>,
    client_ip: Option<String>,
    user_agent: Option<String>,
    created_at: DateTime<Utc>,
    last_activity_at: DateTime<Utc>,
}

impl AuthSessionRow {
    fn into_session(self) -> AuthResult<AuthSession> {
        let session_id = self
            .session_id
            .parse()
            .map_err(|e| AuthError::Internal(format!("Invalid session_id: {e}")))?;

        Ok(AuthSession {
            session_id,
            account_id: AccountId::new(self.account_id),
            session_key: SessionKey::from_db(&self.session_key)?,
            expires_at_ms: self.expires_at_ms,
            remember_me: self.remember_me,
            client_fingerprint_hash: self.client_fingerprint_hash,
            client_ip: self.client_ip,
            user_agent: self.user_agent,
            created_at: self.created_at,
            last_activity_at: self.last_activity_at,
        })
    }
}
