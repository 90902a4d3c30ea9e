/**
 * User Model and Credential Store
 *
 * This module defines the user record, the role enumeration, and the
 * credential store the authentication flows run against. The store is a
 * trait with two implementations: PostgreSQL for real deployments and an
 * in-memory map used when no database is configured (and by the tests).
 */

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;
use tokio::sync::RwLock;
use uuid::Uuid;

/// Role attached to every user record.
///
/// Serialized lowercase both in JSON and in the database. New roles get a
/// new variant plus an entry in the permission table; nothing else needs
/// to change.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[serde(rename_all = "lowercase")]
#[sqlx(type_name = "text", rename_all = "lowercase")]
pub enum Role {
    Admin,
    User,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::User => "user",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// User struct representing a user in the database
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
pub struct User {
    /// Unique user ID (UUID)
    pub id: Uuid,
    /// Username (unique)
    pub username: String,
    /// User email address (unique)
    pub email: String,
    /// Hashed password (bcrypt)
    pub password_hash: String,
    /// Role (admin or user)
    pub role: Role,
    /// Created at timestamp
    pub created_at: DateTime<Utc>,
    /// Updated at timestamp
    pub updated_at: DateTime<Utc>,
}

/// Input for creating a user. The password is already hashed by the time
/// it reaches the store.
#[derive(Debug, Clone)]
pub struct NewUser {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
}

/// Credential store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A unique field collided on insert. `field` is the capitalized
    /// field name ("Username" or "Email").
    #[error("duplicate {field}")]
    Duplicate { field: &'static str },

    /// The underlying database failed
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Persistence seam for user records.
///
/// Implementations must be internally concurrency-safe; callers never
/// lock around store calls.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// Look up a user by username.
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by email.
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError>;

    /// Look up a user by username, restricted to a role.
    ///
    /// Login flows use this so that a customer account can never
    /// authenticate against an admin route family, and vice versa.
    async fn find_by_username_and_role(
        &self,
        username: &str,
        role: Role,
    ) -> Result<Option<User>, StoreError>;

    /// Look up a user by ID.
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Count users holding a role. Used by the default-admin bootstrap.
    async fn count_by_role(&self, role: Role) -> Result<i64, StoreError>;

    /// Create a user.
    ///
    /// # Errors
    ///
    /// `StoreError::Duplicate` when the username or email is already
    /// taken. Implementations must report this even when the caller
    /// pre-checked, since a concurrent registration can win the race.
    async fn create(&self, new_user: NewUser) -> Result<User, StoreError>;
}

/// PostgreSQL-backed credential store.
#[derive(Clone)]
pub struct PgCredentialStore {
    pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Translate a unique-constraint violation into the field it names.
fn duplicate_field(err: sqlx::Error) -> StoreError {
    if let Some(constraint) = err
        .as_database_error()
        .and_then(|db_err| db_err.constraint())
    {
        match constraint {
            "users_username_key" => return StoreError::Duplicate { field: "Username" },
            "users_email_key" => return StoreError::Duplicate { field: "Email" },
            _ => {}
        }
    }
    StoreError::Database(err)
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE username = $1
            "#,
        )
        .bind(username)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_username_and_role(
        &self,
        username: &str,
        role: Role,
    ) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE username = $1 AND role = $2
            "#,
        )
        .bind(username)
        .bind(role)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let user = sqlx::query_as::<_, User>(
            r#"
            SELECT id, username, email, password_hash, role, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    async fn count_by_role(&self, role: Role) -> Result<i64, StoreError> {
        let count: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users WHERE role = $1")
            .bind(role)
            .fetch_one(&self.pool)
            .await?;

        Ok(count.0)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let id = Uuid::new_v4();
        let now = Utc::now();

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, role, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id, username, email, password_hash, role, created_at, updated_at
            "#,
        )
        .bind(id)
        .bind(&new_user.username)
        .bind(&new_user.email)
        .bind(&new_user.password_hash)
        .bind(new_user.role)
        .bind(now)
        .bind(now)
        .fetch_one(&self.pool)
        .await
        .map_err(duplicate_field)?;

        Ok(user)
    }
}

/// In-memory credential store.
///
/// Used when `DATABASE_URL` is not configured, so the server still runs
/// for local development, and by the test suite. Same uniqueness
/// guarantees as the PostgreSQL store, enforced under a single write
/// lock.
#[derive(Clone, Default)]
pub struct MemoryCredentialStore {
    users: Arc<RwLock<HashMap<Uuid, User>>>,
}

impl MemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl CredentialStore for MemoryCredentialStore {
    async fn find_by_username(&self, username: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.username == username).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().find(|u| u.email == email).cloned())
    }

    async fn find_by_username_and_role(
        &self,
        username: &str,
        role: Role,
    ) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users
            .values()
            .find(|u| u.username == username && u.role == role)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let users = self.users.read().await;
        Ok(users.get(&id).cloned())
    }

    async fn count_by_role(&self, role: Role) -> Result<i64, StoreError> {
        let users = self.users.read().await;
        Ok(users.values().filter(|u| u.role == role).count() as i64)
    }

    async fn create(&self, new_user: NewUser) -> Result<User, StoreError> {
        let mut users = self.users.write().await;

        // Uniqueness check and insert under one write lock.
        if users.values().any(|u| u.username == new_user.username) {
            return Err(StoreError::Duplicate { field: "Username" });
        }
        if users.values().any(|u| u.email == new_user.email) {
            return Err(StoreError::Duplicate { field: "Email" });
        }

        let now = Utc::now();
        let user = User {
            id: Uuid::new_v4(),
            username: new_user.username,
            email: new_user.email,
            password_hash: new_user.password_hash,
            role: new_user.role,
            created_at: now,
            updated_at: now,
        };

        users.insert(user.id, user.clone());
        Ok(user)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> NewUser {
        NewUser {
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            password_hash: "$2b$04$hash".to_string(),
            role: Role::User,
        }
    }

    #[tokio::test]
    async fn test_create_and_find() {
        let store = MemoryCredentialStore::new();
        let created = store.create(alice()).await.unwrap();

        let by_username = store.find_by_username("alice").await.unwrap().unwrap();
        assert_eq!(by_username.id, created.id);

        let by_email = store.find_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(by_email.id, created.id);

        let by_id = store.find_by_id(created.id).await.unwrap().unwrap();
        assert_eq!(by_id.username, "alice");
    }

    #[tokio::test]
    async fn test_duplicate_username_is_rejected() {
        let store = MemoryCredentialStore::new();
        store.create(alice()).await.unwrap();

        let mut second = alice();
        second.email = "b@x.com".to_string();

        match store.create(second).await {
            Err(StoreError::Duplicate { field }) => assert_eq!(field, "Username"),
            other => panic!("Expected duplicate username, got {:?}", other.map(|u| u.id)),
        }
    }

    #[tokio::test]
    async fn test_duplicate_email_is_rejected() {
        let store = MemoryCredentialStore::new();
        store.create(alice()).await.unwrap();

        let mut second = alice();
        second.username = "bob".to_string();

        match store.create(second).await {
            Err(StoreError::Duplicate { field }) => assert_eq!(field, "Email"),
            other => panic!("Expected duplicate email, got {:?}", other.map(|u| u.id)),
        }
    }

    #[tokio::test]
    async fn test_find_by_username_and_role() {
        let store = MemoryCredentialStore::new();
        store.create(alice()).await.unwrap();

        // alice is a customer; looking her up as an admin finds nothing.
        assert!(store
            .find_by_username_and_role("alice", Role::Admin)
            .await
            .unwrap()
            .is_none());
        assert!(store
            .find_by_username_and_role("alice", Role::User)
            .await
            .unwrap()
            .is_some());
    }

    #[tokio::test]
    async fn test_count_by_role() {
        let store = MemoryCredentialStore::new();
        assert_eq!(store.count_by_role(Role::Admin).await.unwrap(), 0);

        let mut admin = alice();
        admin.username = "admin".to_string();
        admin.email = "admin@example.com".to_string();
        admin.role = Role::Admin;
        store.create(admin).await.unwrap();

        assert_eq!(store.count_by_role(Role::Admin).await.unwrap(), 1);
        assert_eq!(store.count_by_role(Role::User).await.unwrap(), 0);
    }

    #[test]
    fn test_role_serialization_is_lowercase() {
        assert_eq!(serde_json::to_string(&Role::Admin).unwrap(), "\"admin\"");
        assert_eq!(serde_json::to_string(&Role::User).unwrap(), "\"user\"");
    }
}
