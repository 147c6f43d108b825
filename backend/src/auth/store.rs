//! Credential store
//!
//! Lookup and persistence of principals. Email matching is case-insensitive in
//! every implementation.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::PgPool;
use std::sync::atomic::{AtomicI64, Ordering};
use tokio::sync::RwLock;

use crate::error::ApiError;
use crate::models::{Principal, Role};

/// Data needed to create a principal (password already hashed)
#[derive(Debug, Clone)]
pub struct NewPrincipal {
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: Role,
    pub activated: bool,
}

#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, ApiError>;

    async fn find_by_id(&self, id: i64) -> Result<Option<Principal>, ApiError>;

    async fn create(&self, principal: NewPrincipal) -> Result<Principal, ApiError>;

    /// Returns `NotFound` when no principal has this id
    async fn set_activated(&self, id: i64, activated: bool) -> Result<Principal, ApiError>;
}

/// PostgreSQL-backed credential store
#[derive(Clone)]
pub struct PgCredentialStore {
    db_pool: PgPool,
}

impl PgCredentialStore {
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }
}

#[async_trait]
impl CredentialStore for PgCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, ApiError> {
        let principal = sqlx::query_as::<_, Principal>(
            r#"
            SELECT id, username, email, password_hash, role, activated, created_at, updated_at
            FROM users
            WHERE LOWER(email) = LOWER($1)
            "#,
        )
        .bind(email)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(principal)
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Principal>, ApiError> {
        let principal = sqlx::query_as::<_, Principal>(
            r#"
            SELECT id, username, email, password_hash, role, activated, created_at, updated_at
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?;

        Ok(principal)
    }

    async fn create(&self, principal: NewPrincipal) -> Result<Principal, ApiError> {
        let created = sqlx::query_as::<_, Principal>(
            r#"
            INSERT INTO users (username, email, password_hash, role, activated)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING id, username, email, password_hash, role, activated, created_at, updated_at
            "#,
        )
        .bind(&principal.username)
        .bind(&principal.email)
        .bind(&principal.password_hash)
        .bind(principal.role)
        .bind(principal.activated)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| match ApiError::from(e) {
            ApiError::Conflict(_) => {
                ApiError::Conflict("Username or email already in use".to_string())
            }
            other => other,
        })?;

        Ok(created)
    }

    async fn set_activated(&self, id: i64, activated: bool) -> Result<Principal, ApiError> {
        sqlx::query_as::<_, Principal>(
            r#"
            UPDATE users
            SET activated = $1, updated_at = NOW()
            WHERE id = $2
            RETURNING id, username, email, password_hash, role, activated, created_at, updated_at
            "#,
        )
        .bind(activated)
        .bind(id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))
    }
}

/// In-process credential store, used by tests and local demos
#[derive(Default)]
pub struct InMemoryCredentialStore {
    principals: RwLock<Vec<Principal>>,
    next_id: AtomicI64,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// Unicode case folding, matching Postgres `LOWER()`
fn same_folded(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_by_email(&self, email: &str) -> Result<Option<Principal>, ApiError> {
        let principals = self.principals.read().await;
        Ok(principals
            .iter()
            .find(|p| same_folded(&p.email, email))
            .cloned())
    }

    async fn find_by_id(&self, id: i64) -> Result<Option<Principal>, ApiError> {
        let principals = self.principals.read().await;
        Ok(principals.iter().find(|p| p.id == id).cloned())
    }

    async fn create(&self, principal: NewPrincipal) -> Result<Principal, ApiError> {
        let mut principals = self.principals.write().await;

        let taken = principals.iter().any(|p| {
            same_folded(&p.email, &principal.email)
                || same_folded(&p.username, &principal.username)
        });
        if taken {
            return Err(ApiError::Conflict(
                "Username or email already in use".to_string(),
            ));
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst) + 1;
        let now = Utc::now();
        let created = Principal {
            id,
            username: principal.username,
            email: principal.email,
            password_hash: principal.password_hash,
            role: principal.role,
            activated: principal.activated,
            created_at: now,
            updated_at: now,
        };
        principals.push(created.clone());

        Ok(created)
    }

    async fn set_activated(&self, id: i64, activated: bool) -> Result<Principal, ApiError> {
        let mut principals = self.principals.write().await;
        let principal = principals
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or_else(|| ApiError::NotFound(format!("User {} not found", id)))?;

        principal.activated = activated;
        principal.updated_at = Utc::now();

        Ok(principal.clone())
    }
}
