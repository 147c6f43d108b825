//! Authentication service
//!
//! Core business logic for credential verification, token issuance and
//! refresh. Tokens are stateless: nothing is recorded server-side, so a
//! refresh token stays valid until it expires even after logout.

use std::sync::Arc;

use crate::error::ApiError;
use crate::models::{CreateUserRequest, Principal, Role};

use super::jwt::{Claims, JwtError, TokenConfig, TokenPair, TokenSubject, TokenType};
use super::password::{hash_password, verify_password};
use super::store::{CredentialStore, NewPrincipal};

/// Message returned for any unknown email or wrong password
pub const INVALID_CREDENTIALS: &str = "Email ou mot de passe incorrect";

/// Message returned when the password is right but the account is disabled
pub const ACCOUNT_DEACTIVATED: &str = "Compte désactivé";

/// Authentication service
#[derive(Clone)]
pub struct AuthService {
    store: Arc<dyn CredentialStore>,
    tokens: TokenConfig,
    bcrypt_cost: u32,
}

impl AuthService {
    /// Create a new AuthService
    pub fn new(store: Arc<dyn CredentialStore>, tokens: TokenConfig, bcrypt_cost: u32) -> Self {
        Self {
            store,
            tokens,
            bcrypt_cost,
        }
    }

    /// Verify credentials and issue a fresh token pair
    ///
    /// Activation is only checked after the password matched, so the
    /// activation status is never disclosed to someone without the password.
    pub async fn login(&self, email: &str, password: &str) -> Result<TokenPair, ApiError> {
        let principal = match self.store.find_by_email(email).await? {
            Some(principal) => principal,
            None => {
                tracing::warn!("Login rejected: unknown email");
                return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
            }
        };

        if !verify_password(password, &principal.password_hash).await? {
            tracing::warn!(user_id = principal.id, "Login rejected: wrong password");
            return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
        }

        if !principal.activated {
            tracing::warn!(user_id = principal.id, "Login rejected: account deactivated");
            return Err(ApiError::Unauthorized(ACCOUNT_DEACTIVATED.to_string()));
        }

        let tokens = self.tokens.issue_tokens(&TokenSubject::from(&principal))?;

        tracing::info!(user_id = principal.id, role = %principal.role, "Login succeeded");

        Ok(tokens)
    }

    /// Re-issue both tokens from a still-valid refresh token
    pub async fn refresh_tokens(&self, refresh_token: &str) -> Result<TokenPair, ApiError> {
        let claims = self
            .tokens
            .verify_token(refresh_token, TokenType::Refresh)
            .map_err(|e| {
                tracing::debug!(error = %e, "Refresh token rejected");
                ApiError::Unauthorized(e.to_string())
            })?;

        let tokens = self.tokens.issue_tokens(&TokenSubject::from(&claims))?;

        tracing::debug!(user_id = claims.id, "Tokens refreshed");

        Ok(tokens)
    }

    /// Verify an access token presented on a protected route
    pub fn verify_access_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.tokens.verify_token(token, TokenType::Access)
    }

    /// Create a principal with a freshly hashed password
    pub async fn create_user(&self, req: CreateUserRequest) -> Result<Principal, ApiError> {
        let password_hash = hash_password(&req.password, self.bcrypt_cost).await?;

        let principal = self
            .store
            .create(NewPrincipal {
                username: req.username,
                email: req.email,
                password_hash,
                role: req.role,
                activated: req.activated,
            })
            .await?;

        tracing::info!(user_id = principal.id, role = %principal.role, "User created");

        Ok(principal)
    }

    /// Enable or disable a principal
    pub async fn set_activated(&self, user_id: i64, activated: bool) -> Result<Principal, ApiError> {
        let principal = self.store.set_activated(user_id, activated).await?;
        tracing::info!(user_id, activated, "User activation changed");
        Ok(principal)
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, user_id: i64) -> Result<Principal, ApiError> {
        self.store
            .find_by_id(user_id)
            .await?
            .ok_or_else(|| ApiError::NotFound(format!("User {} not found", user_id)))
    }

    /// Create an activated admin with this email unless one already exists
    pub async fn ensure_admin(&self, email: &str, password: &str) -> Result<(), ApiError> {
        if self.store.find_by_email(email).await?.is_some() {
            tracing::debug!("Bootstrap admin already present");
            return Ok(());
        }

        let username = email.split('@').next().unwrap_or(email).to_string();
        self.create_user(CreateUserRequest {
            username,
            email: email.to_string(),
            password: password.to_string(),
            role: Role::Admin,
            activated: true,
        })
        .await?;

        tracing::info!("Bootstrap admin account created");

        Ok(())
    }
}
