//! JWT token generation and validation
//!
//! Handles creation and verification of access and refresh tokens. Each token
//! class is signed with its own secret, so a refresh token can never pass as an
//! access token and vice versa.

use chrono::{DateTime, Duration, Utc};
use jsonwebtoken::{decode, encode, errors::ErrorKind, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

use crate::config::{check_token_settings, Config, ConfigError};
use crate::models::{Principal, Role};

/// JWT-related errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Malformed token")]
    Malformed,

    #[error("Invalid token signature")]
    SignatureInvalid,

    #[error("Token expired")]
    Expired,
}

/// Claims embedded in both token classes
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Claims {
    /// Principal ID
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Token type enum
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenType {
    Access,
    Refresh,
}

impl TokenType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TokenType::Access => "access",
            TokenType::Refresh => "refresh",
        }
    }
}

/// Minimal, non-sensitive projection of a principal used as token subject
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TokenSubject {
    pub id: i64,
    pub username: String,
    pub email: String,
    pub role: Role,
}

impl From<&Principal> for TokenSubject {
    fn from(principal: &Principal) -> Self {
        Self {
            id: principal.id,
            username: principal.username.clone(),
            email: principal.email.clone(),
            role: principal.role,
        }
    }
}

impl From<&Claims> for TokenSubject {
    fn from(claims: &Claims) -> Self {
        Self {
            id: claims.id,
            username: claims.username.clone(),
            email: claims.email.clone(),
            role: claims.role,
        }
    }
}

/// A freshly issued access/refresh token pair
#[derive(Debug, Clone)]
pub struct TokenPair {
    pub access_token: String,
    pub refresh_token: String,
}

/// Signing secrets and lifetimes for both token classes
#[derive(Clone)]
pub struct TokenConfig {
    access_secret: String,
    refresh_secret: String,
    access_ttl_seconds: i64,
    refresh_ttl_seconds: i64,
}

impl fmt::Debug for TokenConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenConfig")
            .field("access_ttl_seconds", &self.access_ttl_seconds)
            .field("refresh_ttl_seconds", &self.refresh_ttl_seconds)
            .finish_non_exhaustive()
    }
}

impl TokenConfig {
    /// Create a token configuration, rejecting empty or shared secrets and
    /// lifetimes outside `1..=MAX_TOKEN_TTL_SECONDS`
    pub fn new(
        access_secret: impl Into<String>,
        refresh_secret: impl Into<String>,
        access_ttl_seconds: i64,
        refresh_ttl_seconds: i64,
    ) -> Result<Self, ConfigError> {
        let access_secret = access_secret.into();
        let refresh_secret = refresh_secret.into();

        check_token_settings(
            &access_secret,
            &refresh_secret,
            access_ttl_seconds,
            refresh_ttl_seconds,
        )?;

        Ok(Self {
            access_secret,
            refresh_secret,
            access_ttl_seconds,
            refresh_ttl_seconds,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self, ConfigError> {
        Self::new(
            config.access_token_secret.clone(),
            config.refresh_token_secret.clone(),
            config.access_token_ttl_seconds,
            config.refresh_token_ttl_seconds,
        )
    }

    pub fn ttl_seconds(&self, token_type: TokenType) -> i64 {
        match token_type {
            TokenType::Access => self.access_ttl_seconds,
            TokenType::Refresh => self.refresh_ttl_seconds,
        }
    }

    fn secret(&self, token_type: TokenType) -> &[u8] {
        match token_type {
            TokenType::Access => self.access_secret.as_bytes(),
            TokenType::Refresh => self.refresh_secret.as_bytes(),
        }
    }

    /// Issue an access/refresh pair for the given subject
    pub fn issue_tokens(&self, subject: &TokenSubject) -> Result<TokenPair, JwtError> {
        self.issue_tokens_at(subject, Utc::now())
    }

    /// Issue an access/refresh pair using an explicit clock reading
    pub fn issue_tokens_at(
        &self,
        subject: &TokenSubject,
        now: DateTime<Utc>,
    ) -> Result<TokenPair, JwtError> {
        Ok(TokenPair {
            access_token: self.generate_token(subject, TokenType::Access, now)?,
            refresh_token: self.generate_token(subject, TokenType::Refresh, now)?,
        })
    }

    /// Sign a single token of the given class
    pub fn generate_token(
        &self,
        subject: &TokenSubject,
        token_type: TokenType,
        now: DateTime<Utc>,
    ) -> Result<String, JwtError> {
        let exp = now + Duration::seconds(self.ttl_seconds(token_type));

        let claims = Claims {
            id: subject.id,
            username: subject.username.clone(),
            email: subject.email.clone(),
            role: subject.role,
            iat: now.timestamp(),
            exp: exp.timestamp(),
        };

        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(self.secret(token_type)),
        )
        .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    /// Verify and decode a token against the secret of its class
    ///
    /// # Returns
    /// * `Ok(Claims)` if the signature verifies and the token has not expired
    /// * `Err(JwtError)` describing why validation failed
    pub fn verify_token(&self, token: &str, token_type: TokenType) -> Result<Claims, JwtError> {
        let mut validation = Validation::default();
        validation.validate_exp = true;
        validation.leeway = 0;

        let token_data = decode::<Claims>(
            token,
            &DecodingKey::from_secret(self.secret(token_type)),
            &validation,
        )
        .map_err(|e| {
            tracing::trace!(token_type = token_type.as_str(), error = %e, "Token verification failed");
            match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                ErrorKind::InvalidSignature => JwtError::SignatureInvalid,
                _ => JwtError::Malformed,
            }
        })?;

        Ok(token_data.claims)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::MAX_TOKEN_TTL_SECONDS;

    fn test_config() -> TokenConfig {
        TokenConfig::new("access-secret", "refresh-secret", 20, 300).unwrap()
    }

    fn test_subject() -> TokenSubject {
        TokenSubject {
            id: 42,
            username: "alice".to_string(),
            email: "a@x.com".to_string(),
            role: Role::Manager,
        }
    }

    #[test]
    fn test_access_token_round_trip() {
        let config = test_config();
        let subject = test_subject();

        let pair = config.issue_tokens(&subject).unwrap();
        assert!(!pair.access_token.is_empty());
        assert_eq!(pair.access_token.split('.').count(), 3);

        let claims = config.verify_token(&pair.access_token, TokenType::Access).unwrap();
        assert_eq!(claims.id, 42);
        assert_eq!(claims.username, "alice");
        assert_eq!(claims.email, "a@x.com");
        assert_eq!(claims.role, Role::Manager);
        assert_eq!(claims.exp - claims.iat, 20);
    }

    #[test]
    fn test_refresh_token_lifetime() {
        let config = test_config();
        let pair = config.issue_tokens(&test_subject()).unwrap();

        let claims = config.verify_token(&pair.refresh_token, TokenType::Refresh).unwrap();
        assert_eq!(claims.exp - claims.iat, 300);
    }

    #[test]
    fn test_secrets_are_not_interchangeable() {
        let config = test_config();
        let pair = config.issue_tokens(&test_subject()).unwrap();

        assert_eq!(
            config.verify_token(&pair.refresh_token, TokenType::Access),
            Err(JwtError::SignatureInvalid)
        );
        assert_eq!(
            config.verify_token(&pair.access_token, TokenType::Refresh),
            Err(JwtError::SignatureInvalid)
        );
    }

    #[test]
    fn test_expired_token_rejected() {
        let config = test_config();
        let issued = Utc::now() - Duration::seconds(60);

        let pair = config.issue_tokens_at(&test_subject(), issued).unwrap();
        assert_eq!(
            config.verify_token(&pair.access_token, TokenType::Access),
            Err(JwtError::Expired)
        );
        // Refresh lifetime (300s) has not elapsed yet
        assert!(config.verify_token(&pair.refresh_token, TokenType::Refresh).is_ok());
    }

    #[test]
    fn test_malformed_token() {
        let config = test_config();

        assert_eq!(
            config.verify_token("not-a-jwt", TokenType::Access),
            Err(JwtError::Malformed)
        );
        assert_eq!(
            config.verify_token("invalid.token.here", TokenType::Access),
            Err(JwtError::Malformed)
        );
    }

    #[test]
    fn test_wrong_secret() {
        let config = test_config();
        let other = TokenConfig::new("other-access", "other-refresh", 20, 300).unwrap();

        let pair = config.issue_tokens(&test_subject()).unwrap();
        assert_eq!(
            other.verify_token(&pair.access_token, TokenType::Access),
            Err(JwtError::SignatureInvalid)
        );
    }

    #[test]
    fn test_issue_is_deterministic_for_fixed_clock() {
        let config = test_config();
        let now = Utc::now();

        let first = config.issue_tokens_at(&test_subject(), now).unwrap();
        let second = config.issue_tokens_at(&test_subject(), now).unwrap();
        assert_eq!(first.access_token, second.access_token);

        let later = config
            .issue_tokens_at(&test_subject(), now + Duration::seconds(1))
            .unwrap();
        assert_ne!(first.access_token, later.access_token);
    }

    #[test]
    fn test_shared_secret_rejected() {
        assert!(matches!(
            TokenConfig::new("same", "same", 20, 300),
            Err(ConfigError::SharedSecret)
        ));
        assert!(matches!(
            TokenConfig::new("", "refresh", 20, 300),
            Err(ConfigError::WeakSecret(_))
        ));
    }

    #[test]
    fn test_lifetime_bounds_enforced() {
        assert!(matches!(
            TokenConfig::new("access", "refresh", 20, i64::MAX),
            Err(ConfigError::InvalidValue(_))
        ));
        assert!(matches!(
            TokenConfig::new("access", "refresh", 0, 300),
            Err(ConfigError::InvalidValue(_))
        ));

        let config = TokenConfig::new("access", "refresh", 20, MAX_TOKEN_TTL_SECONDS).unwrap();
        let pair = config.issue_tokens(&test_subject()).unwrap();
        let claims = config.verify_token(&pair.refresh_token, TokenType::Refresh).unwrap();
        assert_eq!(claims.exp - claims.iat, MAX_TOKEN_TTL_SECONDS);
    }

    #[test]
    fn test_claims_do_not_carry_password_hash() {
        let config = test_config();
        let pair = config.issue_tokens(&test_subject()).unwrap();

        let claims = config.verify_token(&pair.access_token, TokenType::Access).unwrap();
        let json = serde_json::to_value(&claims).unwrap();
        assert!(json.get("password_hash").is_none());
    }
}
