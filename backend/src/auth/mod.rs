//! Authentication module
//!
//! Provides email/password authentication for the admin front end.
//! - Credential verification against the credential store (bcrypt)
//! - Stateless JWT access and refresh tokens with separate secrets
//! - Refresh-token cookies for session renewal

mod cookies;
mod jwt;
mod password;
mod service;
mod store;

pub use cookies::{CookiePolicy, ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
pub use jwt::{Claims, JwtError, TokenConfig, TokenPair, TokenSubject, TokenType};
pub use password::{hash_password, verify_password, DEFAULT_COST};
pub use service::{AuthService, ACCOUNT_DEACTIVATED, INVALID_CREDENTIALS};
pub use store::{CredentialStore, InMemoryCredentialStore, NewPrincipal, PgCredentialStore};
