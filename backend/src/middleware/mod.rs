//! Middleware for the exam administration API
//!
//! This module provides middleware for request tracing, security headers,
//! and the access-token gate.

pub mod auth;
mod security;
mod tracing;

pub use auth::{require_auth, AdminUser, AuthenticatedUser, StaffUser};
pub use security::{hsts_header, security_headers};
pub use tracing::request_tracing;
