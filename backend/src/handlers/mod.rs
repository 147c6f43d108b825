//! API handlers for the exam administration backend

pub mod auth;
pub mod health;
pub mod theme;
pub mod user;

pub use auth::*;
pub use theme::*;
pub use user::{create_user, set_activation};

// Re-export extractors from middleware for handler use
pub use crate::middleware::auth::{AdminUser, AuthenticatedUser, StaffUser};
