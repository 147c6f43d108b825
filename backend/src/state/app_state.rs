//! Application state shared across handlers

use std::sync::Arc;

use sqlx::PgPool;

use crate::auth::{AuthService, CookiePolicy};
use crate::theme::ThemeService;

use axum::extract::FromRef;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub auth_service: Arc<AuthService>,
    pub theme_service: Arc<ThemeService>,
    pub cookie_policy: CookiePolicy,
    pub db_pool: PgPool,
}

impl AppState {
    pub fn new(
        auth_service: Arc<AuthService>,
        theme_service: Arc<ThemeService>,
        cookie_policy: CookiePolicy,
        db_pool: PgPool,
    ) -> Self {
        Self {
            auth_service,
            theme_service,
            cookie_policy,
            db_pool,
        }
    }
}

impl FromRef<AppState> for Arc<AuthService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.auth_service.clone()
    }
}

impl FromRef<AppState> for Arc<ThemeService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.theme_service.clone()
    }
}

impl FromRef<AppState> for CookiePolicy {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.cookie_policy
    }
}
