//! Route definitions for the exam administration API

mod auth;
mod theme;
mod user;

use axum::{routing::get, Router};

use crate::handlers::health::{health_check, root};
use crate::middleware;
use crate::state::AppState;

pub use auth::auth_routes;
pub use theme::theme_routes;
pub use user::user_routes;

/// Assemble the full application router
pub fn app_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health_check))
        .merge(auth_routes())
        .merge(user_routes())
        .merge(theme_routes(state.auth_service.clone()))
        .with_state(state)
        .layer(axum::middleware::from_fn(middleware::security_headers))
        .layer(axum::middleware::from_fn(middleware::request_tracing))
}
