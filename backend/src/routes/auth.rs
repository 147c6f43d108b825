//! Authentication routes

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::auth;
use crate::state::AppState;

/// Create authentication routes
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/api/auth/login", post(auth::login))
        .route(
            "/api/auth/refresh_token",
            get(auth::refresh_token).delete(auth::logout),
        )
        .route("/api/auth/me", get(auth::get_current_user))
}
