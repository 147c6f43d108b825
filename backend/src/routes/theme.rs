//! Theme route definitions, all behind the access-token gate

use axum::{
    middleware,
    routing::{get, post},
    Router,
};
use std::sync::Arc;

use crate::auth::AuthService;
use crate::handlers::theme::{
    assign_theme, create_theme, delete_theme, get_theme, list_themes, unassign_theme,
    update_theme,
};
use crate::middleware::require_auth;
use crate::state::AppState;

pub fn theme_routes(auth_service: Arc<AuthService>) -> Router<AppState> {
    Router::new()
        .route("/api/themes", get(list_themes).post(create_theme))
        .route(
            "/api/themes/:id",
            get(get_theme).put(update_theme).delete(delete_theme),
        )
        .route(
            "/api/themes/:id/users/:user_id",
            post(assign_theme).delete(unassign_theme),
        )
        .route_layer(middleware::from_fn_with_state(auth_service, require_auth))
}
