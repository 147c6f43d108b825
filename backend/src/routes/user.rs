//! User route definitions

use axum::{
    routing::{patch, post},
    Router,
};

use crate::handlers::user::{create_user, set_activation};
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(create_user))
        .route("/api/users/:id/activation", patch(set_activation))
}
