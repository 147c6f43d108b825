//! User-related API handlers

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use validator::Validate;

use super::AdminUser;
use crate::error::ApiError;
use crate::models::{ActivationRequest, ApiResponse, CreateUserRequest, PrincipalResponse};
use crate::state::AppState;

/// POST /api/users - Create a user (admin only)
pub async fn create_user(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Json(req): Json<CreateUserRequest>,
) -> Result<(StatusCode, Json<ApiResponse<PrincipalResponse>>), ApiError> {
    req.validate()?;

    let principal = state.auth_service.create_user(req).await?;

    tracing::debug!(admin_id = admin.user_id, user_id = principal.id, "Admin created user");

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(principal.into()))))
}

/// PATCH /api/users/:id/activation - Activate or deactivate a user (admin only)
pub async fn set_activation(
    State(state): State<AppState>,
    AdminUser(admin): AdminUser,
    Path(user_id): Path<i64>,
    Json(req): Json<ActivationRequest>,
) -> Result<Json<ApiResponse<PrincipalResponse>>, ApiError> {
    if admin.user_id == user_id && !req.activated {
        return Err(ApiError::BadRequest(
            "Admins cannot deactivate their own account".to_string(),
        ));
    }

    let principal = state
        .auth_service
        .set_activated(user_id, req.activated)
        .await?;

    Ok(Json(ApiResponse::ok(principal.into())))
}
