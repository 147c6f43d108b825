use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use std::sync::Arc;
use validator::Validate;

use super::{AdminUser, AuthenticatedUser, StaffUser};
use crate::error::ApiError;
use crate::models::{ApiResponse, PaginatedResponse, Theme};
use crate::theme::{CreateThemeRequest, ThemeFilter, ThemeService, UpdateThemeRequest};

/// Staff see every theme; formers and interns only those assigned to them
pub async fn list_themes(
    State(service): State<Arc<ThemeService>>,
    user: AuthenticatedUser,
    Query(mut filter): Query<ThemeFilter>,
) -> Result<Json<ApiResponse<PaginatedResponse<Theme>>>, ApiError> {
    if !user.role.is_staff() {
        filter.user_id = Some(user.user_id);
    }

    let result = service.list_themes(filter).await?;

    Ok(Json(ApiResponse::ok(result)))
}

pub async fn get_theme(
    State(service): State<Arc<ThemeService>>,
    user: AuthenticatedUser,
    Path(id): Path<i64>,
) -> Result<Json<ApiResponse<Theme>>, ApiError> {
    let theme = service.get_theme(id).await?;

    if !user.role.is_staff() && !service.is_assigned(id, user.user_id).await? {
        return Err(ApiError::Forbidden("Theme not assigned to you".to_string()));
    }

    Ok(Json(ApiResponse::ok(theme)))
}

pub async fn create_theme(
    State(service): State<Arc<ThemeService>>,
    StaffUser(_staff): StaffUser,
    Json(request): Json<CreateThemeRequest>,
) -> Result<(StatusCode, Json<ApiResponse<Theme>>), ApiError> {
    request.validate()?;

    let theme = service.create_theme(request).await?;

    Ok((StatusCode::CREATED, Json(ApiResponse::ok(theme))))
}

pub async fn update_theme(
    State(service): State<Arc<ThemeService>>,
    StaffUser(_staff): StaffUser,
    Path(id): Path<i64>,
    Json(request): Json<UpdateThemeRequest>,
) -> Result<Json<ApiResponse<Theme>>, ApiError> {
    request.validate()?;

    let theme = service.update_theme(id, request).await?;

    Ok(Json(ApiResponse::ok(theme)))
}

pub async fn delete_theme(
    State(service): State<Arc<ThemeService>>,
    AdminUser(_admin): AdminUser,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    service.delete_theme(id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn assign_theme(
    State(service): State<Arc<ThemeService>>,
    StaffUser(_staff): StaffUser,
    Path((theme_id, user_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    service.assign_user(theme_id, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}

pub async fn unassign_theme(
    State(service): State<Arc<ThemeService>>,
    StaffUser(_staff): StaffUser,
    Path((theme_id, user_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    service.unassign_user(theme_id, user_id).await?;

    Ok(StatusCode::NO_CONTENT)
}
