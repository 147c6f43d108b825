//! Authentication HTTP handlers
//!
//! Session endpoints: login, refresh and logout. Tokens are returned in the
//! JSON body and also set as HttpOnly cookies; the refresh endpoint only ever
//! reads the refresh token from its cookie.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use axum_extra::extract::CookieJar;
use validator::Validate;

use super::AuthenticatedUser;
use crate::auth::{INVALID_CREDENTIALS, REFRESH_TOKEN_COOKIE};
use crate::error::ApiError;
use crate::models::{AuthTokensResponse, LoginRequest, MessageResponse, PrincipalResponse};
use crate::state::AppState;

/// Fixed message for login bodies that do not deserialize; field names stay in the logs
const INVALID_LOGIN_BODY: &str = "Invalid request body";

/// POST /api/auth/login - Verify credentials and issue tokens
pub async fn login(
    State(state): State<AppState>,
    jar: CookieJar,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<(CookieJar, Json<AuthTokensResponse>), ApiError> {
    let Json(req) = payload.map_err(|e| {
        tracing::debug!(error = %e.body_text(), "Login body rejected");
        ApiError::BadRequest(INVALID_LOGIN_BODY.to_string())
    })?;

    // Malformed credentials are reported like wrong ones
    if req.validate().is_err() {
        return Err(ApiError::Unauthorized(INVALID_CREDENTIALS.to_string()));
    }

    let tokens = state.auth_service.login(&req.email, &req.password).await?;

    let jar = state.cookie_policy.set_tokens(jar, &tokens);

    Ok((
        jar,
        Json(AuthTokensResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }),
    ))
}

/// GET /api/auth/refresh_token - Rotate tokens using the refresh cookie
pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<(CookieJar, Json<AuthTokensResponse>), ApiError> {
    let refresh_token = jar
        .get(REFRESH_TOKEN_COOKIE)
        .map(|cookie| cookie.value().to_string())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| ApiError::Unauthorized("Refresh token missing".to_string()))?;

    let tokens = state.auth_service.refresh_tokens(&refresh_token).await?;

    let jar = state.cookie_policy.set_refresh(jar, &tokens);

    Ok((
        jar,
        Json(AuthTokensResponse {
            access_token: tokens.access_token,
            refresh_token: tokens.refresh_token,
        }),
    ))
}

/// DELETE /api/auth/refresh_token - Clear the token cookies
///
/// Always succeeds. Previously issued refresh tokens stay valid until they
/// expire since nothing is tracked server-side.
pub async fn logout(
    State(state): State<AppState>,
    jar: CookieJar,
) -> (CookieJar, Json<MessageResponse>) {
    (
        state.cookie_policy.clear(jar),
        Json(MessageResponse {
            message: "Logged out".to_string(),
        }),
    )
}

/// GET /api/auth/me - Get current authenticated user
pub async fn get_current_user(
    State(state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<PrincipalResponse>, ApiError> {
    let principal = state.auth_service.get_user_by_id(user.user_id).await?;

    Ok(Json(principal.into()))
}
