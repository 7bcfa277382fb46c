//! User-related API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use validator::Validate;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::{ApiResponse, UserPublic};
use crate::state::AppState;
use crate::users::{AuthTokensResponse, LoginRequest, RegisterRequest};

/// Register a new account
pub async fn register(
    State(app_state): State<AppState>,
    Json(request): Json<RegisterRequest>,
) -> Result<Json<ApiResponse<AuthTokensResponse>>, ApiError> {
    request.validate()?;

    let tokens = app_state.user_service.register(request).await?;

    Ok(Json(ApiResponse::ok(tokens)))
}

/// Log in with username and password
pub async fn login(
    State(app_state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<Json<ApiResponse<AuthTokensResponse>>, ApiError> {
    let tokens = app_state.user_service.login(request).await?;

    Ok(Json(ApiResponse::ok(tokens)))
}

/// Get the authenticated user's own profile
pub async fn me(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
) -> Result<Json<ApiResponse<UserPublic>>, ApiError> {
    let user = app_state.user_service.get_user_by_id(user.user_id).await?;

    Ok(Json(ApiResponse::ok(user.into())))
}

/// Get a user's public profile by username
pub async fn get_user(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<UserPublic>>, ApiError> {
    let user = app_state
        .user_service
        .get_user_by_username(&username)
        .await?;

    Ok(Json(ApiResponse::ok(user.into())))
}
