//! Trade-related API handlers

use axum::{
    extract::{Path, Query, State},
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::ApiResponse;
use crate::state::AppState;
use crate::trade::{CreateTradeRequest, ListTradesQuery, Trade, UpdateTradeRequest};

/// Create a new trade listing owned by the authenticated user
pub async fn create_trade(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Json(request): Json<CreateTradeRequest>,
) -> Result<Json<ApiResponse<Trade>>, ApiError> {
    let trade = app_state
        .trade_service
        .create_trade(user.user_id, request)
        .await?;

    Ok(Json(ApiResponse::ok(trade)))
}

/// List trades with optional filters
pub async fn list_trades(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Query(query): Query<ListTradesQuery>,
) -> Result<Json<ApiResponse<Vec<Trade>>>, ApiError> {
    let trades = app_state.trade_service.list_trades(query).await?;

    Ok(Json(ApiResponse::ok(trades)))
}

/// Get a single trade by ID
pub async fn get_trade(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(trade_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Trade>>, ApiError> {
    let trade = app_state.trade_service.get_trade(trade_id).await?;

    Ok(Json(ApiResponse::ok(trade)))
}

/// Apply a partial update to a trade (owner only)
pub async fn update_trade(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(trade_id): Path<Uuid>,
    Json(patch): Json<UpdateTradeRequest>,
) -> Result<Json<ApiResponse<Trade>>, ApiError> {
    let trade = app_state.trade_service.get_trade(trade_id).await?;

    if trade.user_id != user.user_id {
        return Err(ApiError::Forbidden(
            "only the trade owner may update a trade".to_string(),
        ));
    }

    let updated = app_state.trade_service.update_trade(&trade, patch).await?;

    Ok(Json(ApiResponse::ok(updated)))
}

/// Delete a trade (owner only), returning the deleted id
pub async fn delete_trade(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(trade_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, ApiError> {
    let trade = app_state.trade_service.get_trade(trade_id).await?;

    if trade.user_id != user.user_id {
        return Err(ApiError::Forbidden(
            "only the trade owner may delete a trade".to_string(),
        ));
    }

    let deleted_id = app_state.trade_service.delete_trade(&trade).await?;

    Ok(Json(ApiResponse::ok(deleted_id)))
}

/// List all trades owned by a user
pub async fn list_trades_for_user(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<Vec<Trade>>>, ApiError> {
    let owner = app_state
        .user_service
        .get_user_by_username(&username)
        .await?;

    let trades = app_state
        .trade_service
        .list_trades_for_user(owner.id)
        .await?;

    Ok(Json(ApiResponse::ok(trades)))
}
