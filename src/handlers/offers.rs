//! Offer-related API handlers
//!
//! Permission predicates are evaluated here, before the offer engine runs:
//! only the trade owner accepts offers or lists a trade's offers, only the
//! offering user cancels or rescinds their own offer, and a single offer is
//! visible to the trade owner or the offer's user.

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::error::ApiError;
use crate::middleware::AuthenticatedUser;
use crate::models::ApiResponse;
use crate::offer::Offer;
use crate::state::AppState;

/// Create a pending offer on a trade from the authenticated user
pub async fn create_offer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(trade_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Offer>>, ApiError> {
    let trade = app_state.trade_service.get_trade(trade_id).await?;

    let offer = app_state
        .offer_service
        .create_offer(&trade, user.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(offer)))
}

/// List all offers on a trade (trade owner only)
pub async fn list_offers(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(trade_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Vec<Offer>>>, ApiError> {
    let trade = app_state.trade_service.get_trade(trade_id).await?;

    if trade.user_id != user.user_id {
        return Err(ApiError::Forbidden(
            "only the trade owner may list its offers".to_string(),
        ));
    }

    let offers = app_state
        .offer_service
        .list_offers_for_trade(trade.id)
        .await?;

    Ok(Json(ApiResponse::ok(offers)))
}

/// Get the offer a specific user holds on a trade
///
/// Visible to the trade owner and to the offering user themselves.
pub async fn get_offer_from_user(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path((trade_id, username)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<Offer>>, ApiError> {
    let trade = app_state.trade_service.get_trade(trade_id).await?;
    let offer_user = app_state
        .user_service
        .get_user_by_username(&username)
        .await?;

    if trade.user_id != user.user_id && offer_user.id != user.user_id {
        return Err(ApiError::Forbidden("unable to access offer".to_string()));
    }

    let offer = app_state
        .offer_service
        .get_offer_for_trade_from_user(trade.id, offer_user.id)
        .await?;

    Ok(Json(ApiResponse::ok(offer)))
}

/// Accept the offer from `username` on a trade (trade owner only)
///
/// Every other pending offer on the trade is rejected in the same
/// transaction.
pub async fn accept_offer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path((trade_id, username)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<Offer>>, ApiError> {
    let trade = app_state.trade_service.get_trade(trade_id).await?;

    if trade.user_id != user.user_id {
        return Err(ApiError::Forbidden(
            "only the trade owner may accept offers".to_string(),
        ));
    }

    let offer_user = app_state
        .user_service
        .get_user_by_username(&username)
        .await?;

    let offer = app_state
        .offer_service
        .accept_offer(trade.id, offer_user.id)
        .await?;

    Ok(Json(ApiResponse::ok(offer)))
}

/// Cancel the authenticated user's accepted offer on a trade
///
/// Rejected sibling offers return to pending so the owner can accept again.
pub async fn cancel_offer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(trade_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Offer>>, ApiError> {
    let trade = app_state.trade_service.get_trade(trade_id).await?;

    let offer = app_state
        .offer_service
        .cancel_offer(trade.id, user.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(offer)))
}

/// Rescind the authenticated user's pending offer on a trade
pub async fn rescind_offer(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path(trade_id): Path<Uuid>,
) -> Result<Json<ApiResponse<Uuid>>, ApiError> {
    let trade = app_state.trade_service.get_trade(trade_id).await?;

    let deleted_id = app_state
        .offer_service
        .rescind_offer(trade.id, user.user_id)
        .await?;

    Ok(Json(ApiResponse::ok(deleted_id)))
}
