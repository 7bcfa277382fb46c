//! Evaluation-related API handlers

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::error::ApiError;
use crate::evaluation::{CreateEvaluationRequest, Evaluation, EvaluationAggregate};
use crate::middleware::AuthenticatedUser;
use crate::models::ApiResponse;
use crate::state::AppState;

/// Leave an evaluation of the trader `username` for a trade
///
/// The authenticated user is the reviewer; their accepted offer on the
/// trade is marked completed together with the evaluation insert.
pub async fn create_evaluation(
    State(app_state): State<AppState>,
    user: AuthenticatedUser,
    Path((trade_id, username)): Path<(Uuid, String)>,
    Json(request): Json<CreateEvaluationRequest>,
) -> Result<Json<ApiResponse<Evaluation>>, ApiError> {
    request.validate()?;

    let trade = app_state.trade_service.get_trade(trade_id).await?;
    let trader = app_state
        .user_service
        .get_user_by_username(&username)
        .await?;

    let evaluation = app_state
        .evaluation_service
        .create_evaluation(&trade, trader.id, user.user_id, request)
        .await?;

    Ok(Json(ApiResponse::ok(evaluation)))
}

/// Get the evaluation left about a trader for a trade
pub async fn get_evaluation(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path((trade_id, username)): Path<(Uuid, String)>,
) -> Result<Json<ApiResponse<Evaluation>>, ApiError> {
    let trader = app_state
        .user_service
        .get_user_by_username(&username)
        .await?;

    let evaluation = app_state
        .evaluation_service
        .get_evaluation(trade_id, trader.id)
        .await?;

    Ok(Json(ApiResponse::ok(evaluation)))
}

/// List all evaluations left about a trader
pub async fn list_evaluations_for_trader(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<Vec<Evaluation>>>, ApiError> {
    let trader = app_state
        .user_service
        .get_user_by_username(&username)
        .await?;

    let evaluations = app_state
        .evaluation_service
        .list_evaluations_for_trader(trader.id)
        .await?;

    Ok(Json(ApiResponse::ok(evaluations)))
}

/// Get aggregate evaluation statistics for a trader
pub async fn get_stats_for_trader(
    State(app_state): State<AppState>,
    _user: AuthenticatedUser,
    Path(username): Path<String>,
) -> Result<Json<ApiResponse<EvaluationAggregate>>, ApiError> {
    let trader = app_state
        .user_service
        .get_user_by_username(&username)
        .await?;

    let aggregate = app_state
        .stats_service
        .get_aggregates_for_trader(trader.id)
        .await?;

    Ok(Json(ApiResponse::ok(aggregate)))
}
