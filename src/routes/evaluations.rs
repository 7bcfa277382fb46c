//! Evaluation route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::*;
use crate::state::AppState;

pub fn evaluation_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/api/trades/:trade_id/evaluations/:username",
            post(create_evaluation),
        )
        .route(
            "/api/trades/:trade_id/evaluations/:username",
            get(get_evaluation),
        )
        .route(
            "/api/users/:username/evaluations",
            get(list_evaluations_for_trader),
        )
        .route(
            "/api/users/:username/evaluations/stats",
            get(get_stats_for_trader),
        )
}
