//! Trade route definitions

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::*;
use crate::state::AppState;

pub fn trade_routes() -> Router<AppState> {
    Router::new()
        .route("/api/trades", post(create_trade))
        .route("/api/trades", get(list_trades))
        .route("/api/trades/:trade_id", get(get_trade))
        .route("/api/trades/:trade_id", put(update_trade))
        .route("/api/trades/:trade_id", delete(delete_trade))
}
