//! User route definitions

use axum::{
    routing::{get, post},
    Router,
};

use crate::handlers::*;
use crate::state::AppState;

pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/api/users", post(register))
        .route("/api/users/login", post(login))
        .route("/api/users/me", get(me))
        .route("/api/users/:username", get(get_user))
        .route("/api/users/:username/trades", get(list_trades_for_user))
}
