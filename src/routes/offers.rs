//! Offer route definitions
//!
//! Cancel and rescind act on the authenticated user's own offer, so they
//! address the collection; accept addresses the offering user by name.

use axum::{
    routing::{delete, get, post, put},
    Router,
};

use crate::handlers::*;
use crate::state::AppState;

pub fn offer_routes() -> Router<AppState> {
    Router::new()
        .route("/api/trades/:trade_id/offers", post(create_offer))
        .route("/api/trades/:trade_id/offers", get(list_offers))
        .route("/api/trades/:trade_id/offers", put(cancel_offer))
        .route("/api/trades/:trade_id/offers", delete(rescind_offer))
        .route(
            "/api/trades/:trade_id/offers/:username",
            get(get_offer_from_user),
        )
        .route(
            "/api/trades/:trade_id/offers/:username/accept",
            put(accept_offer),
        )
}
