//! Application state shared across handlers

use std::sync::Arc;

use axum::extract::FromRef;

use crate::evaluation::EvaluationService;
use crate::offer::OfferService;
use crate::services::StatsService;
use crate::trade::TradeService;
use crate::users::UserService;

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub user_service: Arc<UserService>,
    pub trade_service: Arc<TradeService>,
    pub offer_service: Arc<OfferService>,
    pub evaluation_service: Arc<EvaluationService>,
    pub stats_service: Arc<StatsService>,
}

impl AppState {
    pub fn new(
        user_service: Arc<UserService>,
        trade_service: Arc<TradeService>,
        offer_service: Arc<OfferService>,
        evaluation_service: Arc<EvaluationService>,
        stats_service: Arc<StatsService>,
    ) -> Self {
        Self {
            user_service,
            trade_service,
            offer_service,
            evaluation_service,
            stats_service,
        }
    }
}

impl FromRef<AppState> for Arc<UserService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.user_service.clone()
    }
}

impl FromRef<AppState> for Arc<TradeService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.trade_service.clone()
    }
}

impl FromRef<AppState> for Arc<OfferService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.offer_service.clone()
    }
}

impl FromRef<AppState> for Arc<EvaluationService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.evaluation_service.clone()
    }
}

impl FromRef<AppState> for Arc<StatsService> {
    fn from_ref(app_state: &AppState) -> Self {
        app_state.stats_service.clone()
    }
}
