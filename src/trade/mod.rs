//! Trade domain: listings open for offers

pub mod model;
pub mod service;

pub use model::{
    CreateTradeRequest, DisposalMode, ListTradesQuery, Trade, TradeSize, UpdateTradeRequest,
};
pub use service::TradeService;
