//! Route definitions for the Tradepost API

mod evaluations;
mod offers;
mod trades;
mod users;

pub use evaluations::evaluation_routes;
pub use offers::offer_routes;
pub use trades::trade_routes;
pub use users::user_routes;
