//! API handlers for the Tradepost backend

mod evaluations;
mod offers;
mod trades;
mod users;

pub use evaluations::*;
pub use offers::*;
pub use trades::*;
pub use users::*;
