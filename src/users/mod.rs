//! User accounts: registration, login and lookup

pub mod model;
pub mod service;

pub use model::{AuthTokensResponse, LoginRequest, RegisterRequest};
pub use service::UserService;
