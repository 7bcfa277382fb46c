//! Token handling for authenticated requests

pub mod jwt;

pub use jwt::{generate_access_token, get_user_id_from_claims, verify_token, Claims, JwtError};
