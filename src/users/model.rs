//! User account request/response DTOs

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::models::UserPublic;

/// Request to register a new account
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterRequest {
    #[validate(length(min = 3, max = 32))]
    pub username: String,
    #[validate(email)]
    pub email: String,
    #[validate(length(min = 8))]
    pub password: String,
}

/// Request to log in with username and password
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

/// Auth tokens response
#[derive(Debug, Serialize)]
pub struct AuthTokensResponse {
    pub access_token: String,
    pub token_type: String,
    pub expires_in: i64,
    pub user: UserPublic,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_request_validation() {
        let request = RegisterRequest {
            username: "vetiver".to_string(),
            email: "vetiver@example.com".to_string(),
            password: "long-enough-password".to_string(),
        };
        assert!(request.validate().is_ok());

        let request = RegisterRequest {
            username: "ab".to_string(),
            email: "vetiver@example.com".to_string(),
            password: "long-enough-password".to_string(),
        };
        assert!(request.validate().is_err());

        let request = RegisterRequest {
            username: "vetiver".to_string(),
            email: "not-an-email".to_string(),
            password: "long-enough-password".to_string(),
        };
        assert!(request.validate().is_err());

        let request = RegisterRequest {
            username: "vetiver".to_string(),
            email: "vetiver@example.com".to_string(),
            password: "short".to_string(),
        };
        assert!(request.validate().is_err());
    }
}
