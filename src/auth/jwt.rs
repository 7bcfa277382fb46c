//! JWT token generation and validation

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

use crate::models::User;

/// JWT-related errors
#[derive(Error, Debug)]
pub enum JwtError {
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),

    #[error("Token decoding failed: {0}")]
    DecodingFailed(String),

    #[error("Token expired")]
    TokenExpired,

    #[error("Invalid token: {0}")]
    InvalidToken(String),
}

/// JWT claims for access tokens
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Username
    pub username: String,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    /// Expiration (Unix timestamp)
    pub exp: i64,
}

/// Generate an access token for a user
pub fn generate_access_token(
    user: &User,
    secret: &str,
    ttl_seconds: i64,
) -> Result<String, JwtError> {
    let now = Utc::now();
    let exp = now + Duration::seconds(ttl_seconds);

    let claims = Claims {
        sub: user.id.to_string(),
        username: user.username.clone(),
        iat: now.timestamp(),
        exp: exp.timestamp(),
    };

    encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| JwtError::EncodingFailed(e.to_string()))
}

/// Verify and decode a JWT token
pub fn verify_token(token: &str, secret: &str) -> Result<Claims, JwtError> {
    let mut validation = Validation::default();
    validation.validate_exp = true;

    let token_data = decode::<Claims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|e| {
        if e.to_string().contains("ExpiredSignature") {
            JwtError::TokenExpired
        } else {
            JwtError::DecodingFailed(e.to_string())
        }
    })?;

    Ok(token_data.claims)
}

/// Extract user ID from claims
pub fn get_user_id_from_claims(claims: &Claims) -> Result<Uuid, JwtError> {
    Uuid::parse_str(&claims.sub).map_err(|e| JwtError::InvalidToken(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn create_test_user() -> User {
        User {
            id: Uuid::new_v4(),
            username: "lavender".to_string(),
            email: "lavender@example.com".to_string(),
            password_hash: "$2b$12$notarealhash".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_generate_and_verify_access_token() {
        let user = create_test_user();
        let secret = "test-secret-key";

        let token = generate_access_token(&user, secret, 3600).unwrap();
        assert!(!token.is_empty());

        let claims = verify_token(&token, secret).unwrap();
        assert_eq!(claims.sub, user.id.to_string());
        assert_eq!(claims.username, user.username);
        assert_eq!(get_user_id_from_claims(&claims).unwrap(), user.id);
    }

    #[test]
    fn test_invalid_token() {
        let secret = "test-secret-key";
        let result = verify_token("invalid.token.here", secret);
        assert!(result.is_err());
    }

    #[test]
    fn test_wrong_secret() {
        let user = create_test_user();

        let token = generate_access_token(&user, "secret1", 3600).unwrap();
        let result = verify_token(&token, "secret2");
        assert!(result.is_err());
    }
}
