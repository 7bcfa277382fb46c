//! Authentication middleware
//!
//! Middleware for JWT token verification and user extraction.

use axum::{
    async_trait,
    extract::{FromRef, FromRequestParts},
    http::{request::Parts, StatusCode},
    response::{IntoResponse, Response},
    Json,
};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::Serialize;
use std::sync::Arc;
use uuid::Uuid;

use crate::auth::verify_token;
use crate::users::UserService;

/// Authenticated user extracted from a JWT access token
#[derive(Debug, Clone)]
pub struct AuthenticatedUser {
    pub user_id: Uuid,
    pub username: String,
}

/// Error response for authentication failures
#[derive(Debug, Serialize)]
struct AuthError {
    error: AuthErrorDetails,
}

#[derive(Debug, Serialize)]
struct AuthErrorDetails {
    code: String,
    message: String,
}

impl AuthError {
    fn new(code: &str, message: &str) -> Self {
        Self {
            error: AuthErrorDetails {
                code: code.to_string(),
                message: message.to_string(),
            },
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, Json(self)).into_response()
    }
}

/// Extractor for authenticated users
///
/// Verifies the Bearer token from the Authorization header and yields the
/// acting user's identity. Handlers that take this extractor reject
/// unauthenticated requests with 401 before any business logic runs.
#[async_trait]
impl<S> FromRequestParts<S> for AuthenticatedUser
where
    Arc<UserService>: FromRef<S>,
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| {
                    AuthError::new(
                        "MISSING_TOKEN",
                        "Authorization header with Bearer token required",
                    )
                    .into_response()
                })?;

        let user_service = Arc::<UserService>::from_ref(state);

        let claims = verify_token(bearer.token(), user_service.jwt_secret()).map_err(|e| {
            let (code, message) = match e.to_string().as_str() {
                s if s.contains("expired") => ("TOKEN_EXPIRED", "Token has expired"),
                _ => ("INVALID_TOKEN", "Invalid token"),
            };
            AuthError::new(code, message).into_response()
        })?;

        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| {
            AuthError::new("INVALID_TOKEN", "Invalid user ID in token").into_response()
        })?;

        Ok(AuthenticatedUser {
            user_id,
            username: claims.username,
        })
    }
}
