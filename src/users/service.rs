//! User service layer - registration, login and identity lookup
//!
//! Also the identity collaborator for the trade/offer/evaluation engines,
//! which resolve acting users by id and path users by username through this
//! service.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::generate_access_token;
use crate::error::ApiError;
use crate::models::User;
use crate::users::{AuthTokensResponse, LoginRequest, RegisterRequest};

/// User service for account management and lookups
#[derive(Clone)]
pub struct UserService {
    db_pool: PgPool,
    jwt_secret: String,
    jwt_ttl_seconds: i64,
}

impl UserService {
    /// Create a new user service instance
    pub fn new(db_pool: PgPool, jwt_secret: String, jwt_ttl_seconds: i64) -> Self {
        Self {
            db_pool,
            jwt_secret,
            jwt_ttl_seconds,
        }
    }

    /// JWT signing secret, for the auth extractor
    pub fn jwt_secret(&self) -> &str {
        &self.jwt_secret
    }

    /// Register a new account and issue its first access token
    pub async fn register(&self, request: RegisterRequest) -> Result<AuthTokensResponse, ApiError> {
        let taken = sqlx::query_as::<_, (Uuid,)>(
            "SELECT id FROM users WHERE username = $1 OR email = $2",
        )
        .bind(&request.username)
        .bind(&request.email)
        .fetch_optional(&self.db_pool)
        .await?;

        if taken.is_some() {
            return Err(ApiError::Conflict(
                "username or email already taken".to_string(),
            ));
        }

        let password_hash = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|e| ApiError::InternalError(format!("Failed to hash password: {}", e)))?;

        let user = sqlx::query_as::<_, User>(
            r#"
            INSERT INTO users (id, username, email, password_hash, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(&request.username)
        .bind(&request.email)
        .bind(&password_hash)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await?;

        self.tokens_for(user)
    }

    /// Authenticate with username and password
    pub async fn login(&self, request: LoginRequest) -> Result<AuthTokensResponse, ApiError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(&request.username)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::Unauthorized("invalid username or password".to_string()))?;

        let verified = bcrypt::verify(&request.password, &user.password_hash)
            .map_err(|e| ApiError::InternalError(format!("Failed to verify password: {}", e)))?;

        if !verified {
            return Err(ApiError::Unauthorized(
                "invalid username or password".to_string(),
            ));
        }

        self.tokens_for(user)
    }

    /// Get a user by ID
    pub async fn get_user_by_id(&self, id: Uuid) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    /// Get a user by username
    pub async fn get_user_by_username(&self, username: &str) -> Result<User, ApiError> {
        let user = sqlx::query_as::<_, User>("SELECT * FROM users WHERE username = $1")
            .bind(username)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("User not found".to_string()))?;

        Ok(user)
    }

    fn tokens_for(&self, user: User) -> Result<AuthTokensResponse, ApiError> {
        let access_token = generate_access_token(&user, &self.jwt_secret, self.jwt_ttl_seconds)
            .map_err(|e| ApiError::InternalError(format!("Failed to issue token: {}", e)))?;

        Ok(AuthTokensResponse {
            access_token,
            token_type: "bearer".to_string(),
            expires_in: self.jwt_ttl_seconds,
            user: user.into(),
        })
    }
}
