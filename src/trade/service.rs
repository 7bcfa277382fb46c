//! Trade service layer - listing lifecycle and lookups

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::trade::{
    CreateTradeRequest, DisposalMode, ListTradesQuery, Trade, TradeSize, UpdateTradeRequest,
};

/// Trade service for managing listings
#[derive(Clone)]
pub struct TradeService {
    db_pool: PgPool,
}

impl TradeService {
    /// Create a new trade service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Create a listing owned by `owner_id`
    pub async fn create_trade(
        &self,
        owner_id: Uuid,
        request: CreateTradeRequest,
    ) -> Result<Trade, ApiError> {
        let trade = sqlx::query_as::<_, Trade>(
            r#"
            INSERT INTO trades (id, user_id, product_id, size, comment, what_do, price_cents, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(owner_id)
        .bind(request.product_id)
        .bind(request.size.unwrap_or(TradeSize::Regular))
        .bind(&request.comment)
        .bind(request.what_do.unwrap_or(DisposalMode::Trade))
        .bind(request.price_cents)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await?;

        Ok(trade)
    }

    /// Get a single trade by ID
    pub async fn get_trade(&self, id: Uuid) -> Result<Trade, ApiError> {
        let trade = sqlx::query_as::<_, Trade>("SELECT * FROM trades WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Trade not found".to_string()))?;

        Ok(trade)
    }

    /// List trades with optional owner/product/disposal filters
    pub async fn list_trades(&self, query: ListTradesQuery) -> Result<Vec<Trade>, ApiError> {
        let mut query_builder: sqlx::QueryBuilder<sqlx::Postgres> =
            sqlx::QueryBuilder::new("SELECT * FROM trades WHERE 1=1");

        if let Some(user_id) = query.user_id {
            query_builder.push(" AND user_id = ");
            query_builder.push_bind(user_id);
        }
        if let Some(product_id) = query.product_id {
            query_builder.push(" AND product_id = ");
            query_builder.push_bind(product_id);
        }
        if let Some(what_do) = query.what_do {
            query_builder.push(" AND what_do = ");
            query_builder.push_bind(what_do);
        }

        query_builder.push(" ORDER BY created_at DESC");

        let trades = query_builder
            .build_query_as::<Trade>()
            .fetch_all(&self.db_pool)
            .await?;

        Ok(trades)
    }

    /// List all trades owned by a user
    pub async fn list_trades_for_user(&self, owner_id: Uuid) -> Result<Vec<Trade>, ApiError> {
        self.list_trades(ListTradesQuery {
            user_id: Some(owner_id),
            ..Default::default()
        })
        .await
    }

    /// Apply a partial update to a trade
    ///
    /// Only fields present in the patch are written; a patch with no fields
    /// at all is rejected before touching the database.
    pub async fn update_trade(
        &self,
        trade: &Trade,
        patch: UpdateTradeRequest,
    ) -> Result<Trade, ApiError> {
        if !patch.has_changes() {
            return Err(ApiError::BadRequest(
                "no valid update parameters, no update performed".to_string(),
            ));
        }

        let mut query_builder: sqlx::QueryBuilder<sqlx::Postgres> =
            sqlx::QueryBuilder::new("UPDATE trades SET ");
        let mut fields = query_builder.separated(", ");

        if let Some(size) = patch.size {
            fields.push("size = ");
            fields.push_bind_unseparated(size);
        }
        if let Some(comment) = patch.comment {
            fields.push("comment = ");
            fields.push_bind_unseparated(comment);
        }
        if let Some(what_do) = patch.what_do {
            fields.push("what_do = ");
            fields.push_bind_unseparated(what_do);
        }
        if let Some(price_cents) = patch.price_cents {
            fields.push("price_cents = ");
            fields.push_bind_unseparated(price_cents);
        }
        fields.push("updated_at = ");
        fields.push_bind_unseparated(Utc::now());

        query_builder.push(" WHERE id = ");
        query_builder.push_bind(trade.id);
        query_builder.push(" RETURNING *");

        let updated = query_builder
            .build_query_as::<Trade>()
            .fetch_optional(&self.db_pool)
            .await?
            .ok_or_else(|| ApiError::NotFound("Trade not found".to_string()))?;

        Ok(updated)
    }

    /// Delete a trade, returning the deleted id
    ///
    /// Offers and evaluations on the trade are removed by cascade.
    pub async fn delete_trade(&self, trade: &Trade) -> Result<Uuid, ApiError> {
        let result = sqlx::query("DELETE FROM trades WHERE id = $1")
            .bind(trade.id)
            .execute(&self.db_pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(ApiError::NotFound("Trade not found".to_string()));
        }

        Ok(trade.id)
    }
}
