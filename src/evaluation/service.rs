//! Evaluation service layer - post-trade ratings
//!
//! Creating an evaluation and flipping the winning offer to completed are
//! one logical write: both happen inside a single transaction, so an
//! evaluation can never exist without its offer being completed. The
//! duplicate check runs as a pre-read inside the same transaction, with the
//! UNIQUE (trade_id, trader_id) constraint as the storage-layer backstop
//! against two concurrent requests racing past the pre-read.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::evaluation::{CreateEvaluationRequest, Evaluation};
use crate::offer::model::{Offer, OfferStatus};
use crate::offer::service::mark_offer_completed;
use crate::trade::Trade;

/// Evaluation service for post-trade ratings
#[derive(Clone)]
pub struct EvaluationService {
    db_pool: PgPool,
}

impl EvaluationService {
    /// Create a new evaluation service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Create an evaluation of `trader_id` on `trade` by `reviewer_id`
    ///
    /// The reviewer must hold the trade's accepted offer and the trader must
    /// own the trade. On success the reviewer's offer is marked completed in
    /// the same transaction.
    pub async fn create_evaluation(
        &self,
        trade: &Trade,
        trader_id: Uuid,
        reviewer_id: Uuid,
        request: CreateEvaluationRequest,
    ) -> Result<Evaluation, ApiError> {
        if trade.user_id != trader_id {
            return Err(ApiError::BadRequest(
                "cannot leave an evaluation for an unrelated user".to_string(),
            ));
        }

        let mut tx = self.db_pool.begin().await?;

        // Lock the reviewer's offer row so a concurrent evaluation attempt
        // serializes behind this transaction.
        let offer = sqlx::query_as::<_, Offer>(
            "SELECT * FROM offers WHERE trade_id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(trade.id)
        .bind(reviewer_id)
        .fetch_optional(&mut *tx)
        .await?;

        // A completed offer means the evaluation for this (trade, trader)
        // pair already exists, so both branches below are duplicate
        // conflicts rather than permission failures.
        match offer.map(|o| o.status) {
            Some(OfferStatus::Accepted) => {}
            Some(OfferStatus::Completed) => {
                return Err(ApiError::Conflict(
                    "an evaluation has already been completed for this trade".to_string(),
                ));
            }
            _ => {
                return Err(ApiError::Forbidden(
                    "only users with accepted offers can leave evaluations".to_string(),
                ));
            }
        }

        let existing = sqlx::query_as::<_, Evaluation>(
            "SELECT * FROM evaluations WHERE trade_id = $1 AND trader_id = $2",
        )
        .bind(trade.id)
        .bind(trader_id)
        .fetch_optional(&mut *tx)
        .await?;

        if existing.is_some() {
            return Err(ApiError::Conflict(
                "an evaluation already exists for this trade".to_string(),
            ));
        }

        let evaluation = sqlx::query_as::<_, Evaluation>(
            r#"
            INSERT INTO evaluations (
                id, trade_id, trader_id, reviewer_id, no_show,
                responsiveness, demeanor, overall_rating, created_at, updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(trade.id)
        .bind(trader_id)
        .bind(reviewer_id)
        .bind(request.no_show)
        .bind(request.responsiveness)
        .bind(request.demeanor)
        .bind(request.overall_rating)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&mut *tx)
        .await?;

        mark_offer_completed(&mut tx, trade.id, reviewer_id).await?;

        tx.commit().await?;

        Ok(evaluation)
    }

    /// Get the evaluation left about a trader for a specific trade
    pub async fn get_evaluation(
        &self,
        trade_id: Uuid,
        trader_id: Uuid,
    ) -> Result<Evaluation, ApiError> {
        let evaluation = sqlx::query_as::<_, Evaluation>(
            "SELECT * FROM evaluations WHERE trade_id = $1 AND trader_id = $2",
        )
        .bind(trade_id)
        .bind(trader_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Evaluation not found".to_string()))?;

        Ok(evaluation)
    }

    /// List all evaluations left about a trader
    pub async fn list_evaluations_for_trader(
        &self,
        trader_id: Uuid,
    ) -> Result<Vec<Evaluation>, ApiError> {
        let evaluations = sqlx::query_as::<_, Evaluation>(
            "SELECT * FROM evaluations WHERE trader_id = $1 ORDER BY created_at DESC",
        )
        .bind(trader_id)
        .fetch_all(&self.db_pool)
        .await?;

        Ok(evaluations)
    }
}
