//! Offer service layer - the offer lifecycle state machine
//!
//! Acceptance and cancellation mutate sibling offers on the same trade, so
//! every state-changing operation here runs as a single database transaction
//! and locks the trade's offer set with `SELECT ... FOR UPDATE`. Concurrent
//! accept attempts on the same trade serialize on those row locks; the loser
//! observes the winner's accepted row and fails the no-sibling-accepted
//! precondition. A partial unique index on (trade_id) WHERE status IN
//! ('accepted', 'completed') backstops the same invariant in the schema.

use chrono::Utc;
use sqlx::{PgPool, Postgres, Transaction};
use uuid::Uuid;

use crate::error::ApiError;
use crate::offer::{Offer, OfferAction, OfferStatus};
use crate::trade::Trade;

/// Offer service for managing the offer lifecycle
#[derive(Clone)]
pub struct OfferService {
    db_pool: PgPool,
}

impl OfferService {
    /// Create a new offer service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Create a pending offer from `user_id` on `trade`
    ///
    /// The trade owner cannot offer on their own trade, and a user can hold
    /// at most one offer per trade. The UNIQUE (trade_id, user_id)
    /// constraint catches racing duplicates past the pre-check.
    pub async fn create_offer(&self, trade: &Trade, user_id: Uuid) -> Result<Offer, ApiError> {
        if trade.user_id == user_id {
            return Err(ApiError::InvalidOperation(
                "cannot offer on a trade you own".to_string(),
            ));
        }

        let existing = sqlx::query_as::<_, Offer>(
            "SELECT * FROM offers WHERE trade_id = $1 AND user_id = $2",
        )
        .bind(trade.id)
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?;

        if existing.is_some() {
            return Err(ApiError::Conflict(
                "user already has an offer for this trade".to_string(),
            ));
        }

        let offer = sqlx::query_as::<_, Offer>(
            r#"
            INSERT INTO offers (id, trade_id, user_id, status, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING *
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(trade.id)
        .bind(user_id)
        .bind(OfferStatus::Pending)
        .bind(Utc::now())
        .bind(Utc::now())
        .fetch_one(&self.db_pool)
        .await?;

        Ok(offer)
    }

    /// Accept the offer from `offer_user_id` on `trade_id`
    ///
    /// Atomically marks the target accepted and demotes every other pending
    /// offer on the trade to rejected. Previously cancelled offers stay
    /// cancelled. Fails with Conflict if the trade already has an accepted
    /// or completed offer.
    pub async fn accept_offer(
        &self,
        trade_id: Uuid,
        offer_user_id: Uuid,
    ) -> Result<Offer, ApiError> {
        let mut tx = self.db_pool.begin().await?;

        let offers = lock_offers_for_trade(&mut tx, trade_id).await?;

        let target = offers
            .iter()
            .find(|o| o.user_id == offer_user_id)
            .ok_or_else(|| ApiError::NotFound("Offer not found".to_string()))?;

        if offers
            .iter()
            .any(|o| o.id != target.id && o.status.holds_accepted_slot())
        {
            return Err(ApiError::Conflict(
                "trade already has an accepted offer".to_string(),
            ));
        }

        let next = target
            .status
            .next(OfferAction::Accept)
            .map_err(ApiError::InvalidOperation)?
            .unwrap_or(OfferStatus::Accepted);

        let accepted = sqlx::query_as::<_, Offer>(
            "UPDATE offers SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *",
        )
        .bind(next)
        .bind(Utc::now())
        .bind(target.id)
        .fetch_one(&mut *tx)
        .await?;

        // Demote the losing bids in the same transaction: no reader may see
        // the target accepted while a sibling is still pending.
        sqlx::query(
            r#"
            UPDATE offers
            SET status = $1, updated_at = $2
            WHERE trade_id = $3 AND id <> $4 AND status = $5
            "#,
        )
        .bind(OfferStatus::Rejected)
        .bind(Utc::now())
        .bind(trade_id)
        .bind(target.id)
        .bind(OfferStatus::Pending)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(accepted)
    }

    /// Cancel the accepted offer from `offer_user_id` on `trade_id`
    ///
    /// Atomically marks the target cancelled and reverts every rejected
    /// sibling back to pending, reopening the trade for a new round of
    /// acceptance. Cancelled siblings from earlier rounds stay cancelled.
    pub async fn cancel_offer(
        &self,
        trade_id: Uuid,
        offer_user_id: Uuid,
    ) -> Result<Offer, ApiError> {
        let mut tx = self.db_pool.begin().await?;

        let offers = lock_offers_for_trade(&mut tx, trade_id).await?;

        let target = offers
            .iter()
            .find(|o| o.user_id == offer_user_id)
            .ok_or_else(|| ApiError::NotFound("Offer not found".to_string()))?;

        let next = target
            .status
            .next(OfferAction::Cancel)
            .map_err(ApiError::InvalidOperation)?
            .unwrap_or(OfferStatus::Cancelled);

        let cancelled = sqlx::query_as::<_, Offer>(
            "UPDATE offers SET status = $1, updated_at = $2 WHERE id = $3 RETURNING *",
        )
        .bind(next)
        .bind(Utc::now())
        .bind(target.id)
        .fetch_one(&mut *tx)
        .await?;

        sqlx::query(
            r#"
            UPDATE offers
            SET status = $1, updated_at = $2
            WHERE trade_id = $3 AND id <> $4 AND status = $5
            "#,
        )
        .bind(OfferStatus::Pending)
        .bind(Utc::now())
        .bind(trade_id)
        .bind(target.id)
        .bind(OfferStatus::Rejected)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;

        Ok(cancelled)
    }

    /// Rescind (delete) the pending offer from `offer_user_id` on `trade_id`
    ///
    /// Pending offers have no history value, so rescission removes the row
    /// entirely and returns the deleted id. Offers in any other state are
    /// kept for history and cannot be rescinded.
    pub async fn rescind_offer(
        &self,
        trade_id: Uuid,
        offer_user_id: Uuid,
    ) -> Result<Uuid, ApiError> {
        let mut tx = self.db_pool.begin().await?;

        let offer = sqlx::query_as::<_, Offer>(
            "SELECT * FROM offers WHERE trade_id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(trade_id)
        .bind(offer_user_id)
        .fetch_optional(&mut *tx)
        .await?
        .ok_or_else(|| ApiError::NotFound("Offer not found".to_string()))?;

        offer
            .status
            .next(OfferAction::Rescind)
            .map_err(ApiError::InvalidOperation)?;

        sqlx::query("DELETE FROM offers WHERE id = $1")
            .bind(offer.id)
            .execute(&mut *tx)
            .await?;

        tx.commit().await?;

        Ok(offer.id)
    }

    /// List all offers on a trade
    pub async fn list_offers_for_trade(&self, trade_id: Uuid) -> Result<Vec<Offer>, ApiError> {
        let offers =
            sqlx::query_as::<_, Offer>("SELECT * FROM offers WHERE trade_id = $1 ORDER BY created_at")
                .bind(trade_id)
                .fetch_all(&self.db_pool)
                .await?;

        Ok(offers)
    }

    /// Get the offer a specific user holds on a trade
    pub async fn get_offer_for_trade_from_user(
        &self,
        trade_id: Uuid,
        user_id: Uuid,
    ) -> Result<Offer, ApiError> {
        let offer = sqlx::query_as::<_, Offer>(
            "SELECT * FROM offers WHERE trade_id = $1 AND user_id = $2",
        )
        .bind(trade_id)
        .bind(user_id)
        .fetch_optional(&self.db_pool)
        .await?
        .ok_or_else(|| ApiError::NotFound("Offer not found".to_string()))?;

        Ok(offer)
    }
}

/// Lock and load a trade's full offer set for update
async fn lock_offers_for_trade(
    tx: &mut Transaction<'_, Postgres>,
    trade_id: Uuid,
) -> Result<Vec<Offer>, ApiError> {
    let offers = sqlx::query_as::<_, Offer>(
        "SELECT * FROM offers WHERE trade_id = $1 ORDER BY created_at FOR UPDATE",
    )
    .bind(trade_id)
    .fetch_all(&mut **tx)
    .await?;

    Ok(offers)
}

/// Mark the accepted offer for (trade, recipient) as completed
///
/// Internal to the crate: invoked only by the evaluation service inside its
/// own transaction, so the evaluation insert and the completion flip commit
/// or roll back together. Callers guarantee single invocation through the
/// evaluation uniqueness check.
pub(crate) async fn mark_offer_completed(
    tx: &mut Transaction<'_, Postgres>,
    trade_id: Uuid,
    recipient_id: Uuid,
) -> Result<Offer, ApiError> {
    let offer = sqlx::query_as::<_, Offer>(
        r#"
        UPDATE offers
        SET status = $1, updated_at = $2
        WHERE trade_id = $3 AND user_id = $4 AND status = $5
        RETURNING *
        "#,
    )
    .bind(OfferStatus::Completed)
    .bind(Utc::now())
    .bind(trade_id)
    .bind(recipient_id)
    .bind(OfferStatus::Accepted)
    .fetch_optional(&mut **tx)
    .await?
    .ok_or_else(|| {
        ApiError::InvalidOperation(
            "no accepted offer for this user on this trade".to_string(),
        )
    })?;

    Ok(offer)
}
