//! Trade models and data structures

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;

/// Trade model: a listing of one product instance, open for offers
///
/// `user_id` is the listing owner and never changes after creation.
/// `product_id` is an opaque reference into the external catalog service.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Trade {
    pub id: Uuid,
    pub user_id: Uuid,
    pub product_id: Uuid,
    pub size: TradeSize,
    pub comment: Option<String>,
    pub what_do: DisposalMode,
    pub price_cents: Option<i64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Size of the listed product instance
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "trade_size", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum TradeSize {
    Sample,
    Travel,
    Regular,
    Jumbo,
}

/// What the owner wants to do with the listing
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "disposal_mode", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum DisposalMode {
    Trade,
    Sell,
    Giveaway,
}

/// Request DTO for creating a trade
#[derive(Debug, Deserialize)]
pub struct CreateTradeRequest {
    pub product_id: Uuid,
    pub size: Option<TradeSize>,
    pub comment: Option<String>,
    pub what_do: Option<DisposalMode>,
    pub price_cents: Option<i64>,
}

/// Partial-update DTO for a trade
///
/// Every field is optional: absent means "leave unchanged", present means
/// "set to this value". There is no truthiness merging; an explicit value
/// is always applied.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateTradeRequest {
    pub size: Option<TradeSize>,
    pub comment: Option<String>,
    pub what_do: Option<DisposalMode>,
    pub price_cents: Option<i64>,
}

impl UpdateTradeRequest {
    /// Whether the patch carries at least one field to apply
    pub fn has_changes(&self) -> bool {
        self.size.is_some()
            || self.comment.is_some()
            || self.what_do.is_some()
            || self.price_cents.is_some()
    }
}

/// Query parameters for listing trades
#[derive(Debug, Default, Deserialize)]
pub struct ListTradesQuery {
    pub user_id: Option<Uuid>,
    pub product_id: Option<Uuid>,
    pub what_do: Option<DisposalMode>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_patch_has_no_changes() {
        let patch = UpdateTradeRequest::default();
        assert!(!patch.has_changes());
    }

    #[test]
    fn test_explicit_zero_price_counts_as_a_change() {
        // Zero is a value, not "absent" - no truthiness merging.
        let patch = UpdateTradeRequest {
            price_cents: Some(0),
            ..Default::default()
        };
        assert!(patch.has_changes());
    }

    #[test]
    fn test_single_field_patch_has_changes() {
        let patch = UpdateTradeRequest {
            size: Some(TradeSize::Jumbo),
            ..Default::default()
        };
        assert!(patch.has_changes());
    }
}
