//! Offer models and data structures

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;

/// Offer model: one user's bid to receive a trade's product
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Offer {
    pub id: Uuid,
    pub trade_id: Uuid,
    pub user_id: Uuid,
    pub status: OfferStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Offer lifecycle status
///
/// Closed set. Direct transitions are driven through [`OfferStatus::next`];
/// sibling side effects (mass rejection on accept, re-pending of rejected
/// offers on cancel) are issued by the service inside the same transaction.
#[derive(Debug, Serialize, Deserialize, sqlx::Type, Clone, Copy, PartialEq, Eq)]
#[sqlx(type_name = "offer_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum OfferStatus {
    Pending,
    Accepted,
    Rejected,
    Cancelled,
    Completed,
}

/// Actions a caller can request on a single offer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OfferAction {
    Accept,
    Cancel,
    Rescind,
    Complete,
}

impl OfferStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferStatus::Pending => "pending",
            OfferStatus::Accepted => "accepted",
            OfferStatus::Rejected => "rejected",
            OfferStatus::Cancelled => "cancelled",
            OfferStatus::Completed => "completed",
        }
    }

    /// Transition table: current state x action -> new state or error.
    ///
    /// `Ok(None)` means the offer row is removed (rescission). Errors name
    /// the expected prior state so the caller knows why the action failed.
    pub fn next(self, action: OfferAction) -> Result<Option<OfferStatus>, String> {
        match (self, action) {
            (OfferStatus::Pending, OfferAction::Accept) => Ok(Some(OfferStatus::Accepted)),
            (_, OfferAction::Accept) => Err(format!(
                "can only accept offers that are currently pending (offer is {})",
                self.as_str()
            )),

            (OfferStatus::Accepted, OfferAction::Cancel) => Ok(Some(OfferStatus::Cancelled)),
            (_, OfferAction::Cancel) => Err(format!(
                "can only cancel accepted offers (offer is {})",
                self.as_str()
            )),

            (OfferStatus::Pending, OfferAction::Rescind) => Ok(None),
            (_, OfferAction::Rescind) => Err(format!(
                "can only rescind currently pending offers (offer is already {})",
                self.as_str()
            )),

            (OfferStatus::Accepted, OfferAction::Complete) => Ok(Some(OfferStatus::Completed)),
            (_, OfferAction::Complete) => Err(format!(
                "can only complete accepted offers (offer is {})",
                self.as_str()
            )),
        }
    }

    /// Whether this offer holds the trade's accepted slot
    pub fn holds_accepted_slot(&self) -> bool {
        matches!(self, OfferStatus::Accepted | OfferStatus::Completed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accept_only_from_pending() {
        assert_eq!(
            OfferStatus::Pending.next(OfferAction::Accept),
            Ok(Some(OfferStatus::Accepted))
        );
        for status in [
            OfferStatus::Accepted,
            OfferStatus::Rejected,
            OfferStatus::Cancelled,
            OfferStatus::Completed,
        ] {
            assert!(status.next(OfferAction::Accept).is_err());
        }
    }

    #[test]
    fn test_cancel_only_from_accepted() {
        assert_eq!(
            OfferStatus::Accepted.next(OfferAction::Cancel),
            Ok(Some(OfferStatus::Cancelled))
        );
        let err = OfferStatus::Pending.next(OfferAction::Cancel).unwrap_err();
        assert!(err.contains("can only cancel accepted offers"));
    }

    #[test]
    fn test_rescind_only_from_pending() {
        assert_eq!(OfferStatus::Pending.next(OfferAction::Rescind), Ok(None));
        let err = OfferStatus::Rejected.next(OfferAction::Rescind).unwrap_err();
        assert!(err.contains("already rejected"));
    }

    #[test]
    fn test_completed_is_immutable() {
        for action in [
            OfferAction::Accept,
            OfferAction::Cancel,
            OfferAction::Rescind,
            OfferAction::Complete,
        ] {
            assert!(OfferStatus::Completed.next(action).is_err());
        }
    }

    #[test]
    fn test_accepted_slot() {
        assert!(OfferStatus::Accepted.holds_accepted_slot());
        assert!(OfferStatus::Completed.holds_accepted_slot());
        assert!(!OfferStatus::Pending.holds_accepted_slot());
        assert!(!OfferStatus::Rejected.holds_accepted_slot());
        assert!(!OfferStatus::Cancelled.holds_accepted_slot());
    }
}
