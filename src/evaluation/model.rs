//! Evaluation models and data structures

use serde::{Deserialize, Serialize};
use sqlx::types::chrono::{DateTime, Utc};
use uuid::Uuid;
use validator::Validate;

/// Evaluation model: a post-trade rating of the trade's owner
///
/// `trader_id` is the trade owner being rated; `reviewer_id` is the offering
/// user whose accepted offer the evaluation closes out. At most one
/// evaluation exists per (trade, trader) pair; rows are never updated or
/// deleted once written.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct Evaluation {
    pub id: Uuid,
    pub trade_id: Uuid,
    pub trader_id: Uuid,
    pub reviewer_id: Uuid,
    pub no_show: bool,
    pub responsiveness: Option<i32>,
    pub demeanor: Option<i32>,
    pub overall_rating: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Request DTO for creating an evaluation
///
/// Validated before any transaction opens: ratings are 0-5 and
/// overall_rating is required.
#[derive(Debug, Deserialize, Validate)]
pub struct CreateEvaluationRequest {
    #[serde(default)]
    pub no_show: bool,
    #[validate(range(min = 0, max = 5))]
    pub responsiveness: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub demeanor: Option<i32>,
    #[validate(range(min = 0, max = 5))]
    pub overall_rating: i32,
}

/// Aggregate statistics over a trader's evaluations
///
/// Averages and min/max are NULL when the trader has no evaluations yet;
/// counts are zero. Averages of optional ratings ignore rows where the
/// rating is absent.
#[derive(Debug, Serialize, Deserialize, sqlx::FromRow, Clone)]
pub struct EvaluationAggregate {
    pub avg_responsiveness: Option<f64>,
    pub avg_demeanor: Option<f64>,
    pub avg_overall_rating: Option<f64>,
    pub max_overall_rating: Option<i32>,
    pub min_overall_rating: Option<i32>,
    pub one_stars: i64,
    pub two_stars: i64,
    pub three_stars: i64,
    pub four_stars: i64,
    pub five_stars: i64,
    pub total_evaluations: i64,
    pub total_no_show: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rating_range_validation() {
        let request = CreateEvaluationRequest {
            no_show: false,
            responsiveness: Some(4),
            demeanor: Some(5),
            overall_rating: 3,
        };
        assert!(request.validate().is_ok());

        let request = CreateEvaluationRequest {
            no_show: false,
            responsiveness: Some(6),
            demeanor: None,
            overall_rating: 3,
        };
        assert!(request.validate().is_err());

        let request = CreateEvaluationRequest {
            no_show: false,
            responsiveness: None,
            demeanor: None,
            overall_rating: -1,
        };
        assert!(request.validate().is_err());
    }

    #[test]
    fn test_optional_ratings_may_be_absent() {
        let request = CreateEvaluationRequest {
            no_show: true,
            responsiveness: None,
            demeanor: None,
            overall_rating: 0,
        };
        assert!(request.validate().is_ok());
    }

    #[test]
    fn test_no_show_defaults_to_false() {
        let request: CreateEvaluationRequest =
            serde_json::from_str(r#"{"overall_rating": 4}"#).unwrap();
        assert!(!request.no_show);
        assert_eq!(request.overall_rating, 4);
    }
}
