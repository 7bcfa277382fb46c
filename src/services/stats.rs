//! Aggregate statistics engine over a trader's evaluations
//!
//! The whole read model comes out of one aggregation query. SQL AVG/MIN/MAX
//! skip NULL inputs and return NULL over an empty set, which lines up with
//! the aggregate's semantics: optional ratings only contribute where
//! present, and a trader with no evaluations yet gets zero counts with NULL
//! averages rather than an error.

use sqlx::PgPool;
use uuid::Uuid;

use crate::error::ApiError;
use crate::evaluation::EvaluationAggregate;

/// Statistics service computing derived reputation aggregates
#[derive(Clone)]
pub struct StatsService {
    db_pool: PgPool,
}

impl StatsService {
    /// Create a new stats service instance
    pub fn new(db_pool: PgPool) -> Self {
        Self { db_pool }
    }

    /// Compute the evaluation aggregate for a trader
    pub async fn get_aggregates_for_trader(
        &self,
        trader_id: Uuid,
    ) -> Result<EvaluationAggregate, ApiError> {
        let aggregate = sqlx::query_as::<_, EvaluationAggregate>(
            r#"
            SELECT
                AVG(responsiveness)::float8 AS avg_responsiveness,
                AVG(demeanor)::float8 AS avg_demeanor,
                AVG(overall_rating)::float8 AS avg_overall_rating,
                MAX(overall_rating) AS max_overall_rating,
                MIN(overall_rating) AS min_overall_rating,
                COUNT(*) FILTER (WHERE overall_rating = 1) AS one_stars,
                COUNT(*) FILTER (WHERE overall_rating = 2) AS two_stars,
                COUNT(*) FILTER (WHERE overall_rating = 3) AS three_stars,
                COUNT(*) FILTER (WHERE overall_rating = 4) AS four_stars,
                COUNT(*) FILTER (WHERE overall_rating = 5) AS five_stars,
                COUNT(*) AS total_evaluations,
                COUNT(*) FILTER (WHERE no_show) AS total_no_show
            FROM evaluations
            WHERE trader_id = $1
            "#,
        )
        .bind(trader_id)
        .fetch_one(&self.db_pool)
        .await
        .map_err(|e| ApiError::DatabaseError(e.to_string()))?;

        Ok(aggregate)
    }
}
