//! Evaluation and aggregate statistics tests
//!
//! Database-backed tests are ignored by default and run against
//! TEST_DATABASE_URL when a Postgres instance is available.

#[cfg(test)]
mod tests {
    use sqlx::PgPool;
    use uuid::Uuid;

    use tradepost_server::error::ApiError;
    use tradepost_server::evaluation::{CreateEvaluationRequest, EvaluationService};
    use tradepost_server::models::UserPublic;
    use tradepost_server::offer::{OfferService, OfferStatus};
    use tradepost_server::services::StatsService;
    use tradepost_server::trade::{CreateTradeRequest, Trade, TradeService};
    use tradepost_server::users::{RegisterRequest, UserService};

    /// Helper to create a test database pool with the schema applied
    async fn setup_test_db() -> PgPool {
        let database_url = std::env::var("TEST_DATABASE_URL")
            .unwrap_or_else(|_| "postgresql://localhost/tradepost_test".to_string());

        let pool = sqlx::postgres::PgPoolOptions::new()
            .max_connections(5)
            .connect(&database_url)
            .await
            .expect("Failed to connect to test database");

        tradepost_server::db::run_migrations(&pool)
            .await
            .expect("Failed to run migrations");

        pool
    }

    /// Helper to register a user with a unique username
    async fn register_user(pool: &PgPool, prefix: &str) -> UserPublic {
        let user_service = UserService::new(pool.clone(), "test-secret".to_string(), 3600);
        let suffix = Uuid::new_v4().simple().to_string();

        let tokens = user_service
            .register(RegisterRequest {
                username: format!("{}-{}", prefix, &suffix[..8]),
                email: format!("{}-{}@example.com", prefix, &suffix[..8]),
                password: "correct-horse-battery".to_string(),
            })
            .await
            .expect("Failed to register test user");

        tokens.user
    }

    /// Helper to create a trade with an accepted offer from `bidder_id`
    async fn trade_with_accepted_offer(pool: &PgPool, owner_id: Uuid, bidder_id: Uuid) -> Trade {
        let trade = TradeService::new(pool.clone())
            .create_trade(
                owner_id,
                CreateTradeRequest {
                    product_id: Uuid::new_v4(),
                    size: None,
                    comment: None,
                    what_do: None,
                    price_cents: None,
                },
            )
            .await
            .expect("Failed to create test trade");

        let offer_service = OfferService::new(pool.clone());
        offer_service
            .create_offer(&trade, bidder_id)
            .await
            .expect("Failed to create offer");
        offer_service
            .accept_offer(trade.id, bidder_id)
            .await
            .expect("Failed to accept offer");

        trade
    }

    fn rating(overall: i32, responsiveness: Option<i32>, demeanor: Option<i32>) -> CreateEvaluationRequest {
        CreateEvaluationRequest {
            no_show: false,
            responsiveness,
            demeanor,
            overall_rating: overall,
        }
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_evaluation_marks_offer_completed() {
        let pool = setup_test_db().await;
        let evaluation_service = EvaluationService::new(pool.clone());
        let offer_service = OfferService::new(pool.clone());

        let trader = register_user(&pool, "trader").await;
        let reviewer = register_user(&pool, "reviewer").await;
        let trade = trade_with_accepted_offer(&pool, trader.id, reviewer.id).await;

        let evaluation = evaluation_service
            .create_evaluation(&trade, trader.id, reviewer.id, rating(4, Some(5), Some(3)))
            .await
            .unwrap();

        assert_eq!(evaluation.trade_id, trade.id);
        assert_eq!(evaluation.trader_id, trader.id);
        assert_eq!(evaluation.reviewer_id, reviewer.id);
        assert_eq!(evaluation.overall_rating, 4);
        assert!(!evaluation.no_show);

        // The winning offer was flipped in the same transaction.
        let offer = offer_service
            .get_offer_for_trade_from_user(trade.id, reviewer.id)
            .await
            .unwrap();
        assert_eq!(offer.status, OfferStatus::Completed);
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_duplicate_evaluation_is_a_conflict() {
        let pool = setup_test_db().await;
        let evaluation_service = EvaluationService::new(pool.clone());

        let trader = register_user(&pool, "trader").await;
        let reviewer = register_user(&pool, "reviewer").await;
        let trade = trade_with_accepted_offer(&pool, trader.id, reviewer.id).await;

        evaluation_service
            .create_evaluation(&trade, trader.id, reviewer.id, rating(3, None, None))
            .await
            .unwrap();

        let err = evaluation_service
            .create_evaluation(&trade, trader.id, reviewer.id, rating(1, None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Conflict(_)));

        // The first evaluation's data is unchanged.
        let evaluation = evaluation_service
            .get_evaluation(trade.id, trader.id)
            .await
            .unwrap();
        assert_eq!(evaluation.overall_rating, 3);
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_only_the_accepted_bidder_may_evaluate() {
        let pool = setup_test_db().await;
        let evaluation_service = EvaluationService::new(pool.clone());
        let offer_service = OfferService::new(pool.clone());

        let trader = register_user(&pool, "trader").await;
        let reviewer = register_user(&pool, "reviewer").await;
        let lurker = register_user(&pool, "lurker").await;
        let trade = trade_with_accepted_offer(&pool, trader.id, reviewer.id).await;

        // A user with no offer at all cannot evaluate.
        let err = evaluation_service
            .create_evaluation(&trade, trader.id, lurker.id, rating(2, None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        // Neither can one whose offer is merely pending.
        offer_service.create_offer(&trade, lurker.id).await.unwrap();
        let err = evaluation_service
            .create_evaluation(&trade, trader.id, lurker.id, rating(2, None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::Forbidden(_)));

        // And an evaluation must target the trade's owner.
        let err = evaluation_service
            .create_evaluation(&trade, lurker.id, reviewer.id, rating(2, None, None))
            .await
            .unwrap_err();
        assert!(matches!(err, ApiError::BadRequest(_)));
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_aggregates_over_a_traders_evaluations() {
        let pool = setup_test_db().await;
        let evaluation_service = EvaluationService::new(pool.clone());
        let stats_service = StatsService::new(pool.clone());

        let trader = register_user(&pool, "trader").await;
        let reviewer = register_user(&pool, "reviewer").await;

        // Three completed trades, three evaluations. Responsiveness is
        // absent on one of them and must not drag the average down.
        let ratings = [
            rating(5, Some(4), Some(5)),
            rating(4, None, Some(3)),
            rating(5, Some(2), None),
        ];
        for request in ratings {
            let trade = trade_with_accepted_offer(&pool, trader.id, reviewer.id).await;
            evaluation_service
                .create_evaluation(&trade, trader.id, reviewer.id, request)
                .await
                .unwrap();
        }

        let aggregate = stats_service
            .get_aggregates_for_trader(trader.id)
            .await
            .unwrap();

        assert_eq!(aggregate.total_evaluations, 3);
        assert_eq!(aggregate.total_no_show, 0);
        assert_eq!(aggregate.max_overall_rating, Some(5));
        assert_eq!(aggregate.min_overall_rating, Some(4));
        assert_eq!(aggregate.five_stars, 2);
        assert_eq!(aggregate.four_stars, 1);
        assert_eq!(aggregate.three_stars, 0);
        assert_eq!(aggregate.two_stars, 0);
        assert_eq!(aggregate.one_stars, 0);

        let avg_overall = aggregate.avg_overall_rating.unwrap();
        assert!((avg_overall - 14.0 / 3.0).abs() < 1e-9);

        let avg_responsiveness = aggregate.avg_responsiveness.unwrap();
        assert!((avg_responsiveness - 3.0).abs() < 1e-9);

        let avg_demeanor = aggregate.avg_demeanor.unwrap();
        assert!((avg_demeanor - 4.0).abs() < 1e-9);
    }

    #[tokio::test]
    #[ignore] // Requires database setup
    async fn test_empty_aggregate_is_not_an_error() {
        let pool = setup_test_db().await;
        let stats_service = StatsService::new(pool.clone());

        let trader = register_user(&pool, "unrated").await;

        let aggregate = stats_service
            .get_aggregates_for_trader(trader.id)
            .await
            .unwrap();

        assert_eq!(aggregate.total_evaluations, 0);
        assert_eq!(aggregate.total_no_show, 0);
        assert!(aggregate.avg_overall_rating.is_none());
        assert!(aggregate.max_overall_rating.is_none());
        assert!(aggregate.min_overall_rating.is_none());
        assert_eq!(aggregate.five_stars, 0);
    }

    #[test]
    fn test_rating_payload_defaults() {
        let request: CreateEvaluationRequest =
            serde_json::from_str(r#"{"overall_rating": 5, "no_show": true}"#).unwrap();
        assert!(request.no_show);
        assert!(request.responsiveness.is_none());
        assert!(request.demeanor.is_none());
    }
}
