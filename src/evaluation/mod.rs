//! Evaluation domain: post-trade ratings and their aggregates

pub mod model;
pub mod service;

pub use model::{CreateEvaluationRequest, Evaluation, EvaluationAggregate};
pub use service::EvaluationService;
