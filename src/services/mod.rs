//! Derived-read-model services

pub mod stats;

pub use stats::StatsService;
