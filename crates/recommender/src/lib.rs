//! Recommender crate for watchlist-based movie suggestions.
//!
//! This crate contains the runner that ties configuration, the watchlist
//! prompt and the generative service together for a single request.

pub mod config;
pub mod report;
pub mod runner;

pub use config::{ConfigError, RunnerConfig, DEFAULT_MODEL};
pub use runner::{
    check_config, run_once, run_structured, RecommendError, RecommendationRunner, RunStatus,
    StructuredFormat,
};
