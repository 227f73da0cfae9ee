//! Server crate for the DineRecs recommendation engine.
//!
//! This crate contains the orchestrator that wires the scoring pipeline to
//! the LLM gateway, plus the axum HTTP surface exposing it.

pub mod orchestrator;
pub mod routes;

pub use orchestrator::{DiningRecommender, GatewayCalorieSource, Recommendation, SummarySource};
pub use routes::{router, ApiError};
