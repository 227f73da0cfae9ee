//! Core trait for calorie estimation.
//!
//! This module defines the seam between the deterministic scoring pipeline
//! and whatever supplies calorie numbers — the LLM gateway in production,
//! cheap stubs in tests.

use async_trait::async_trait;
use menu_data::DietaryTag;
use std::collections::BTreeSet;
use thiserror::Error;

/// Errors a calorie estimator can surface.
///
/// Both variants are recoverable at the scoring call site: the scorer logs
/// the failure and substitutes the local heuristic estimate. Nothing here
/// ever fails a ranking request.
#[derive(Error, Debug)]
pub enum EstimateError {
    /// Provider cannot serve requests (missing credential, network failure,
    /// timeout)
    #[error("calorie provider unavailable: {0}")]
    Unavailable(String),

    /// Provider responded, but not with anything containing a calorie count
    #[error("invalid calorie response: {0}")]
    InvalidResponse(String),
}

/// Source of calorie estimates for meals.
///
/// ## Design Note
/// - `Send + Sync` so a single estimator can serve concurrent per-meal
///   lookups
/// - Returns a plain `u32` calorie count, normalized by the implementor —
///   callers never re-interpret provider response shapes
#[async_trait]
pub trait CalorieEstimator: Send + Sync {
    /// Estimate calories for a single serving of `meal_name` prepared under
    /// the given dietary restrictions.
    async fn estimate_calories(
        &self,
        meal_name: &str,
        restrictions: &BTreeSet<DietaryTag>,
    ) -> Result<u32, EstimateError>;
}
