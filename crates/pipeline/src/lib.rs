//! Pipeline for scoring meals and ranking dining halls.
//!
//! This crate provides:
//! - CalorieEstimator trait: the seam to whatever supplies calorie numbers
//! - MealScorer: dietary gate, calorie estimation, goal transform
//! - HallRanker: per-hall aggregation and stable descending sort
//! - heuristic: the local fallback calorie estimator
//!
//! ## Architecture
//! The ranker drives everything:
//! 1. Every hall is scored independently (concurrently)
//! 2. Within a hall, every meal is scored independently (concurrently)
//! 3. A meal that fails the dietary gate scores 0 without any external call
//! 4. Estimator failures degrade to the local heuristic in isolation
//! 5. Halls sort by total score descending; ties keep input order
//!
//! ## Example Usage
//! ```ignore
//! use pipeline::{HallRanker, MealScorer};
//! use std::sync::Arc;
//!
//! let scorer = MealScorer::new(Arc::new(estimator));
//! let ranker = HallRanker::new(scorer);
//!
//! let rankings = ranker.rank(&menu, &profile).await;
//! for ranking in &rankings {
//!     println!("{}: {:.1}", ranking.dining_hall, ranking.score);
//! }
//! ```

pub mod heuristic;
pub mod ranker;
pub mod scorer;
pub mod traits;

// Re-export main types
pub use ranker::{DiningHallRanking, HallRanker};
pub use scorer::{goal_score, MealScoreResult, MealScorer};
pub use traits::{CalorieEstimator, EstimateError};
