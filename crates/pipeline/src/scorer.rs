//! Meal scoring: dietary gate, calorie estimation, goal transform.

use crate::heuristic;
use crate::traits::CalorieEstimator;
use menu_data::{Goal, Meal, UserProfile};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{debug, warn};

/// Calorie reference point for the weight-loss transform
const LOSE_WEIGHT_REFERENCE: f64 = 500.0;

/// Flat score for any qualifying meal under a neutral goal
const MAINTAIN_SCORE: f64 = 100.0;

/// Score and calorie evidence for one qualifying meal
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MealScoreResult {
    pub meal_name: String,
    pub calories: u32,
    pub score: f64,
}

/// Scores a single meal against a user profile.
///
/// ## Algorithm
/// 1. Dietary gate: every preference tag must appear on the meal, or the
///    meal scores zero and the estimator is never consulted
/// 2. Calorie estimation via the configured [`CalorieEstimator`]
/// 3. Goal transform: calories become a non-negative score
pub struct MealScorer {
    estimator: Arc<dyn CalorieEstimator>,
}

impl MealScorer {
    pub fn new(estimator: Arc<dyn CalorieEstimator>) -> Self {
        Self { estimator }
    }

    /// Score one meal. Returns `None` when the dietary gate fails.
    ///
    /// Estimator failures never propagate: the local heuristic substitutes
    /// an estimate and scoring continues, so one bad lookup cannot sink a
    /// ranking request or its sibling lookups.
    pub async fn score_meal(&self, meal: &Meal, profile: &UserProfile) -> Option<MealScoreResult> {
        // Dietary gate: skip the external call entirely on a miss
        if !meal.satisfies(&profile.dietary_preferences) {
            debug!("Meal '{}' fails dietary gate, score 0", meal.name);
            return None;
        }

        let calories = match self
            .estimator
            .estimate_calories(&meal.name, &profile.dietary_preferences)
            .await
        {
            Ok(calories) => calories,
            Err(e) => {
                warn!(
                    "Calorie estimate for '{}' failed ({}), using local heuristic",
                    meal.name, e
                );
                heuristic::estimate(&meal.name, &profile.dietary_preferences)
            }
        };

        let score = goal_score(profile.goal, calories);
        debug!("Meal '{}': {} cal, score {:.1}", meal.name, calories, score);

        Some(MealScoreResult {
            meal_name: meal.name.clone(),
            calories,
            score,
        })
    }
}

/// Transform a calorie estimate into a score for the given goal.
///
/// Scores are always non-negative:
/// - `BuildMuscle` rewards calories directly
/// - `LoseWeight` rewards being under the 500-calorie reference, floored at 0
/// - `MaintainWeight` scores every qualifying meal a flat 100
pub fn goal_score(goal: Goal, calories: u32) -> f64 {
    match goal {
        Goal::BuildMuscle => f64::from(calories),
        Goal::LoseWeight => (LOSE_WEIGHT_REFERENCE - f64::from(calories)).max(0.0),
        Goal::MaintainWeight => MAINTAIN_SCORE,
    }
}
