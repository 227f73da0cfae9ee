//! Dining hall ranking: aggregate meal scores per hall and sort.

use crate::scorer::{MealScoreResult, MealScorer};
use futures_util::future;
use menu_data::{DiningHall, Menu, UserProfile};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use tracing::{debug, info};

/// One hall's position in the ranking
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningHallRanking {
    pub dining_hall: String,
    /// Sum of all qualifying meal scores; 0 when nothing qualifies
    pub score: f64,
    /// Meals with score > 0, in original menu order
    pub suggested_meals: Vec<MealScoreResult>,
}

/// Ranks dining halls for a user profile.
///
/// Halls are scored independently of each other — no cross-hall comparison
/// influences an individual meal's score — which is what lets both levels
/// fan out concurrently.
pub struct HallRanker {
    scorer: MealScorer,
}

impl HallRanker {
    pub fn new(scorer: MealScorer) -> Self {
        Self { scorer }
    }

    /// Score every hall and return them sorted by score, highest first.
    ///
    /// Per-meal calorie lookups run concurrently per hall and per meal, but
    /// results aggregate in original meal order within each hall. The
    /// descending sort is stable, so halls with equal scores keep their
    /// input order.
    pub async fn rank(&self, menu: &Menu, profile: &UserProfile) -> Vec<DiningHallRanking> {
        let mut rankings = future::join_all(
            menu.halls
                .iter()
                .map(|hall| self.score_hall(hall, profile)),
        )
        .await;

        rankings.sort_by(|a, b| b.score.partial_cmp(&a.score).unwrap_or(Ordering::Equal));

        info!(
            "Ranked {} dining halls for goal '{}'",
            rankings.len(),
            profile.goal
        );
        rankings
    }

    /// Score all meals in one hall and aggregate.
    async fn score_hall(&self, hall: &DiningHall, profile: &UserProfile) -> DiningHallRanking {
        let results = future::join_all(
            hall.meals
                .iter()
                .map(|meal| self.scorer.score_meal(meal, profile)),
        )
        .await;

        let mut hall_score = 0.0;
        let mut suggested_meals = Vec::new();
        // join_all preserves input order, so suggestions stay in menu order
        for result in results.into_iter().flatten() {
            hall_score += result.score;
            if result.score > 0.0 {
                suggested_meals.push(result);
            }
        }

        debug!(
            "Hall '{}': score {:.1}, {} suggested meals",
            hall.name,
            hall_score,
            suggested_meals.len()
        );

        DiningHallRanking {
            dining_hall: hall.name.clone(),
            score: hall_score,
            suggested_meals,
        }
    }
}
