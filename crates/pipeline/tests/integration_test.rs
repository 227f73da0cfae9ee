//! Integration tests for the scoring pipeline.
//!
//! These tests verify that the dietary gate, goal transforms, and ranking
//! work together over a realistic menu payload.

use async_trait::async_trait;
use menu_data::{parser, DietaryTag, Goal, UserProfile};
use pipeline::{CalorieEstimator, EstimateError, HallRanker, MealScorer};
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// Deterministic estimator with a per-meal calorie table and a call counter
struct TableEstimator {
    calls: AtomicUsize,
}

impl TableEstimator {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            calls: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl CalorieEstimator for TableEstimator {
    async fn estimate_calories(
        &self,
        meal_name: &str,
        _restrictions: &BTreeSet<DietaryTag>,
    ) -> Result<u32, EstimateError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let calories = match meal_name {
            "Vegan Tofu Bowl" => 380,
            "Chicken Caesar Salad" => 450,
            "Grilled Salmon" => 520,
            "Cheese Pizza" => 700,
            "Quinoa Salad" => 320,
            "Beef Burger" => 850,
            other => {
                return Err(EstimateError::InvalidResponse(format!(
                    "no table entry for {other}"
                )))
            }
        };
        Ok(calories)
    }
}

fn sample_menu() -> menu_data::Menu {
    parser::parse_menu(
        r#"{
            "John Jay": [
                {"meal": "Vegan Tofu Bowl", "dietary": ["vegan", "gluten-free"]},
                {"meal": "Chicken Caesar Salad", "dietary": ["gluten-free"]}
            ],
            "Ferris Booth": [
                {"meal": "Grilled Salmon", "dietary": ["pescatarian", "gluten-free"]},
                {"meal": "Cheese Pizza", "dietary": ["vegetarian"]}
            ],
            "JJ's": [
                {"meal": "Quinoa Salad", "dietary": ["vegan", "gluten-free"]},
                {"meal": "Beef Burger", "dietary": []}
            ]
        }"#,
    )
    .expect("sample menu must parse")
}

fn profile(prefs: &[&str], goal: Goal) -> UserProfile {
    UserProfile {
        age: 20,
        weight: 150.0,
        dietary_preferences: prefs.iter().map(|t| DietaryTag::new(t)).collect(),
        goal,
    }
}

#[tokio::test]
async fn test_vegan_build_muscle_ranking() {
    let estimator = TableEstimator::new();
    let ranker = HallRanker::new(MealScorer::new(estimator.clone()));

    let rankings = ranker
        .rank(
            &sample_menu(),
            &profile(&["vegan", "gluten-free"], Goal::BuildMuscle),
        )
        .await;

    // Only the two vegan + gluten-free meals qualify
    assert_eq!(rankings.len(), 3);
    assert_eq!(rankings[0].dining_hall, "John Jay");
    assert_eq!(rankings[0].score, 380.0);
    assert_eq!(rankings[1].dining_hall, "JJ's");
    assert_eq!(rankings[1].score, 320.0);
    assert_eq!(rankings[2].dining_hall, "Ferris Booth");
    assert_eq!(rankings[2].score, 0.0);

    // The estimator ran only for the two meals that passed the gate
    assert_eq!(estimator.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_lose_weight_prefers_light_halls() {
    let estimator = TableEstimator::new();
    let ranker = HallRanker::new(MealScorer::new(estimator));

    let rankings = ranker
        .rank(&sample_menu(), &profile(&[], Goal::LoseWeight))
        .await;

    // Scores: John Jay (500-380) + (500-450) = 170,
    //         JJ's (500-320) + 0 = 180, Ferris Booth 0 + 0 = 0
    assert_eq!(rankings[0].dining_hall, "JJ's");
    assert_eq!(rankings[0].score, 180.0);
    assert_eq!(rankings[1].dining_hall, "John Jay");
    assert_eq!(rankings[1].score, 170.0);
    assert_eq!(rankings[2].dining_hall, "Ferris Booth");
    assert_eq!(rankings[2].score, 0.0);

    // Beef Burger and Cheese Pizza scored 0, so they are never suggested
    assert!(rankings[0]
        .suggested_meals
        .iter()
        .all(|m| m.meal_name != "Beef Burger"));
}

#[tokio::test]
async fn test_estimator_failure_does_not_cancel_siblings() {
    // "Mystery Stew" is missing from the table, so its lookup fails and the
    // heuristic fills in; the sibling meal keeps its table value
    let menu = parser::parse_menu(
        r#"{
            "Hall": [
                {"meal": "Mystery Stew", "dietary": []},
                {"meal": "Quinoa Salad", "dietary": ["vegan", "gluten-free"]}
            ]
        }"#,
    )
    .unwrap();

    let ranker = HallRanker::new(MealScorer::new(TableEstimator::new()));
    let rankings = ranker.rank(&menu, &profile(&[], Goal::BuildMuscle)).await;

    assert_eq!(rankings.len(), 1);
    assert_eq!(rankings[0].suggested_meals.len(), 2);
    assert_eq!(rankings[0].suggested_meals[0].meal_name, "Mystery Stew");
    // Heuristic default range for an unmatched name
    let stew_calories = rankings[0].suggested_meals[0].calories;
    assert!((350..600).contains(&stew_calories), "got {stew_calories}");
    assert_eq!(rankings[0].suggested_meals[1].calories, 320);
}
