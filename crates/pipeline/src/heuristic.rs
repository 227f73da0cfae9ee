//! Local calorie heuristic.
//!
//! Fallback estimator used whenever the remote provider is unavailable or
//! returns something unusable. Intentionally approximate: a keyword lookup
//! picks a calorie range, a uniform draw adds jitter, and dietary
//! restrictions scale the result down.

use menu_data::DietaryTag;
use rand::Rng;
use std::collections::BTreeSet;

/// Keyword table mapping meal-name substrings to calorie ranges.
///
/// Order is part of the contract: the first matching keyword wins, so
/// "chicken salad" hits the salad range, not the chicken one.
const CALORIE_TABLE: &[(&str, (f64, f64))] = &[
    ("salad", (150.0, 350.0)),
    ("burger", (600.0, 900.0)),
    ("chicken", (300.0, 600.0)),
    ("tofu", (200.0, 400.0)),
    ("pasta", (400.0, 700.0)),
    ("pizza", (600.0, 900.0)),
    ("soup", (150.0, 350.0)),
];

/// Range used when no keyword matches
const DEFAULT_RANGE: (f64, f64) = (350.0, 600.0);

/// Multiplier applied when the restrictions include a plant-based diet
const PLANT_BASED_ADJUSTMENT: f64 = 0.85;

/// Multiplier applied when the restrictions include gluten-free
const GLUTEN_FREE_ADJUSTMENT: f64 = 0.95;

/// Estimate calories for a meal using the keyword heuristic.
pub fn estimate(meal_name: &str, restrictions: &BTreeSet<DietaryTag>) -> u32 {
    estimate_with_rng(&mut rand::thread_rng(), meal_name, restrictions)
}

/// Same as [`estimate`], with a caller-supplied RNG for deterministic tests.
pub fn estimate_with_rng<R: Rng + ?Sized>(
    rng: &mut R,
    meal_name: &str,
    restrictions: &BTreeSet<DietaryTag>,
) -> u32 {
    let meal = meal_name.to_lowercase();

    let mut range = DEFAULT_RANGE;
    for (term, keyword_range) in CALORIE_TABLE {
        if meal.contains(term) {
            range = *keyword_range;
            break;
        }
    }

    let mut adjustment = 1.0;
    if restrictions
        .iter()
        .any(|t| t.as_str() == "vegan" || t.as_str() == "vegetarian")
    {
        adjustment *= PLANT_BASED_ADJUSTMENT;
    }
    if restrictions.iter().any(|t| t.as_str() == "gluten-free") {
        adjustment *= GLUTEN_FREE_ADJUSTMENT;
    }

    let (low, high) = range;
    (rng.gen_range(low..high) * adjustment) as u32
}
