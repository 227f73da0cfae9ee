//! Core domain types for menus and user profiles.
//!
//! Everything here is immutable per request: callers supply a `Menu` and a
//! `UserProfile`, the pipeline produces a fresh ranking, and nothing is
//! persisted or shared across requests.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeSet;
use std::fmt;

// =============================================================================
// Dietary Tags
// =============================================================================

/// A normalized dietary tag such as "vegan" or "gluten-free".
///
/// Tags arrive from payloads in mixed case and with stray whitespace. They are
/// lowercased and trimmed once at construction so preference matching is an
/// exact set operation everywhere downstream. `Ord` keeps tag sets iterating
/// in a deterministic order, which matters for prompt building.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct DietaryTag(String);

impl DietaryTag {
    pub fn new(raw: &str) -> Self {
        Self(raw.trim().to_lowercase())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<String> for DietaryTag {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for DietaryTag {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for DietaryTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

// =============================================================================
// Fitness Goal
// =============================================================================

/// Fitness goal selecting the score transform applied to calorie estimates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String")]
pub enum Goal {
    /// Reward higher-calorie meals
    BuildMuscle,
    /// Reward meals under the 500-calorie reference point
    LoseWeight,
    /// Neutral: every qualifying meal scores the same
    #[default]
    MaintainWeight,
}

impl Goal {
    /// Parse a goal string such as `"Build Muscle"` or `"lose_weight"`.
    ///
    /// Matching ignores case and any non-alphanumeric separators. An
    /// unrecognized goal normalizes to `MaintainWeight`, the neutral goal,
    /// so a free-text goal field can never make a request fail.
    pub fn parse(raw: &str) -> Self {
        let key: String = raw
            .chars()
            .filter(char::is_ascii_alphanumeric)
            .collect::<String>()
            .to_lowercase();

        match key.as_str() {
            "buildmuscle" => Self::BuildMuscle,
            "loseweight" => Self::LoseWeight,
            _ => Self::MaintainWeight,
        }
    }
}

impl From<String> for Goal {
    fn from(raw: String) -> Self {
        Self::parse(&raw)
    }
}

impl fmt::Display for Goal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::BuildMuscle => "Build Muscle",
            Self::LoseWeight => "Lose Weight",
            Self::MaintainWeight => "Maintain Weight",
        };
        f.write_str(label)
    }
}

// =============================================================================
// User Profile
// =============================================================================

/// The requesting user's profile.
///
/// `dietary_preferences` is the set of tags a meal must carry to qualify
/// (subset check, not overlap — see [`Meal::satisfies`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub age: u32,
    pub weight: f32,
    #[serde(default)]
    pub dietary_preferences: BTreeSet<DietaryTag>,
    #[serde(default)]
    pub goal: Goal,
}

// =============================================================================
// Meals and Dining Halls
// =============================================================================

/// A single meal on a dining hall's menu.
///
/// Accepts the wire aliases `"meal"` and `"dietary"` used by the original
/// menu payloads alongside the canonical field names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Meal {
    #[serde(alias = "meal")]
    pub name: String,
    #[serde(default, alias = "dietary")]
    pub dietary_tags: BTreeSet<DietaryTag>,
}

impl Meal {
    /// True when every preference is carried by this meal's tags.
    ///
    /// An empty preference set is vacuously satisfied by any meal.
    pub fn satisfies(&self, preferences: &BTreeSet<DietaryTag>) -> bool {
        preferences.is_subset(&self.dietary_tags)
    }
}

/// A dining hall and its menu for the request.
///
/// Meal order is preserved; it determines the order of suggested meals in
/// the ranking output.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiningHall {
    pub name: String,
    #[serde(default)]
    pub meals: Vec<Meal>,
}

// =============================================================================
// Menu
// =============================================================================

/// An ordered collection of dining halls.
///
/// Deserializes from either an array of `{name, meals}` halls or the original
/// object form mapping hall name to meal list. Object key order is preserved
/// (via `IndexMap`) because the ranker's tie-break is "first in the input
/// wins"; serializes as the array form, where order is self-evident.
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "MenuRepr")]
pub struct Menu {
    pub halls: Vec<DiningHall>,
}

impl Menu {
    pub fn hall_count(&self) -> usize {
        self.halls.len()
    }

    pub fn meal_count(&self) -> usize {
        self.halls.iter().map(|h| h.meals.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.halls.is_empty()
    }

    /// Semantic checks that serde's shape checks cannot express.
    pub fn validate(&self) -> crate::Result<()> {
        let mut seen = BTreeSet::new();
        for hall in &self.halls {
            if hall.name.trim().is_empty() {
                return Err(crate::MenuDataError::Validation(
                    "dining hall with empty name".to_string(),
                ));
            }
            if !seen.insert(hall.name.as_str()) {
                return Err(crate::MenuDataError::Validation(format!(
                    "duplicate dining hall: {}",
                    hall.name
                )));
            }
            for meal in &hall.meals {
                if meal.name.trim().is_empty() {
                    return Err(crate::MenuDataError::Validation(format!(
                        "empty meal name in dining hall {}",
                        hall.name
                    )));
                }
            }
        }
        Ok(())
    }
}

impl Serialize for Menu {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.halls.serialize(serializer)
    }
}

/// Wire representations accepted for a menu
#[derive(Deserialize)]
#[serde(untagged)]
enum MenuRepr {
    Halls(Vec<DiningHall>),
    ByName(IndexMap<String, Vec<Meal>>),
}

impl From<MenuRepr> for Menu {
    fn from(repr: MenuRepr) -> Self {
        let halls = match repr {
            MenuRepr::Halls(halls) => halls,
            MenuRepr::ByName(by_name) => by_name
                .into_iter()
                .map(|(name, meals)| DiningHall { name, meals })
                .collect(),
        };
        Self { halls }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dietary_tag_normalization() {
        assert_eq!(DietaryTag::new("  Vegan ").as_str(), "vegan");
        assert_eq!(DietaryTag::new("GLUTEN-FREE").as_str(), "gluten-free");
        assert_eq!(DietaryTag::new("vegan"), DietaryTag::new("Vegan"));
    }

    #[test]
    fn test_goal_parse_variants() {
        assert_eq!(Goal::parse("Build Muscle"), Goal::BuildMuscle);
        assert_eq!(Goal::parse("build_muscle"), Goal::BuildMuscle);
        assert_eq!(Goal::parse("LOSE-WEIGHT"), Goal::LoseWeight);
        assert_eq!(Goal::parse("maintain weight"), Goal::MaintainWeight);
    }

    #[test]
    fn test_goal_parse_unrecognized_is_neutral() {
        assert_eq!(Goal::parse("get swole"), Goal::MaintainWeight);
        assert_eq!(Goal::parse(""), Goal::MaintainWeight);
    }

    #[test]
    fn test_meal_satisfies_subset() {
        let meal: Meal = serde_json::from_str(
            r#"{"meal": "Vegan Tofu Bowl", "dietary": ["Vegan", "gluten-free"]}"#,
        )
        .unwrap();

        let prefs: BTreeSet<DietaryTag> = ["vegan"].iter().map(|t| DietaryTag::new(t)).collect();
        assert!(meal.satisfies(&prefs));

        let prefs: BTreeSet<DietaryTag> = ["vegan", "nut-free"]
            .iter()
            .map(|t| DietaryTag::new(t))
            .collect();
        assert!(!meal.satisfies(&prefs));

        // Empty preferences qualify every meal
        assert!(meal.satisfies(&BTreeSet::new()));
    }

    #[test]
    fn test_menu_object_form_preserves_order() {
        let json = r#"{
            "John Jay": [{"meal": "Vegan Tofu Bowl", "dietary": ["vegan"]}],
            "Ferris Booth": [{"meal": "Cheese Pizza", "dietary": ["vegetarian"]}],
            "JJ's": []
        }"#;

        let menu: Menu = serde_json::from_str(json).unwrap();
        let names: Vec<_> = menu.halls.iter().map(|h| h.name.as_str()).collect();
        assert_eq!(names, vec!["John Jay", "Ferris Booth", "JJ's"]);
    }

    #[test]
    fn test_menu_array_form() {
        let json = r#"[
            {"name": "A", "meals": [{"name": "Soup", "dietary_tags": []}]},
            {"name": "B", "meals": []}
        ]"#;

        let menu: Menu = serde_json::from_str(json).unwrap();
        assert_eq!(menu.hall_count(), 2);
        assert_eq!(menu.meal_count(), 1);
        assert_eq!(menu.halls[0].meals[0].name, "Soup");
    }

    #[test]
    fn test_menu_serializes_as_array() {
        let menu: Menu = serde_json::from_str(r#"{"A": [], "B": []}"#).unwrap();
        let round_tripped: Menu =
            serde_json::from_str(&serde_json::to_string(&menu).unwrap()).unwrap();
        assert_eq!(round_tripped.hall_count(), 2);
        assert_eq!(round_tripped.halls[0].name, "A");
    }

    #[test]
    fn test_menu_validate_rejects_duplicates() {
        let menu: Menu = serde_json::from_str(
            r#"[{"name": "A", "meals": []}, {"name": "A", "meals": []}]"#,
        )
        .unwrap();
        assert!(menu.validate().is_err());
    }
}
