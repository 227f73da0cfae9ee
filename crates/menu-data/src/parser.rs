//! Parsers for menu and profile payloads.
//!
//! Menus and profiles arrive as JSON, either inline (HTTP request bodies) or
//! from files (CLI). Parsing always runs the semantic validation pass so the
//! caller gets one error type for both shape and content problems.

use crate::error::Result;
use crate::types::{Menu, UserProfile};
use std::fs;
use std::path::Path;

/// Parse and validate a menu from a JSON string.
///
/// Accepts both menu wire forms (array of halls, or hall-name object).
pub fn parse_menu(json: &str) -> Result<Menu> {
    let menu: Menu = serde_json::from_str(json)?;
    menu.validate()?;
    Ok(menu)
}

/// Parse a user profile from a JSON string.
pub fn parse_profile(json: &str) -> Result<UserProfile> {
    Ok(serde_json::from_str(json)?)
}

/// Load and validate a menu from a JSON file.
pub fn load_menu(path: &Path) -> Result<Menu> {
    let text = fs::read_to_string(path)?;
    parse_menu(&text)
}

/// Load a user profile from a JSON file.
pub fn load_profile(path: &Path) -> Result<UserProfile> {
    let text = fs::read_to_string(path)?;
    parse_profile(&text)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::MenuDataError;
    use crate::types::Goal;

    #[test]
    fn test_parse_menu_object_form() {
        let menu = parse_menu(
            r#"{
                "John Jay": [
                    {"meal": "Vegan Tofu Bowl", "dietary": ["vegan", "gluten-free"]},
                    {"meal": "Chicken Caesar Salad", "dietary": ["gluten-free"]}
                ],
                "JJ's": [
                    {"meal": "Beef Burger", "dietary": []}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(menu.hall_count(), 2);
        assert_eq!(menu.halls[0].name, "John Jay");
        assert_eq!(menu.halls[0].meals.len(), 2);
    }

    #[test]
    fn test_parse_menu_rejects_empty_meal_name() {
        let err = parse_menu(r#"{"A": [{"meal": "  ", "dietary": []}]}"#).unwrap_err();
        assert!(matches!(err, MenuDataError::Validation(_)));
    }

    #[test]
    fn test_parse_menu_rejects_malformed_json() {
        let err = parse_menu("{not json").unwrap_err();
        assert!(matches!(err, MenuDataError::Json(_)));
    }

    #[test]
    fn test_parse_profile() {
        let profile = parse_profile(
            r#"{
                "age": 20,
                "weight": 150,
                "dietary_preferences": ["Vegan", "gluten-free"],
                "goal": "Build Muscle"
            }"#,
        )
        .unwrap();

        assert_eq!(profile.age, 20);
        assert_eq!(profile.goal, Goal::BuildMuscle);
        assert_eq!(profile.dietary_preferences.len(), 2);
        assert!(profile
            .dietary_preferences
            .iter()
            .any(|t| t.as_str() == "vegan"));
    }

    #[test]
    fn test_parse_profile_missing_field_is_client_error() {
        // age is required; a missing field is a shape error, not a panic
        let err = parse_profile(r#"{"weight": 150}"#).unwrap_err();
        assert!(matches!(err, MenuDataError::Json(_)));
    }
}
