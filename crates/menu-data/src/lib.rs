//! # Menu Data Crate
//!
//! Domain types and ingestion for dining hall menus and user profiles.
//!
//! ## Main Components
//!
//! - **types**: Core domain types (`UserProfile`, `Goal`, `DietaryTag`,
//!   `Meal`, `DiningHall`, `Menu`)
//! - **parser**: Parse JSON payloads and files into validated structs
//! - **error**: Error types for ingestion and validation
//!
//! All tags are lowercased and trimmed at construction, and goal strings are
//! normalized to the `Goal` enum, so the scoring pipeline downstream never
//! deals with raw caller input.
//!
//! ## Example Usage
//!
//! ```ignore
//! use menu_data::{parser, Goal};
//!
//! let menu = parser::parse_menu(r#"{"John Jay": [{"meal": "Quinoa Salad", "dietary": ["vegan"]}]}"#)?;
//! let profile = parser::parse_profile(r#"{"age": 20, "weight": 150, "goal": "Lose Weight"}"#)?;
//!
//! assert_eq!(profile.goal, Goal::LoseWeight);
//! assert_eq!(menu.hall_count(), 1);
//! ```

// Public modules
pub mod error;
pub mod parser;
pub mod types;

// Re-export commonly used types for convenience
pub use error::{MenuDataError, Result};
pub use types::{DietaryTag, DiningHall, Goal, Meal, Menu, UserProfile};
