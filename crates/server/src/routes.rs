//! HTTP surface for the recommender.
//!
//! Thin layer over [`crate::DiningRecommender`]: deserialization,
//! validation, and status mapping. Provider failures only surface on the
//! dedicated `/calories` and `/search` endpoints; `/recommend` always
//! answers 200 with whatever fallbacks were needed.

use std::sync::Arc;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::json;
use thiserror::Error;
use tower_http::trace::TraceLayer;

use menu_data::{Menu, MenuDataError, UserProfile};

use crate::orchestrator::{DiningRecommender, Recommendation};

// ============================================================================
// Error Mapping
// ============================================================================

/// Errors surfaced by the HTTP layer
#[derive(Error, Debug)]
pub enum ApiError {
    /// Malformed or semantically invalid request payload
    #[error("{0}")]
    Validation(String),

    /// Upstream gateway unconfigured or failing, with no fallback defined
    /// at this boundary
    #[error("{0}")]
    Unavailable(String),
}

impl From<MenuDataError> for ApiError {
    fn from(e: MenuDataError) -> Self {
        Self::Validation(e.to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        };
        (status, Json(json!({ "error": self.to_string() }))).into_response()
    }
}

// ============================================================================
// Request / Response Types
// ============================================================================

#[derive(Debug, Deserialize)]
pub struct RecommendRequest {
    pub profile: UserProfile,
    pub dining_halls: Menu,
}

#[derive(Debug, Deserialize)]
pub struct CalorieRequest {
    pub meal_name: String,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CalorieResponse {
    pub estimated_calories: u32,
}

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
    #[serde(default)]
    pub model: Option<String>,
    #[serde(default)]
    pub mcp_servers: Option<Vec<String>>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResponse {
    pub result: String,
}

// ============================================================================
// Router
// ============================================================================

/// Build the application router.
pub fn router(recommender: Arc<DiningRecommender>) -> Router {
    Router::new()
        .route("/healthz", get(handle_healthz))
        .route("/recommend", post(handle_recommend))
        .route("/calories", post(handle_calories))
        .route("/search", post(handle_search))
        .layer(TraceLayer::new_for_http())
        .with_state(recommender)
}

async fn handle_healthz() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

/// Rank the menu and summarize. Degrades internally; never 5xx for
/// provider trouble.
async fn handle_recommend(
    State(recommender): State<Arc<DiningRecommender>>,
    Json(request): Json<RecommendRequest>,
) -> Result<Json<Recommendation>, ApiError> {
    request.dining_halls.validate()?;

    let recommendation = recommender
        .recommend(&request.dining_halls, &request.profile)
        .await;
    Ok(Json(recommendation))
}

/// Direct calorie estimate; 503 when the gateway cannot answer.
async fn handle_calories(
    State(recommender): State<Arc<DiningRecommender>>,
    Json(request): Json<CalorieRequest>,
) -> Result<Json<CalorieResponse>, ApiError> {
    let estimated_calories = recommender
        .estimate_calories(&request.meal_name, &request.dietary_restrictions)
        .await
        .map_err(|e| ApiError::Unavailable(format!("Unable to estimate calories: {e}")))?;

    Ok(Json(CalorieResponse { estimated_calories }))
}

/// Free-text research; 503 when the gateway cannot answer.
async fn handle_search(
    State(recommender): State<Arc<DiningRecommender>>,
    Json(request): Json<SearchRequest>,
) -> Result<Json<SearchResponse>, ApiError> {
    let result = recommender
        .research(
            &request.query,
            request.model.as_deref(),
            request.mcp_servers.as_deref(),
        )
        .await
        .map_err(|e| ApiError::Unavailable(format!("Research request failed: {e}")))?;

    Ok(Json(SearchResponse { result }))
}
