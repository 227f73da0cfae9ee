//! # Dining Recommender
//!
//! This module coordinates the recommendation flow:
//! 1. Rank the supplied menu for the user profile
//! 2. Build the nutritionist prompt from profile, scores, and menus
//! 3. Ask the research provider for a prose recommendation
//! 4. Fall back to a templated summary when the provider fails
//!
//! The ranking path never fails because of the provider: calorie lookups
//! degrade to the local heuristic inside the pipeline, and the summary
//! degrades to the template here.

use std::collections::BTreeSet;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use tracing::{info, warn};

use llm_client::{LlmClient, ProviderError};
use menu_data::{DietaryTag, Menu, UserProfile};
use pipeline::{CalorieEstimator, DiningHallRanking, EstimateError, HallRanker, MealScorer};

/// Number of halls included in the templated fallback summary
const FALLBACK_TOP_N: usize = 3;

/// Full recommendation returned to callers
#[derive(Debug, Clone, Serialize)]
pub struct Recommendation {
    pub summary: String,
    pub ranked_halls: Vec<DiningHallRanking>,
}

/// Source of free-text recommendation summaries.
///
/// The gateway implements this in production; tests substitute stubs to
/// exercise the fallback path deterministically.
#[async_trait]
pub trait SummarySource: Send + Sync {
    async fn research(&self, prompt: &str) -> Result<String, ProviderError>;
}

// ============================================================================
// Gateway Adapters
// ============================================================================

/// Calorie estimates via the LLM gateway.
///
/// Converts between the pipeline's tag sets and the client's plain strings,
/// and maps `ProviderError` into the pipeline's `EstimateError` so the
/// scorer stays ignorant of HTTP details.
pub struct GatewayCalorieSource {
    client: Arc<LlmClient>,
}

impl GatewayCalorieSource {
    pub fn new(client: Arc<LlmClient>) -> Self {
        Self { client }
    }
}

#[async_trait]
impl CalorieEstimator for GatewayCalorieSource {
    async fn estimate_calories(
        &self,
        meal_name: &str,
        restrictions: &BTreeSet<DietaryTag>,
    ) -> Result<u32, EstimateError> {
        let restrictions: Vec<String> = restrictions
            .iter()
            .map(|tag| tag.as_str().to_string())
            .collect();

        self.client
            .estimate_calories(meal_name, &restrictions)
            .await
            .map_err(|e| match e {
                ProviderError::Parse(reason) => EstimateError::InvalidResponse(reason),
                other => EstimateError::Unavailable(other.to_string()),
            })
    }
}

/// Summaries via the LLM gateway
struct GatewaySummarySource {
    client: Arc<LlmClient>,
}

#[async_trait]
impl SummarySource for GatewaySummarySource {
    async fn research(&self, prompt: &str) -> Result<String, ProviderError> {
        self.client.research(prompt, None, None).await
    }
}

// ============================================================================
// Orchestrator
// ============================================================================

/// Main orchestrator wiring the scoring pipeline to the LLM gateway
pub struct DiningRecommender {
    ranker: HallRanker,
    summaries: Arc<dyn SummarySource>,
    llm: Arc<LlmClient>,
}

impl DiningRecommender {
    /// Create a recommender backed entirely by the LLM gateway.
    pub fn new(llm: Arc<LlmClient>) -> Self {
        let estimator = Arc::new(GatewayCalorieSource::new(llm.clone()));
        let summaries = Arc::new(GatewaySummarySource {
            client: llm.clone(),
        });
        Self::with_sources(estimator, summaries, llm)
    }

    /// Create a recommender with explicit collaborators.
    ///
    /// Used by tests to substitute deterministic estimators and summary
    /// sources; `llm` still backs the pass-through calorie/research calls.
    pub fn with_sources(
        estimator: Arc<dyn CalorieEstimator>,
        summaries: Arc<dyn SummarySource>,
        llm: Arc<LlmClient>,
    ) -> Self {
        Self {
            ranker: HallRanker::new(MealScorer::new(estimator)),
            summaries,
            llm,
        }
    }

    /// Rank the menu and produce a prose summary.
    pub async fn recommend(&self, menu: &Menu, profile: &UserProfile) -> Recommendation {
        let ranked_halls = self.ranker.rank(menu, profile).await;

        let prompt = recommendation_prompt(profile, &ranked_halls, menu);
        let summary = match self.summaries.research(&prompt).await {
            Ok(text) => {
                info!("Summary produced by the research provider");
                text
            }
            Err(e) => {
                warn!("Research provider failed ({}), using templated summary", e);
                fallback_summary(profile, &ranked_halls)
            }
        };

        Recommendation {
            summary,
            ranked_halls,
        }
    }

    /// Rank without generating a summary.
    pub async fn rank(&self, menu: &Menu, profile: &UserProfile) -> Vec<DiningHallRanking> {
        self.ranker.rank(menu, profile).await
    }

    /// Pass-through calorie estimate for the dedicated endpoint.
    ///
    /// Unlike the ranking path, no fallback applies here: the caller asked
    /// what the gateway says, so provider failures surface.
    pub async fn estimate_calories(
        &self,
        meal_name: &str,
        restrictions: &[String],
    ) -> Result<u32, ProviderError> {
        self.llm.estimate_calories(meal_name, restrictions).await
    }

    /// Pass-through research query for the dedicated endpoint.
    pub async fn research(
        &self,
        query: &str,
        model: Option<&str>,
        mcp_servers: Option<&[String]>,
    ) -> Result<String, ProviderError> {
        self.llm.research(query, model, mcp_servers).await
    }
}

// ============================================================================
// Prompts and Fallback Summary
// ============================================================================

fn recommendation_prompt(
    profile: &UserProfile,
    rankings: &[DiningHallRanking],
    menu: &Menu,
) -> String {
    let profile_json = serde_json::to_string_pretty(profile).unwrap_or_default();
    let rankings_json = serde_json::to_string_pretty(rankings).unwrap_or_default();
    let menu_json = serde_json::to_string_pretty(menu).unwrap_or_default();

    format!(
        "You are a nutritionist AI assistant.\n\n\
         User profile:\n{profile_json}\n\n\
         Pre-scored dining halls (based on calories and dietary restrictions):\n\
         {rankings_json}\n\n\
         Dining hall menus:\n{menu_json}\n\n\
         Task: Recommend the best dining hall for this user based on the \
         precomputed scores, dietary fit, and fitness goal. Explain your \
         reasoning in plain text."
    )
}

/// Templated summary used when the research provider is unavailable.
fn fallback_summary(profile: &UserProfile, rankings: &[DiningHallRanking]) -> String {
    if rankings.is_empty() {
        return "No dining halls were provided, so there is nothing to recommend.".to_string();
    }

    let mut lines = vec![format!(
        "Top dining halls for your goal ({}):",
        profile.goal
    )];
    for (i, ranking) in rankings.iter().take(FALLBACK_TOP_N).enumerate() {
        let meals = if ranking.suggested_meals.is_empty() {
            "no qualifying meals".to_string()
        } else {
            ranking
                .suggested_meals
                .iter()
                .map(|m| m.meal_name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        };
        lines.push(format!(
            "{}. {} (score {:.0}): {}",
            i + 1,
            ranking.dining_hall,
            ranking.score,
            meals
        ));
    }
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use llm_client::LlmConfig;
    use menu_data::{parser, Goal};
    use pipeline::MealScoreResult;

    struct FixedEstimator(u32);

    #[async_trait]
    impl CalorieEstimator for FixedEstimator {
        async fn estimate_calories(
            &self,
            _meal_name: &str,
            _restrictions: &BTreeSet<DietaryTag>,
        ) -> Result<u32, EstimateError> {
            Ok(self.0)
        }
    }

    struct FixedSummary(&'static str);

    #[async_trait]
    impl SummarySource for FixedSummary {
        async fn research(&self, _prompt: &str) -> Result<String, ProviderError> {
            Ok(self.0.to_string())
        }
    }

    struct FailingSummary;

    #[async_trait]
    impl SummarySource for FailingSummary {
        async fn research(&self, _prompt: &str) -> Result<String, ProviderError> {
            Err(ProviderError::Unavailable("no API key".to_string()))
        }
    }

    fn unconfigured_llm() -> Arc<LlmClient> {
        Arc::new(LlmClient::new(LlmConfig::default()).expect("client"))
    }

    fn sample_menu() -> Menu {
        parser::parse_menu(
            r#"{
                "A": [{"meal": "Vegan Salad", "dietary": ["vegan"]}],
                "B": [{"meal": "Beef Burger", "dietary": []}]
            }"#,
        )
        .unwrap()
    }

    fn vegan_profile() -> UserProfile {
        UserProfile {
            age: 20,
            weight: 150.0,
            dietary_preferences: [DietaryTag::new("vegan")].into_iter().collect(),
            goal: Goal::BuildMuscle,
        }
    }

    #[tokio::test]
    async fn test_recommend_uses_provider_summary() {
        let recommender = DiningRecommender::with_sources(
            Arc::new(FixedEstimator(420)),
            Arc::new(FixedSummary("Go to hall A.")),
            unconfigured_llm(),
        );

        let recommendation = recommender
            .recommend(&sample_menu(), &vegan_profile())
            .await;

        assert_eq!(recommendation.summary, "Go to hall A.");
        assert_eq!(recommendation.ranked_halls[0].dining_hall, "A");
        assert_eq!(recommendation.ranked_halls[0].score, 420.0);
        assert_eq!(recommendation.ranked_halls[1].dining_hall, "B");
        assert_eq!(recommendation.ranked_halls[1].score, 0.0);
    }

    #[tokio::test]
    async fn test_recommend_falls_back_when_provider_fails() {
        let recommender = DiningRecommender::with_sources(
            Arc::new(FixedEstimator(420)),
            Arc::new(FailingSummary),
            unconfigured_llm(),
        );

        let recommendation = recommender
            .recommend(&sample_menu(), &vegan_profile())
            .await;

        // Templated summary carries the top hall and its suggested meal
        assert!(recommendation.summary.contains("A"));
        assert!(recommendation.summary.contains("Vegan Salad"));
        assert!(recommendation.summary.contains("Build Muscle"));
    }

    #[test]
    fn test_fallback_summary_top_three_only() {
        let rankings: Vec<DiningHallRanking> = (0..5)
            .map(|i| DiningHallRanking {
                dining_hall: format!("Hall {i}"),
                score: 100.0 - f64::from(i),
                suggested_meals: vec![MealScoreResult {
                    meal_name: format!("Meal {i}"),
                    calories: 400,
                    score: 100.0 - f64::from(i),
                }],
            })
            .collect();

        let summary = fallback_summary(&vegan_profile(), &rankings);
        assert!(summary.contains("Hall 0"));
        assert!(summary.contains("Hall 2"));
        assert!(!summary.contains("Hall 3"));
    }

    #[test]
    fn test_fallback_summary_empty_ranking() {
        let summary = fallback_summary(&vegan_profile(), &[]);
        assert!(summary.contains("nothing to recommend"));
    }
}
