//! DineRecs HTTP server binary.
//!
//! Reads gateway configuration from the environment once at startup, builds
//! the recommender, and serves the axum router. A missing LLM API key is not
//! fatal: ranking degrades to the local heuristic and templated summaries.

use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::{info, warn};

use llm_client::LlmClient;
use server::{router, DiningRecommender};

/// Environment variable for the listen address
const ADDR_ENV: &str = "DINE_RECS_ADDR";

/// Default listen address
const DEFAULT_ADDR: &str = "127.0.0.1:8000";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let llm = Arc::new(LlmClient::from_env().context("Failed to build LLM client")?);
    if !llm.is_configured() {
        warn!(
            "No LLM API key configured; calorie estimates use the local \
             heuristic and summaries use the template"
        );
    }

    let recommender = Arc::new(DiningRecommender::new(llm));

    let addr = std::env::var(ADDR_ENV).unwrap_or_else(|_| DEFAULT_ADDR.to_string());
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind {addr}"))?;
    info!("DineRecs server listening on {}", addr);

    axum::serve(listener, router(recommender))
        .await
        .context("Server failed")?;

    Ok(())
}
