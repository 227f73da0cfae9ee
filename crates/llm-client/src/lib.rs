//! LLM gateway client for calorie estimation and research.
//!
//! This crate provides a Rust client for an OpenAI-compatible LLM gateway.
//! It handles:
//! - Connection management and timeouts
//! - The chat-completions wire format (plus the gateway's `mcp_servers`
//!   tool extension)
//! - Normalizing calorie answers into plain integers at the boundary
//! - Error classification (unavailable vs. transport vs. parse)
//!
//! The client is deliberately fallible and side-effect free: a missing API
//! key or a dead gateway produces a `ProviderError`, and the caller decides
//! whether to fall back (ranking path) or surface the failure (dedicated
//! HTTP endpoints).

mod calories;
mod client;
mod config;
mod error;

// Re-export the public surface
pub use client::LlmClient;
pub use config::LlmConfig;
pub use error::ProviderError;
