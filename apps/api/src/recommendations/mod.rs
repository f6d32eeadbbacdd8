// Recommendation Cache & Normalization Engine.
// All provider calls go through llm_client; no direct OpenRouter calls here.

pub mod cache_policy;
pub mod engine;
pub mod fallback;
pub mod handlers;
pub mod models;
pub mod normalizer;
pub mod prompts;
pub mod provider;
pub mod refresh_lock;
