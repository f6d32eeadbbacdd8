//! Recommendation Provider: pluggable source of raw recommendation payloads.
//!
//! Default: `LlmRecommendationProvider` (OpenRouter via the shared `LlmClient`).
//! `AppState` carries the engine, which holds an `Arc<dyn RecommendationProvider>`.

use async_trait::async_trait;
use serde_json::Value;
use thiserror::Error;

use crate::llm_client::{LlmClient, LlmError};
use crate::recommendations::models::ProviderRequest;
use crate::recommendations::prompts::{RECOMMENDATION_PROMPT_TEMPLATE, RECOMMENDATION_SYSTEM};

#[derive(Debug, Error)]
pub enum ProviderError {
    #[error("LLM call failed: {0}")]
    Llm(#[from] LlmError),
}

/// Returns the provider's payload as-is. Shape checking is the normalizer's job.
#[async_trait]
pub trait RecommendationProvider: Send + Sync {
    async fn recommend(&self, request: &ProviderRequest) -> Result<Value, ProviderError>;
}

pub struct LlmRecommendationProvider(pub LlmClient);

#[async_trait]
impl RecommendationProvider for LlmRecommendationProvider {
    async fn recommend(&self, request: &ProviderRequest) -> Result<Value, ProviderError> {
        let prompt = build_recommendation_prompt(request);
        Ok(self.0.call_json::<Value>(&prompt, RECOMMENDATION_SYSTEM).await?)
    }
}

fn build_recommendation_prompt(request: &ProviderRequest) -> String {
    RECOMMENDATION_PROMPT_TEMPLATE
        .replace("{full_name}", &request.full_name)
        .replace("{skills}", &request.skills)
        .replace("{experience}", &request.experience)
        .replace("{education}", &request.education)
        .replace("{summary}", &request.summary)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_prompt_carries_every_profile_field() {
        let request = ProviderRequest {
            full_name: "Asha Rao".to_string(),
            skills: "Python, ROS2".to_string(),
            experience: "1y robotics".to_string(),
            education: "BS Mechatronics".to_string(),
            summary: "Loves embedded".to_string(),
        };
        let prompt = build_recommendation_prompt(&request);

        assert!(prompt.contains("Full Name: Asha Rao"));
        assert!(prompt.contains("Skills: Python, ROS2"));
        assert!(prompt.contains("Experience: 1y robotics"));
        assert!(prompt.contains("Education: BS Mechatronics"));
        assert!(prompt.contains("Summary: Loves embedded"));
        assert!(!prompt.contains("{full_name}"));
    }
}
