use std::sync::Arc;

use aws_sdk_s3::Client as S3Client;
use sqlx::PgPool;

use crate::config::Config;
use crate::llm_client::LlmClient;
use crate::profile::store::ProfileStore;
use crate::recommendations::engine::RecommendationEngine;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub db: PgPool,
    pub s3: S3Client,
    pub llm: LlmClient,
    pub config: Config,
    /// All profile reads and writes go through here.
    pub profiles: Arc<dyn ProfileStore>,
    pub recommendations: Arc<RecommendationEngine>,
}
