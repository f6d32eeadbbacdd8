mod auth;
mod config;
mod db;
mod errors;
mod llm_client;
mod models;
mod profile;
mod recommendations;
mod routes;
mod state;

use anyhow::Result;
use aws_config::Region;
use aws_sdk_s3::config::Credentials;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::db::{create_pool, run_migrations};
use crate::llm_client::LlmClient;
use crate::profile::store::PgProfileStore;
use crate::recommendations::engine::RecommendationEngine;
use crate::recommendations::provider::LlmRecommendationProvider;
use crate::recommendations::refresh_lock::RedisRefreshLock;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Portal API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize PostgreSQL
    let db = create_pool(&config.database_url).await?;
    run_migrations(&db).await?;

    // Initialize Redis (refresh lock only)
    let redis = redis::Client::open(config.redis_url.clone())?;
    info!("Redis client initialized");

    // Initialize S3 / MinIO
    let s3 = build_s3_client(&config).await;
    info!("S3 client initialized");

    // Initialize LLM client
    let provider_timeout = Duration::from_secs(config.provider_timeout_secs);
    let llm = LlmClient::new(config.openrouter_api_key.clone(), provider_timeout)?;
    info!("LLM client initialized (model: {})", llm_client::MODEL);

    let profiles = Arc::new(PgProfileStore::new(db.clone()));
    let recommendations = Arc::new(RecommendationEngine::new(
        profiles.clone(),
        Arc::new(LlmRecommendationProvider(llm.clone())),
        Arc::new(RedisRefreshLock::new(redis, config.refresh_lock_ttl_secs)),
        provider_timeout,
        tracing::info_span!("recommendation_engine"),
    ));

    // Build app state
    let state = AppState {
        db,
        s3,
        llm,
        config: config.clone(),
        profiles,
        recommendations,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the frontend host is fixed

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

/// Constructs an S3 client configured for MinIO (local) or AWS (production).
async fn build_s3_client(config: &Config) -> aws_sdk_s3::Client {
    let credentials = Credentials::new(
        &config.aws_access_key_id,
        &config.aws_secret_access_key,
        None,
        None,
        "portal-static",
    );

    let s3_config = aws_config::defaults(aws_config::BehaviorVersion::latest())
        .region(Region::new("us-east-1"))
        .credentials_provider(credentials)
        .endpoint_url(&config.s3_endpoint)
        .load()
        .await;

    aws_sdk_s3::Client::new(&s3_config)
}
