use anyhow::{ensure, Context, Result};

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub redis_url: String,
    pub s3_bucket: String,
    pub s3_endpoint: String,
    pub aws_access_key_id: String,
    pub aws_secret_access_key: String,
    pub openrouter_api_key: String,
    pub jwt_secret: String,
    pub port: u16,
    pub rust_log: String,
    /// Upper bound on a single recommendation provider call, retries included.
    pub provider_timeout_secs: u64,
    pub token_ttl_minutes: i64,
    pub refresh_lock_ttl_secs: u64,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let config = Config {
            database_url: require_env("DATABASE_URL")?,
            redis_url: require_env("REDIS_URL")?,
            s3_bucket: require_env("S3_BUCKET")?,
            s3_endpoint: require_env("S3_ENDPOINT")?,
            aws_access_key_id: require_env("AWS_ACCESS_KEY_ID")?,
            aws_secret_access_key: require_env("AWS_SECRET_ACCESS_KEY")?,
            openrouter_api_key: require_env("OPENROUTER_API_KEY")?,
            jwt_secret: require_env("JWT_SECRET")?,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            provider_timeout_secs: parse_env("PROVIDER_TIMEOUT_SECS", 60)?,
            token_ttl_minutes: parse_env("TOKEN_TTL_MINUTES", 30)?,
            refresh_lock_ttl_secs: parse_env("REFRESH_LOCK_TTL_SECS", 90)?,
        };
        check_refresh_lock_ttl(config.refresh_lock_ttl_secs, config.provider_timeout_secs)?;
        Ok(config)
    }
}

/// The refresh lock must outlive the provider call it guards.
fn check_refresh_lock_ttl(lock_ttl_secs: u64, provider_timeout_secs: u64) -> Result<()> {
    ensure!(
        lock_ttl_secs > provider_timeout_secs,
        "REFRESH_LOCK_TTL_SECS ({lock_ttl_secs}) must be greater than PROVIDER_TIMEOUT_SECS ({provider_timeout_secs})"
    );
    Ok(())
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}
