use anyhow::Result;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tracing::info;

/// Creates and returns a PostgreSQL connection pool.
pub async fn create_pool(database_url: &str) -> Result<PgPool> {
    info!("Connecting to PostgreSQL...");

    let pool = PgPoolOptions::new()
        .max_connections(10)
        .connect(database_url)
        .await?;

    info!("PostgreSQL connection pool established");
    Ok(pool)
}

/// Creates the portal tables if they do not exist yet. Safe to run on every start.
pub async fn run_migrations(pool: &PgPool) -> Result<()> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS users (
            id              UUID PRIMARY KEY,
            username        TEXT NOT NULL UNIQUE,
            email           TEXT NOT NULL UNIQUE,
            hashed_password TEXT NOT NULL,
            is_active       BOOLEAN NOT NULL DEFAULT TRUE,
            created_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    // One profile per user; `recommendations` holds the serialized cached set or NULL.
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS profiles (
            id              UUID PRIMARY KEY,
            user_id         UUID NOT NULL UNIQUE REFERENCES users(id),
            full_name       TEXT NOT NULL DEFAULT '',
            skills          TEXT NOT NULL DEFAULT '',
            experience      TEXT NOT NULL DEFAULT '',
            education       TEXT NOT NULL DEFAULT '',
            summary         TEXT,
            resume_path     TEXT,
            recommendations TEXT,
            phone           TEXT,
            location        TEXT,
            github_url      TEXT,
            linkedin_url    TEXT,
            portfolio_url   TEXT,
            languages       TEXT,
            updated_at      TIMESTAMPTZ NOT NULL DEFAULT NOW()
        )
        "#,
    )
    .execute(pool)
    .await?;

    info!("Database schema is up to date");
    Ok(())
}
