use axum::{extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::auth::extractor::AuthUser;
use crate::auth::password::{hash_password, verify_password};
use crate::auth::token::{issue_token, TokenResponse};
use crate::errors::AppError;
use crate::models::profile::ProfileRow;
use crate::models::user::User;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
}

#[derive(Debug, Deserialize)]
pub struct TokenRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Serialize)]
pub struct MeResponse {
    #[serde(flatten)]
    pub user: User,
    pub profile: Option<ProfileRow>,
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<User>), AppError> {
    let username = req.username.trim().to_string();
    let email = req.email.trim().to_lowercase();
    if username.is_empty() || email.is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "username, email and password are required".to_string(),
        ));
    }

    let taken: Option<(Uuid,)> =
        sqlx::query_as("SELECT id FROM users WHERE username = $1 OR email = $2")
            .bind(&username)
            .bind(&email)
            .fetch_optional(&state.db)
            .await?;
    if taken.is_some() {
        return Err(AppError::Conflict(
            "Username or email already registered".to_string(),
        ));
    }

    // CPU-bound; keep it off the async workers.
    let password = req.password;
    let hashed_password = tokio::task::spawn_blocking(move || hash_password(&password))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password hashing task failed: {e}")))?;

    let user: User = sqlx::query_as(
        r#"
        INSERT INTO users (id, username, email, hashed_password)
        VALUES ($1, $2, $3, $4)
        RETURNING *
        "#,
    )
    .bind(Uuid::new_v4())
    .bind(&username)
    .bind(&email)
    .bind(&hashed_password)
    .fetch_one(&state.db)
    .await
    .map_err(|e| match &e {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::Conflict("Username or email already registered".to_string())
        }
        _ => AppError::Database(e),
    })?;

    info!("Registered user {} ({})", user.username, user.id);
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/auth/token
pub async fn handle_token(
    State(state): State<AppState>,
    Json(req): Json<TokenRequest>,
) -> Result<Json<TokenResponse>, AppError> {
    let user: Option<User> = sqlx::query_as("SELECT * FROM users WHERE username = $1")
        .bind(req.username.trim())
        .fetch_optional(&state.db)
        .await?;

    let user = user.filter(|u| u.is_active).ok_or(AppError::Unauthorized)?;

    let stored = user.hashed_password.clone();
    let password = req.password;
    let valid = tokio::task::spawn_blocking(move || verify_password(&password, &stored))
        .await
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Password check task failed: {e}")))?;
    if !valid {
        return Err(AppError::Unauthorized);
    }

    let token = issue_token(
        user.id,
        &state.config.jwt_secret,
        state.config.token_ttl_minutes,
    )
    .map_err(|e| AppError::Internal(anyhow::anyhow!("Failed to issue token: {e}")))?;

    info!("Issued access token for user {}", user.id);
    Ok(Json(token))
}

/// GET /api/v1/users/me
pub async fn handle_me(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<MeResponse>, AppError> {
    let profile = state.profiles.get_profile(user.id).await?;
    Ok(Json(MeResponse { user, profile }))
}
