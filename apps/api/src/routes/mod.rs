pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::auth::handlers as auth;
use crate::profile::handlers as profile;
use crate::recommendations::handlers as recommendations;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        // Auth
        .route("/api/v1/auth/register", post(auth::handle_register))
        .route("/api/v1/auth/token", post(auth::handle_token))
        .route("/api/v1/users/me", get(auth::handle_me))
        // Profile
        .route(
            "/api/v1/profile",
            get(profile::handle_get_profile).post(profile::handle_upsert_profile),
        )
        .route("/api/v1/profile/resume", post(profile::handle_upload_resume))
        .route(
            "/api/v1/profile/resume/parse",
            post(profile::handle_parse_resume),
        )
        .route("/api/v1/export/:format", get(profile::handle_export))
        // Recommendations
        .route(
            "/api/v1/recommendations",
            get(recommendations::handle_get_recommendations),
        )
        .with_state(state)
}
