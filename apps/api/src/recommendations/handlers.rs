use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use crate::auth::extractor::AuthUser;
use crate::recommendations::models::RecommendationSet;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct RecommendationsQuery {
    #[serde(default)]
    pub refresh: bool,
}

/// GET /api/v1/recommendations?refresh=false
///
/// Never fails once authenticated; the worst case is the built-in fallback set.
pub async fn handle_get_recommendations(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Query(params): Query<RecommendationsQuery>,
) -> Json<RecommendationSet> {
    Json(
        state
            .recommendations
            .get_recommendations(user.id, params.refresh)
            .await,
    )
}
