use axum::{
    extract::{Multipart, Path, State},
    http::header,
    response::IntoResponse,
    Json,
};
use serde::Serialize;
use tracing::info;

use crate::auth::extractor::AuthUser;
use crate::errors::AppError;
use crate::models::profile::{ProfileDetails, ProfileRow};
use crate::profile::export::{render_export, ExportFormat, ExportRow};
use crate::profile::resume::{
    extract_text, parse_resume, read_file_field, store_resume, ParsedResume,
};
use crate::profile::store::ProfileMutation;
use crate::state::AppState;

#[derive(Serialize)]
pub struct ResumeUploadResponse {
    pub message: &'static str,
    pub resume_path: String,
}

/// GET /api/v1/profile
pub async fn handle_get_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
) -> Result<Json<ProfileRow>, AppError> {
    let profile = state
        .profiles
        .get_profile(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;
    Ok(Json(profile))
}

/// POST /api/v1/profile
pub async fn handle_upsert_profile(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Json(details): Json<ProfileDetails>,
) -> Result<Json<ProfileRow>, AppError> {
    if let Some(field) = details.missing_required_field() {
        return Err(AppError::Validation(format!("'{field}' is required")));
    }

    let profile = state
        .profiles
        .apply_mutation(user.id, ProfileMutation::Details(details))
        .await?;
    Ok(Json(profile))
}

/// POST /api/v1/profile/resume
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Result<Json<ResumeUploadResponse>, AppError> {
    let file = read_file_field(multipart).await?;
    let resume_path = store_resume(&state.s3, &state.config.s3_bucket, user.id, file).await?;

    state
        .profiles
        .apply_mutation(
            user.id,
            ProfileMutation::Resume {
                resume_path: resume_path.clone(),
                owner_name: user.username,
            },
        )
        .await?;

    Ok(Json(ResumeUploadResponse {
        message: "Resume uploaded successfully",
        resume_path,
    }))
}

/// POST /api/v1/profile/resume/parse
///
/// Returns suggested profile fields; the client decides whether to save them.
pub async fn handle_parse_resume(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    multipart: Multipart,
) -> Result<Json<ParsedResume>, AppError> {
    let file = read_file_field(multipart).await?;
    let text = extract_text(&file).await?;
    let parsed = parse_resume(&text, &state.llm).await?;
    info!("Parsed resume for user {}", user.id);
    Ok(Json(parsed))
}

/// GET /api/v1/export/:format
pub async fn handle_export(
    State(state): State<AppState>,
    AuthUser(user): AuthUser,
    Path(format): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let format: ExportFormat = format.parse()?;
    let profile = state
        .profiles
        .get_profile(user.id)
        .await?
        .ok_or_else(|| AppError::NotFound("Profile not found".to_string()))?;

    let body = render_export(format, &ExportRow::new(&user, &profile))?;
    let disposition = format!("attachment; filename={}", format.file_name());

    Ok((
        [
            (header::CONTENT_TYPE, format.content_type().to_string()),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        body,
    ))
}
