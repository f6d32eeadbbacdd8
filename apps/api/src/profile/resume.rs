//! Resume storage and LLM-assisted profile extraction.

use aws_sdk_s3::primitives::ByteStream;
use axum::extract::Multipart;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::prompts::JSON_ONLY_SYSTEM;
use crate::llm_client::LlmClient;
use crate::profile::prompts::RESUME_PARSE_PROMPT_TEMPLATE;

/// Resume text beyond this many characters is not sent to the LLM.
const MAX_RESUME_CHARS: usize = 20_000;

pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    fn is_pdf(&self) -> bool {
        self.content_type.as_deref() == Some("application/pdf")
            || self.file_name.to_ascii_lowercase().ends_with(".pdf")
    }
}

/// Profile fields suggested by the LLM from resume text. Nothing is persisted.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ParsedResume {
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub skills: String,
    #[serde(default)]
    pub experience: String,
    #[serde(default)]
    pub education: String,
    #[serde(default)]
    pub summary: String,
}

/// Reads the multipart field named `file`.
pub async fn read_file_field(mut multipart: Multipart) -> Result<UploadedFile, AppError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }
        let file_name = sanitize_file_name(field.file_name().unwrap_or("resume"));
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::Validation(format!("Failed to read upload: {e}")))?;
        if bytes.is_empty() {
            return Err(AppError::Validation("Uploaded file is empty".to_string()));
        }
        return Ok(UploadedFile {
            file_name,
            content_type,
            bytes,
        });
    }
    Err(AppError::Validation("Missing 'file' field".to_string()))
}

/// Keeps only the final path component and replaces anything outside `[A-Za-z0-9._-]`.
pub fn sanitize_file_name(raw: &str) -> String {
    let base = raw.rsplit(['/', '\\']).next().unwrap_or(raw);
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .collect();
    let cleaned = cleaned.trim_start_matches('.').to_string();
    if cleaned.is_empty() {
        "resume".to_string()
    } else {
        cleaned
    }
}

pub fn resume_key(user_id: Uuid, file_name: &str) -> String {
    format!("resumes/{user_id}/{file_name}")
}

/// Uploads the resume and returns its object key.
pub async fn store_resume(
    s3: &aws_sdk_s3::Client,
    bucket: &str,
    user_id: Uuid,
    file: UploadedFile,
) -> Result<String, AppError> {
    let key = resume_key(user_id, &file.file_name);
    let content_type = file
        .content_type
        .clone()
        .unwrap_or_else(|| "application/octet-stream".to_string());

    s3.put_object()
        .bucket(bucket)
        .key(&key)
        .body(ByteStream::from(file.bytes))
        .content_type(content_type)
        .send()
        .await
        .map_err(|e| AppError::S3(format!("Resume upload failed: {e}")))?;

    info!("Uploaded resume to s3://{}/{}", bucket, key);
    Ok(key)
}

/// Extracts plain text from a PDF or UTF-8 upload.
pub async fn extract_text(file: &UploadedFile) -> Result<String, AppError> {
    let text = if file.is_pdf() {
        let bytes = file.bytes.clone();
        tokio::task::spawn_blocking(move || pdf_extract::extract_text_from_mem(&bytes))
            .await
            .map_err(|e| AppError::Internal(anyhow::anyhow!("PDF extraction task failed: {e}")))?
            .map_err(|e| AppError::Validation(format!("Could not read PDF: {e}")))?
    } else {
        String::from_utf8(file.bytes.to_vec()).map_err(|_| {
            AppError::Validation("Resume must be a PDF or UTF-8 text file".to_string())
        })?
    };

    let text = text.trim();
    if text.is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the resume".to_string(),
        ));
    }
    Ok(text.chars().take(MAX_RESUME_CHARS).collect())
}

pub async fn parse_resume(text: &str, llm: &LlmClient) -> Result<ParsedResume, AppError> {
    let prompt = RESUME_PARSE_PROMPT_TEMPLATE.replace("{resume_text}", text);
    llm.call_json::<ParsedResume>(&prompt, JSON_ONLY_SYSTEM)
        .await
        .map_err(|e| AppError::Llm(format!("Resume parsing failed: {e}")))
}
