use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// One row per user. `recommendations` is the serialized cached recommendation set,
/// or `None` when nothing has been generated since the last profile edit.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct ProfileRow {
    pub id: Uuid,
    pub user_id: Uuid,
    pub full_name: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub summary: Option<String>,
    pub resume_path: Option<String>,
    #[serde(skip_serializing)]
    pub recommendations: Option<String>,
    pub phone: Option<String>,
    pub location: Option<String>,
    pub github_url: Option<String>,
    pub linkedin_url: Option<String>,
    pub portfolio_url: Option<String>,
    pub languages: Option<String>,
    pub updated_at: DateTime<Utc>,
}

impl ProfileRow {
    /// A blank profile, used when a resume arrives before any profile was submitted.
    pub fn blank(user_id: Uuid, full_name: &str) -> Self {
        Self {
            id: Uuid::new_v4(),
            user_id,
            full_name: full_name.to_string(),
            skills: String::new(),
            experience: String::new(),
            education: String::new(),
            summary: None,
            resume_path: None,
            recommendations: None,
            phone: None,
            location: None,
            github_url: None,
            linkedin_url: None,
            portfolio_url: None,
            languages: None,
            updated_at: Utc::now(),
        }
    }
}

/// Request body for creating or replacing a profile's descriptive fields.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProfileDetails {
    pub full_name: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    #[serde(default)]
    pub summary: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub github_url: Option<String>,
    #[serde(default)]
    pub linkedin_url: Option<String>,
    #[serde(default)]
    pub portfolio_url: Option<String>,
    #[serde(default)]
    pub languages: Option<String>,
}

impl ProfileDetails {
    /// Returns the first required field that is blank.
    pub fn missing_required_field(&self) -> Option<&'static str> {
        [
            ("full_name", &self.full_name),
            ("skills", &self.skills),
            ("experience", &self.experience),
            ("education", &self.education),
        ]
        .into_iter()
        .find(|(_, value)| value.trim().is_empty())
        .map(|(name, _)| name)
    }
}
