use serde::{Deserialize, Serialize};

use crate::models::profile::ProfileRow;

/// Canonical course entry. `tags` is always a single comma-joined string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub title: String,
    pub platform: String,
    pub link: String,
    pub banner_url: String,
    pub tags: String,
}

/// Canonical job entry. `required_skills` is always a single comma-joined string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub company: String,
    pub location: String,
    pub description: String,
    pub required_skills: String,
    pub link: String,
}

/// The `{courses, jobs}` structure returned to clients and stored in the profile cache.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendationSet {
    pub courses: Vec<Course>,
    pub jobs: Vec<Job>,
}

impl RecommendationSet {
    /// `{courses: [], jobs: []}` is what a user without a profile sees.
    pub fn empty() -> Self {
        Self::default()
    }
}

/// The descriptive profile fields sent to the recommendation provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProviderRequest {
    pub full_name: String,
    pub skills: String,
    pub experience: String,
    pub education: String,
    pub summary: String,
}

impl From<&ProfileRow> for ProviderRequest {
    fn from(profile: &ProfileRow) -> Self {
        Self {
            full_name: profile.full_name.clone(),
            skills: profile.skills.clone(),
            experience: profile.experience.clone(),
            education: profile.education.clone(),
            summary: profile.summary.clone().unwrap_or_default(),
        }
    }
}
