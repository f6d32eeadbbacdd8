//! Profile Store: one profile row per user.
//!
//! Every edit goes through [`ProfileMutation::apply_to`], which is the only place a
//! profile's descriptive fields or resume reference change. It clears the cached
//! recommendations in the same write, so a stale set can never outlive an edit.

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::info;
use uuid::Uuid;

use crate::models::profile::{ProfileDetails, ProfileRow};

/// An edit to a profile. Applying any variant invalidates the recommendation cache.
#[derive(Debug, Clone)]
pub enum ProfileMutation {
    /// Replace the descriptive and contact fields.
    Details(ProfileDetails),
    /// Point the profile at a newly uploaded resume. `owner_name` seeds `full_name`
    /// when the profile does not exist yet.
    Resume {
        resume_path: String,
        owner_name: String,
    },
}

impl ProfileMutation {
    /// Produces the full record to write back: the existing row (or a new one) with the
    /// mutation applied and `recommendations` reset to absent.
    pub fn apply_to(self, user_id: Uuid, existing: Option<ProfileRow>) -> ProfileRow {
        let mut profile = match (existing, &self) {
            (Some(profile), _) => profile,
            (None, ProfileMutation::Details(details)) => {
                ProfileRow::blank(user_id, &details.full_name)
            }
            (None, ProfileMutation::Resume { owner_name, .. }) => {
                ProfileRow::blank(user_id, owner_name)
            }
        };

        match self {
            ProfileMutation::Details(details) => {
                profile.full_name = details.full_name;
                profile.skills = details.skills;
                profile.experience = details.experience;
                profile.education = details.education;
                profile.summary = details.summary;
                profile.phone = details.phone;
                profile.location = details.location;
                profile.github_url = details.github_url;
                profile.linkedin_url = details.linkedin_url;
                profile.portfolio_url = details.portfolio_url;
                profile.languages = details.languages;
            }
            ProfileMutation::Resume { resume_path, .. } => {
                profile.resume_path = Some(resume_path);
            }
        }

        profile.recommendations = None;
        profile.updated_at = Utc::now();
        profile
    }
}

#[async_trait]
pub trait ProfileStore: Send + Sync {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>>;

    /// Applies an edit and returns the stored row. Always clears cached recommendations.
    async fn apply_mutation(&self, user_id: Uuid, mutation: ProfileMutation)
        -> Result<ProfileRow>;

    /// Stores a serialized recommendation set in a single-row update, only if the
    /// profile is still the revision stamped `read_at`. Returns `false` when the
    /// profile was edited in the meantime and nothing was written.
    async fn save_recommendations(
        &self,
        user_id: Uuid,
        read_at: DateTime<Utc>,
        payload: &str,
    ) -> Result<bool>;
}

pub struct PgProfileStore {
    pool: PgPool,
}

impl PgProfileStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProfileStore for PgProfileStore {
    async fn get_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>> {
        Ok(
            sqlx::query_as::<_, ProfileRow>("SELECT * FROM profiles WHERE user_id = $1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?,
        )
    }

    async fn apply_mutation(
        &self,
        user_id: Uuid,
        mutation: ProfileMutation,
    ) -> Result<ProfileRow> {
        let mut tx = self.pool.begin().await?;

        let existing: Option<ProfileRow> =
            sqlx::query_as("SELECT * FROM profiles WHERE user_id = $1 FOR UPDATE")
                .bind(user_id)
                .fetch_optional(&mut *tx)
                .await?;

        let profile = mutation.apply_to(user_id, existing);

        // Whole-record upsert; `recommendations` is written as NULL by apply_to.
        let stored: ProfileRow = sqlx::query_as(
            r#"
            INSERT INTO profiles
                (id, user_id, full_name, skills, experience, education, summary,
                 resume_path, recommendations, phone, location, github_url,
                 linkedin_url, portfolio_url, languages, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
            ON CONFLICT (user_id) DO UPDATE SET
                full_name = EXCLUDED.full_name,
                skills = EXCLUDED.skills,
                experience = EXCLUDED.experience,
                education = EXCLUDED.education,
                summary = EXCLUDED.summary,
                resume_path = EXCLUDED.resume_path,
                recommendations = EXCLUDED.recommendations,
                phone = EXCLUDED.phone,
                location = EXCLUDED.location,
                github_url = EXCLUDED.github_url,
                linkedin_url = EXCLUDED.linkedin_url,
                portfolio_url = EXCLUDED.portfolio_url,
                languages = EXCLUDED.languages,
                updated_at = EXCLUDED.updated_at
            RETURNING *
            "#,
        )
        .bind(profile.id)
        .bind(profile.user_id)
        .bind(&profile.full_name)
        .bind(&profile.skills)
        .bind(&profile.experience)
        .bind(&profile.education)
        .bind(&profile.summary)
        .bind(&profile.resume_path)
        .bind(&profile.recommendations)
        .bind(&profile.phone)
        .bind(&profile.location)
        .bind(&profile.github_url)
        .bind(&profile.linkedin_url)
        .bind(&profile.portfolio_url)
        .bind(&profile.languages)
        .bind(profile.updated_at)
        .fetch_one(&mut *tx)
        .await?;

        tx.commit().await?;

        info!("Saved profile for user {user_id}; recommendation cache cleared");
        Ok(stored)
    }

    async fn save_recommendations(
        &self,
        user_id: Uuid,
        read_at: DateTime<Utc>,
        payload: &str,
    ) -> Result<bool> {
        let result = sqlx::query(
            "UPDATE profiles SET recommendations = $1 WHERE user_id = $2 AND updated_at = $3",
        )
        .bind(payload)
        .bind(user_id)
        .bind(read_at)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() == 1)
    }
}

#[cfg(test)]
pub mod memory {
    //! In-process store with the same mutation semantics as `PgProfileStore`.

    use std::collections::HashMap;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
    use std::sync::Mutex;

    use super::*;

    #[derive(Default)]
    pub struct InMemoryProfileStore {
        profiles: Mutex<HashMap<Uuid, ProfileRow>>,
        pub fail_saves: AtomicBool,
        pub saves: AtomicUsize,
    }

    impl InMemoryProfileStore {
        pub fn insert(&self, profile: ProfileRow) {
            self.profiles.lock().unwrap().insert(profile.user_id, profile);
        }

        pub fn cached_payload(&self, user_id: Uuid) -> Option<String> {
            self.profiles
                .lock()
                .unwrap()
                .get(&user_id)
                .and_then(|p| p.recommendations.clone())
        }
    }

    #[async_trait]
    impl ProfileStore for InMemoryProfileStore {
        async fn get_profile(&self, user_id: Uuid) -> Result<Option<ProfileRow>> {
            Ok(self.profiles.lock().unwrap().get(&user_id).cloned())
        }

        async fn apply_mutation(
            &self,
            user_id: Uuid,
            mutation: ProfileMutation,
        ) -> Result<ProfileRow> {
            let mut profiles = self.profiles.lock().unwrap();
            let profile = mutation.apply_to(user_id, profiles.remove(&user_id));
            profiles.insert(user_id, profile.clone());
            Ok(profile)
        }

        async fn save_recommendations(
            &self,
            user_id: Uuid,
            read_at: DateTime<Utc>,
            payload: &str,
        ) -> Result<bool> {
            if self.fail_saves.load(Ordering::SeqCst) {
                return Err(anyhow!("store rejected the write"));
            }
            let mut profiles = self.profiles.lock().unwrap();
            match profiles.get_mut(&user_id) {
                Some(profile) if profile.updated_at == read_at => {
                    profile.recommendations = Some(payload.to_string());
                    self.saves.fetch_add(1, Ordering::SeqCst);
                    Ok(true)
                }
                _ => Ok(false),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn details(full_name: &str) -> ProfileDetails {
        ProfileDetails {
            full_name: full_name.to_string(),
            skills: "Python".to_string(),
            experience: "1y".to_string(),
            education: "BS".to_string(),
            summary: Some("s".to_string()),
            phone: None,
            location: Some("Pune".to_string()),
            github_url: None,
            linkedin_url: None,
            portfolio_url: None,
            languages: None,
        }
    }

    fn cached_profile(user_id: Uuid) -> ProfileRow {
        let mut profile = ProfileRow::blank(user_id, "A");
        profile.recommendations = Some("{\"courses\":[],\"jobs\":[]}".to_string());
        profile.resume_path = Some("resumes/old.pdf".to_string());
        profile
    }

    #[test]
    fn test_details_edit_clears_cache_and_keeps_identity() {
        let user_id = Uuid::new_v4();
        let existing = cached_profile(user_id);
        let id = existing.id;

        let updated = ProfileMutation::Details(details("B")).apply_to(user_id, Some(existing));

        assert_eq!(updated.id, id);
        assert_eq!(updated.full_name, "B");
        assert_eq!(updated.location.as_deref(), Some("Pune"));
        assert_eq!(updated.resume_path.as_deref(), Some("resumes/old.pdf"));
        assert!(updated.recommendations.is_none());
    }

    #[test]
    fn test_resume_edit_clears_cache() {
        let user_id = Uuid::new_v4();
        let updated = ProfileMutation::Resume {
            resume_path: "resumes/new.pdf".to_string(),
            owner_name: "ignored".to_string(),
        }
        .apply_to(user_id, Some(cached_profile(user_id)));

        assert_eq!(updated.resume_path.as_deref(), Some("resumes/new.pdf"));
        assert_eq!(updated.full_name, "A");
        assert!(updated.recommendations.is_none());
    }

    #[test]
    fn test_resume_before_profile_creates_blank_profile() {
        let user_id = Uuid::new_v4();
        let created = ProfileMutation::Resume {
            resume_path: "resumes/cv.pdf".to_string(),
            owner_name: "asha".to_string(),
        }
        .apply_to(user_id, None);

        assert_eq!(created.user_id, user_id);
        assert_eq!(created.full_name, "asha");
        assert_eq!(created.skills, "");
        assert_eq!(created.resume_path.as_deref(), Some("resumes/cv.pdf"));
    }

    #[test]
    fn test_first_submission_creates_profile() {
        let user_id = Uuid::new_v4();
        let created = ProfileMutation::Details(details("A")).apply_to(user_id, None);
        assert_eq!(created.user_id, user_id);
        assert_eq!(created.summary.as_deref(), Some("s"));
        assert!(created.recommendations.is_none());
    }
}
