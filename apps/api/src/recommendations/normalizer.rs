//! Normalizer: turns whatever the provider returned into a canonical `RecommendationSet`.
//!
//! Steps, each idempotent:
//! 1. Structural check: a JSON object with non-empty `courses` and `jobs` arrays.
//!    Partial results are rejected outright; the caller substitutes the fallback set.
//! 2. Course `tags`: a list is joined with ", ", a string is kept as-is.
//! 3. Course `banner_url`: always recomputed from the platform-logo table.
//! 4. Job `required_skills`: same joining rule as tags.

use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;

use crate::recommendations::models::{Course, Job, RecommendationSet};

/// Used when no platform-logo key matches.
pub const PLACEHOLDER_BANNER_URL: &str =
    "https://images.unsplash.com/photo-1516321318423-f06f85e504b3?w=800";

/// Ordered (substring, logo URL) pairs. The first key found in the platform wins.
pub const PLATFORM_LOGOS: &[(&str, &str)] = &[
    (
        "coursera",
        "https://upload.wikimedia.org/wikipedia/commons/9/97/Coursera-logo.png",
    ),
    ("udemy", "https://www.vectorlogo.zone/logos/udemy/udemy-ar21.svg"),
    ("edx", "https://www.vectorlogo.zone/logos/edx/edx-ar21.svg"),
    (
        "linkedin",
        "https://www.vectorlogo.zone/logos/linkedin/linkedin-ar21.svg",
    ),
    ("google", "https://www.vectorlogo.zone/logos/google/google-ar21.svg"),
    (
        "microsoft",
        "https://www.vectorlogo.zone/logos/microsoft/microsoft-ar21.svg",
    ),
    (
        "youtube",
        "https://www.vectorlogo.zone/logos/youtube/youtube-ar21.svg",
    ),
    (
        "khan academy",
        "https://www.vectorlogo.zone/logos/khanacademy/khanacademy-ar21.svg",
    ),
    (
        "datacamp",
        "https://www.vectorlogo.zone/logos/datacamp/datacamp-ar21.svg",
    ),
    (
        "pluralsight",
        "https://www.vectorlogo.zone/logos/pluralsight/pluralsight-ar21.svg",
    ),
];

#[derive(Debug, Error)]
pub enum NormalizationError {
    #[error("payload is not a JSON object")]
    NotAnObject,

    #[error("payload has an unexpected shape: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("payload has no courses")]
    NoCourses,

    #[error("payload has no jobs")]
    NoJobs,
}

/// Providers return tags and skills either as one string or as a list of strings.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
enum StringOrStringList {
    Text(String),
    List(Vec<String>),
}

impl Default for StringOrStringList {
    fn default() -> Self {
        StringOrStringList::Text(String::new())
    }
}

impl StringOrStringList {
    fn into_joined(self) -> String {
        match self {
            StringOrStringList::Text(text) => text,
            StringOrStringList::List(items) => items.join(", "),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawPayload {
    #[serde(default, deserialize_with = "null_as_default")]
    courses: Vec<RawCourse>,
    #[serde(default, deserialize_with = "null_as_default")]
    jobs: Vec<RawJob>,
}

// Provider-supplied `banner_url` is not read at all.
#[derive(Debug, Deserialize)]
struct RawCourse {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    platform: String,
    #[serde(default, deserialize_with = "null_as_default")]
    link: String,
    #[serde(default, deserialize_with = "null_as_default")]
    tags: StringOrStringList,
}

#[derive(Debug, Deserialize)]
struct RawJob {
    #[serde(default, deserialize_with = "null_as_default")]
    title: String,
    #[serde(default, deserialize_with = "null_as_default")]
    company: String,
    #[serde(default, deserialize_with = "null_as_default")]
    location: String,
    #[serde(default, deserialize_with = "null_as_default")]
    description: String,
    #[serde(default, deserialize_with = "null_as_default")]
    required_skills: StringOrStringList,
    #[serde(default, deserialize_with = "null_as_default")]
    link: String,
}

/// Treats an explicit `null` like a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Validates and canonicalizes a raw provider payload.
pub fn normalize(payload: &Value) -> Result<RecommendationSet, NormalizationError> {
    if !payload.is_object() {
        return Err(NormalizationError::NotAnObject);
    }

    let raw = RawPayload::deserialize(payload)?;

    if raw.courses.is_empty() {
        return Err(NormalizationError::NoCourses);
    }
    if raw.jobs.is_empty() {
        return Err(NormalizationError::NoJobs);
    }

    let courses = raw
        .courses
        .into_iter()
        .map(|course| Course {
            banner_url: resolve_platform_logo(&course.platform).to_string(),
            tags: course.tags.into_joined(),
            title: course.title,
            platform: course.platform,
            link: course.link,
        })
        .collect();

    let jobs = raw
        .jobs
        .into_iter()
        .map(|job| Job {
            required_skills: job.required_skills.into_joined(),
            title: job.title,
            company: job.company,
            location: job.location,
            description: job.description,
            link: job.link,
        })
        .collect();

    Ok(RecommendationSet { courses, jobs })
}

/// First-match lookup of the platform in [`PLATFORM_LOGOS`]; not best-match.
pub fn resolve_platform_logo(platform: &str) -> &'static str {
    let platform = platform.trim().to_lowercase();
    PLATFORM_LOGOS
        .iter()
        .find(|(key, _)| platform.contains(key))
        .map(|(_, url)| *url)
        .unwrap_or(PLACEHOLDER_BANNER_URL)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn logo(key: &str) -> &'static str {
        PLATFORM_LOGOS
            .iter()
            .find(|(k, _)| *k == key)
            .map(|(_, url)| *url)
            .unwrap()
    }

    fn sample_payload() -> Value {
        json!({
            "courses": [{
                "title": "X",
                "platform": "Coursera",
                "link": "u",
                "tags": ["a", "b"]
            }],
            "jobs": [{
                "title": "Y",
                "company": "C",
                "location": "L",
                "description": "D",
                "required_skills": ["p", "q"],
                "link": "u"
            }]
        })
    }

    #[test]
    fn test_list_fields_are_joined() {
        let set = normalize(&sample_payload()).unwrap();
        assert_eq!(set.courses[0].tags, "a, b");
        assert_eq!(set.jobs[0].required_skills, "p, q");
        assert_eq!(set.courses[0].banner_url, logo("coursera"));
    }

    #[test]
    fn test_string_fields_are_kept_verbatim() {
        let payload = json!({
            "courses": [{"title": "X", "platform": "edX", "link": "u", "tags": "rust, async"}],
            "jobs": [{"title": "Y", "company": "C", "location": "L", "description": "D",
                      "required_skills": "Rust", "link": "u"}]
        });
        let set = normalize(&payload).unwrap();
        assert_eq!(set.courses[0].tags, "rust, async");
        assert_eq!(set.jobs[0].required_skills, "Rust");
    }

    #[test]
    fn test_normalizing_twice_is_a_no_op() {
        let once = normalize(&sample_payload()).unwrap();
        let twice = normalize(&serde_json::to_value(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn test_provider_banner_is_discarded() {
        let payload = json!({
            "courses": [{"title": "X", "platform": "Obscure Academy", "link": "u",
                         "banner_url": "https://evil.example/hotlink.png", "tags": ""}],
            "jobs": [{"title": "Y"}]
        });
        let set = normalize(&payload).unwrap();
        assert_eq!(set.courses[0].banner_url, PLACEHOLDER_BANNER_URL);
    }

    #[test]
    fn test_platform_lookup_is_substring_and_case_insensitive() {
        assert_eq!(resolve_platform_logo("Udemy Online"), logo("udemy"));
        assert_eq!(resolve_platform_logo("  KHAN ACADEMY  "), logo("khan academy"));
        assert_eq!(resolve_platform_logo("Obscure Academy"), PLACEHOLDER_BANNER_URL);
        assert_eq!(resolve_platform_logo(""), PLACEHOLDER_BANNER_URL);
    }

    #[test]
    fn test_platform_lookup_prefers_table_order() {
        // Both "google" and "coursera" occur; coursera is listed first.
        assert_eq!(resolve_platform_logo("Google Career Certificates on Coursera"), logo("coursera"));
    }

    #[test]
    fn test_empty_courses_is_rejected() {
        let payload = json!({
            "courses": [],
            "jobs": [{"title": "Y", "company": "C", "location": "L", "description": "D",
                      "required_skills": "p", "link": "u"}]
        });
        assert!(matches!(normalize(&payload), Err(NormalizationError::NoCourses)));
    }

    #[test]
    fn test_missing_jobs_is_rejected() {
        let payload = json!({"courses": [{"title": "X", "platform": "Udemy"}]});
        assert!(matches!(normalize(&payload), Err(NormalizationError::NoJobs)));
    }

    #[test]
    fn test_non_object_payload_is_rejected() {
        assert!(matches!(
            normalize(&json!([1, 2, 3])),
            Err(NormalizationError::NotAnObject)
        ));
        assert!(matches!(normalize(&Value::Null), Err(NormalizationError::NotAnObject)));
    }

    #[test]
    fn test_wrong_field_types_are_rejected() {
        let payload = json!({
            "courses": [{"title": 42, "platform": "Udemy", "tags": ["a"]}],
            "jobs": [{"title": "Y"}]
        });
        assert!(matches!(normalize(&payload), Err(NormalizationError::Malformed(_))));

        let payload = json!({"courses": "none", "jobs": [{"title": "Y"}]});
        assert!(matches!(normalize(&payload), Err(NormalizationError::Malformed(_))));
    }

    #[test]
    fn test_null_fields_become_empty_strings() {
        let payload = json!({
            "courses": [{"title": "X", "platform": null, "link": null, "tags": null}],
            "jobs": [{"title": "Y", "company": null, "location": "L", "description": null,
                      "required_skills": null, "link": "u"}]
        });
        let set = normalize(&payload).unwrap();

        assert_eq!(set.courses[0].title, "X");
        assert_eq!(set.courses[0].link, "");
        assert_eq!(set.courses[0].tags, "");
        assert_eq!(set.courses[0].banner_url, PLACEHOLDER_BANNER_URL);
        assert_eq!(set.jobs[0].company, "");
        assert_eq!(set.jobs[0].required_skills, "");
        assert_eq!(set.jobs[0].link, "u");
    }

    #[test]
    fn test_null_lists_are_rejected_as_empty() {
        let payload = json!({
            "courses": null,
            "jobs": [{"title": "Y"}]
        });
        assert!(matches!(normalize(&payload), Err(NormalizationError::NoCourses)));
    }
}
