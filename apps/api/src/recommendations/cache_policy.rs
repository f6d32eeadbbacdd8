//! Cache Policy: decides whether a profile's stored recommendations can be served.
//!
//! The cache field moves ABSENT → VALID on a successful fetch and back to ABSENT on any
//! profile or resume edit (see `profile::store::ProfileMutation`). A stored payload
//! that no longer parses is CORRUPTED and handled exactly like ABSENT. There is no TTL.

use crate::models::profile::ProfileRow;
use crate::recommendations::models::RecommendationSet;

/// What the profile's `recommendations` column currently holds.
#[derive(Debug, Clone, PartialEq)]
pub enum CacheState {
    Absent,
    Valid(RecommendationSet),
    Corrupted(String),
}

impl CacheState {
    pub fn read(stored: Option<&str>) -> Self {
        match stored.map(str::trim) {
            None | Some("") => CacheState::Absent,
            Some(payload) => match serde_json::from_str::<RecommendationSet>(payload) {
                Ok(set) => CacheState::Valid(set),
                Err(e) => CacheState::Corrupted(e.to_string()),
            },
        }
    }

    pub fn of(profile: &ProfileRow) -> Self {
        Self::read(profile.recommendations.as_deref())
    }
}

/// Why the provider is about to be called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchReason {
    ForcedRefresh,
    NotCached,
    Corrupted(String),
}

#[derive(Debug, Clone, PartialEq)]
pub enum CacheDecision {
    ServeCache(RecommendationSet),
    FetchFresh(FetchReason),
}

pub fn decide(profile: &ProfileRow, force_refresh: bool) -> CacheDecision {
    if force_refresh {
        return CacheDecision::FetchFresh(FetchReason::ForcedRefresh);
    }

    match CacheState::of(profile) {
        CacheState::Valid(set) => CacheDecision::ServeCache(set),
        CacheState::Absent => CacheDecision::FetchFresh(FetchReason::NotCached),
        CacheState::Corrupted(err) => CacheDecision::FetchFresh(FetchReason::Corrupted(err)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::recommendations::fallback::fallback_set;
    use uuid::Uuid;

    fn profile_with(cache: Option<&str>) -> ProfileRow {
        let mut profile = ProfileRow::blank(Uuid::new_v4(), "A");
        profile.recommendations = cache.map(String::from);
        profile
    }

    fn cached_fallback() -> String {
        serde_json::to_string(&fallback_set()).unwrap()
    }

    #[test]
    fn test_force_refresh_always_fetches() {
        let profile = profile_with(Some(&cached_fallback()));
        assert_eq!(
            decide(&profile, true),
            CacheDecision::FetchFresh(FetchReason::ForcedRefresh)
        );
    }

    #[test]
    fn test_valid_cache_is_served() {
        let profile = profile_with(Some(&cached_fallback()));
        assert_eq!(decide(&profile, false), CacheDecision::ServeCache(fallback_set()));
    }

    #[test]
    fn test_missing_or_blank_cache_fetches() {
        for cache in [None, Some(""), Some("   ")] {
            assert_eq!(
                decide(&profile_with(cache), false),
                CacheDecision::FetchFresh(FetchReason::NotCached)
            );
        }
    }

    #[test]
    fn test_unparseable_cache_is_corrupted() {
        let decision = decide(&profile_with(Some("{not json")), false);
        assert!(matches!(
            decision,
            CacheDecision::FetchFresh(FetchReason::Corrupted(_))
        ));
    }

    #[test]
    fn test_cache_with_uncanonical_tags_is_corrupted() {
        let stored = r#"{"courses": [{"title": "X", "platform": "P", "link": "u",
                         "banner_url": "b", "tags": ["a"]}], "jobs": []}"#;
        assert!(matches!(CacheState::read(Some(stored)), CacheState::Corrupted(_)));
    }
}
