//! Recommendation Engine: the single entry point for `GET /recommendations`.
//!
//! Flow: load profile → cache policy → (serve cache | provider → normalize) →
//!       persist → return.
//!
//! Nothing here fails the request. Provider and normalization failures become the
//! fallback set, a corrupted cache is refetched, and a failed write is logged while
//! the computed set is still returned.

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};

use tracing::{debug, error, info, warn, Instrument, Span};
use uuid::Uuid;

use crate::models::profile::ProfileRow;
use crate::profile::store::ProfileStore;
use crate::recommendations::cache_policy::{decide, CacheDecision, CacheState, FetchReason};
use crate::recommendations::fallback::fallback_set;
use crate::recommendations::models::{ProviderRequest, RecommendationSet};
use crate::recommendations::normalizer::normalize;
use crate::recommendations::provider::RecommendationProvider;
use crate::recommendations::refresh_lock::RefreshLock;

pub struct RecommendationEngine {
    store: Arc<dyn ProfileStore>,
    provider: Arc<dyn RecommendationProvider>,
    refresh_lock: Arc<dyn RefreshLock>,
    provider_timeout: Duration,
    /// Every engine event is recorded under this span.
    span: Span,
}

impl RecommendationEngine {
    pub fn new(
        store: Arc<dyn ProfileStore>,
        provider: Arc<dyn RecommendationProvider>,
        refresh_lock: Arc<dyn RefreshLock>,
        provider_timeout: Duration,
        span: Span,
    ) -> Self {
        Self {
            store,
            provider,
            refresh_lock,
            provider_timeout,
            span,
        }
    }

    pub async fn get_recommendations(
        &self,
        user_id: Uuid,
        force_refresh: bool,
    ) -> RecommendationSet {
        let span = tracing::info_span!(
            parent: &self.span,
            "get_recommendations",
            %user_id,
            force_refresh
        );
        self.resolve(user_id, force_refresh).instrument(span).await
    }

    async fn resolve(&self, user_id: Uuid, force_refresh: bool) -> RecommendationSet {
        let profile = match self.store.get_profile(user_id).await {
            Ok(Some(profile)) => profile,
            Ok(None) => {
                info!("No profile yet; returning empty recommendations");
                return RecommendationSet::empty();
            }
            Err(e) => {
                error!("Profile lookup failed, serving fallback recommendations: {e:#}");
                return fallback_set();
            }
        };

        let reason = match decide(&profile, force_refresh) {
            CacheDecision::ServeCache(set) => {
                info!(
                    "Serving cached recommendations ({} courses, {} jobs)",
                    set.courses.len(),
                    set.jobs.len()
                );
                return set;
            }
            CacheDecision::FetchFresh(reason) => reason,
        };

        match &reason {
            FetchReason::Corrupted(err) => {
                warn!("Cached recommendations are corrupted, refetching: {err}")
            }
            FetchReason::ForcedRefresh => info!("Refresh requested; regenerating recommendations"),
            FetchReason::NotCached => info!("No cached recommendations; generating"),
        }

        let holds_lock = match self.refresh_lock.try_acquire(user_id).await {
            Ok(true) => true,
            Ok(false) => {
                if let CacheState::Valid(set) = CacheState::of(&profile) {
                    info!(
                        force_refresh,
                        "Refresh already in flight; skipping provider call and serving the current cached set"
                    );
                    return set;
                }
                debug!("Another refresh is in flight and nothing is cached; fetching anyway");
                false
            }
            Err(e) => {
                warn!("Refresh lock unavailable, continuing without it: {e:#}");
                false
            }
        };

        self.refresh(user_id, &profile, holds_lock).await
    }

    /// Runs the provider call and the write on a detached task. Dropping the request
    /// future does not cancel either one.
    async fn refresh(
        &self,
        user_id: Uuid,
        profile: &ProfileRow,
        holds_lock: bool,
    ) -> RecommendationSet {
        let task = RefreshTask {
            store: Arc::clone(&self.store),
            provider: Arc::clone(&self.provider),
            refresh_lock: Arc::clone(&self.refresh_lock),
            provider_timeout: self.provider_timeout,
        };
        let request = ProviderRequest::from(profile);

        let handle = tokio::spawn(
            task.run(user_id, profile.updated_at, request, holds_lock)
                .instrument(Span::current()),
        );

        match handle.await {
            Ok(set) => set,
            Err(e) => {
                error!("Recommendation refresh task failed: {e}");
                fallback_set()
            }
        }
    }
}

struct RefreshTask {
    store: Arc<dyn ProfileStore>,
    provider: Arc<dyn RecommendationProvider>,
    refresh_lock: Arc<dyn RefreshLock>,
    provider_timeout: Duration,
}

impl RefreshTask {
    async fn run(
        self,
        user_id: Uuid,
        read_at: DateTime<Utc>,
        request: ProviderRequest,
        holds_lock: bool,
    ) -> RecommendationSet {
        let set = self.fetch(&request).await;

        // Fallback sets are cached the same way as provider sets. The write only lands
        // if the profile is still the revision the request was built from.
        let saved = match serde_json::to_string(&set) {
            Ok(payload) => self.store.save_recommendations(user_id, read_at, &payload).await,
            Err(e) => Err(e.into()),
        };
        match saved {
            Ok(true) => info!(
                "Cached {} courses and {} jobs",
                set.courses.len(),
                set.jobs.len()
            ),
            Ok(false) => info!("Profile changed during refresh; recommendations not cached"),
            Err(e) => warn!(
                "Failed to persist recommendations; cache stays stale until the next request: {e:#}"
            ),
        }

        if holds_lock {
            if let Err(e) = self.refresh_lock.release(user_id).await {
                warn!("Failed to release refresh lock: {e:#}");
            }
        }

        set
    }

    async fn fetch(&self, request: &ProviderRequest) -> RecommendationSet {
        let call = self.provider.recommend(request);
        let raw = match tokio::time::timeout(self.provider_timeout, call).await {
            Ok(Ok(raw)) => raw,
            Ok(Err(e)) => {
                error!("Recommendation provider unavailable, using fallback: {e}");
                return fallback_set();
            }
            Err(_) => {
                error!(
                    "Recommendation provider timed out after {}s, using fallback",
                    self.provider_timeout.as_secs()
                );
                return fallback_set();
            }
        };

        match normalize(&raw) {
            Ok(set) => set,
            Err(e) => {
                error!("Provider payload rejected by normalizer, using fallback: {e}");
                fallback_set()
            }
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
