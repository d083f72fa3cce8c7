//! Badge request resolution pipeline.
//!
//! [`RequestPipeline`] turns one badge request into a redirect target. It
//! never fails: every path ends in *some* badge URL. The steps are strictly
//! ordered and each only runs if the previous one did not produce a URL:
//!
//! 1. warm cache probe (errors are logged and skipped)
//! 2. fresh resolution, written back to both tiers on success (the response
//!    waits at most the cache write budget for that write)
//! 3. cold cache fallback, only after fresh resolution failed
//! 4. the `500` error badge

use std::sync::Arc;
use std::time::{Duration, Instant};

use badgr_cache::Cache;
use serde::Serialize;
use tracing::Instrument;

use crate::domain::{Badge, BadgeError, BadgeQuery, BadgeRequestOptions};
use crate::obs;
use crate::render::badge_url;
use crate::resolver::BadgeService;

/// Default deadline for fresh resolution.
pub const DEFAULT_RESOLVE_TIMEOUT: Duration = Duration::from_secs(10);

/// Default time a fresh response waits for its cache write.
pub const DEFAULT_CACHE_WRITE_BUDGET: Duration = Duration::from_millis(500);

/// Which step produced a [`Resolution`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    /// The request was malformed; nothing was looked up.
    InvalidRequest,
    WarmHit,
    Fresh,
    ColdHit,
    /// Warm, fresh, and cold all came up empty.
    Exhausted,
}

/// Redirect target for one request, and how it was obtained.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Resolution {
    pub url: String,
    pub outcome: Outcome,
}

impl Resolution {
    fn new(url: String, outcome: Outcome) -> Self {
        Self { url, outcome }
    }
}

/// Coordinates the cache and a [`BadgeService`] for each request.
///
/// Holds no per-request state; one instance serves all requests concurrently.
#[derive(Clone)]
pub struct RequestPipeline {
    cache: Arc<dyn Cache>,
    service: Arc<dyn BadgeService>,
    resolve_timeout: Duration,
    cache_write_budget: Duration,
}

impl RequestPipeline {
    pub fn new(cache: Arc<dyn Cache>, service: Arc<dyn BadgeService>) -> Self {
        Self {
            cache,
            service,
            resolve_timeout: DEFAULT_RESOLVE_TIMEOUT,
            cache_write_budget: DEFAULT_CACHE_WRITE_BUDGET,
        }
    }

    /// Bound fresh resolution. On expiry the pipeline still tries the cold tier.
    pub fn with_resolve_timeout(mut self, timeout: Duration) -> Self {
        self.resolve_timeout = timeout;
        self
    }

    /// Bound how long a fresh response waits for its cache write. A write
    /// still running at the deadline finishes in the background.
    pub fn with_cache_write_budget(mut self, budget: Duration) -> Self {
        self.cache_write_budget = budget;
        self
    }

    /// Validate a raw badge query, then resolve it.
    ///
    /// A malformed `appID` short-circuits to the `400` error badge before
    /// the cache or provider is touched.
    pub async fn serve(
        &self,
        request_identity: &str,
        owner: &str,
        repo: &str,
        query: BadgeQuery,
    ) -> Resolution {
        match query.into_options() {
            Ok(options) => self.resolve(request_identity, owner, repo, &options).await,
            Err(err) => {
                if let BadgeError::InvalidAppId(raw) = &err {
                    obs::emit_invalid_app_id(request_identity, raw);
                }
                Resolution::new(badge_url(&Badge::error(400)), Outcome::InvalidRequest)
            }
        }
    }

    /// Resolve validated options to a badge URL.
    pub async fn resolve(
        &self,
        request_identity: &str,
        owner: &str,
        repo: &str,
        options: &BadgeRequestOptions,
    ) -> Resolution {
        match self.cache.get_warm(request_identity).await {
            Ok(Some(url)) if !url.is_empty() => {
                obs::emit_warm_hit(request_identity);
                return Resolution::new(url, Outcome::WarmHit);
            }
            Ok(_) => {}
            // Still worth asking for a fresh result.
            Err(e) => obs::emit_warm_error(request_identity, &e),
        }

        let started = Instant::now();
        match self.fresh_badge(owner, repo, options).await {
            Ok(badge) => {
                let url = badge_url(&badge);
                obs::emit_resolved(
                    request_identity,
                    badge.status_text(),
                    started.elapsed().as_millis() as u64,
                );
                self.write_back(request_identity, &url).await;
                return Resolution::new(url, Outcome::Fresh);
            }
            Err(e) => obs::emit_resolve_error(request_identity, &e),
        }

        match self.cache.get_cold(request_identity).await {
            Ok(Some(url)) if !url.is_empty() => {
                obs::emit_cold_hit(request_identity);
                return Resolution::new(url, Outcome::ColdHit);
            }
            Ok(_) => {}
            Err(e) => obs::emit_cold_error(request_identity, &e),
        }

        obs::emit_exhausted(request_identity);
        Resolution::new(badge_url(&Badge::error(500)), Outcome::Exhausted)
    }

    /// Store a fresh URL in both tiers without letting a slow cache hold the
    /// response past the write budget.
    async fn write_back(&self, request_identity: &str, url: &str) {
        let cache = Arc::clone(&self.cache);
        let key = request_identity.to_string();
        let value = url.to_string();
        let write = tokio::spawn(
            async move {
                if let Err(e) = cache.set(&key, &value).await {
                    obs::emit_cache_write_error(&key, &e);
                }
            }
            .in_current_span(),
        );
        if tokio::time::timeout(self.cache_write_budget, write)
            .await
            .is_err()
        {
            obs::emit_cache_write_pending(
                request_identity,
                self.cache_write_budget.as_millis() as u64,
            );
        }
    }

    async fn fresh_badge(
        &self,
        owner: &str,
        repo: &str,
        options: &BadgeRequestOptions,
    ) -> crate::domain::Result<Badge> {
        tokio::time::timeout(
            self.resolve_timeout,
            self.service.check_badge(owner, repo, options),
        )
        .await
        .map_err(|_| BadgeError::Timeout(self.resolve_timeout))?
    }
}
