//! In-memory fakes for provider and service traits (testing only)
//!
//! `PagedSource` serves canned check-suite pages; `ScriptedService` returns a
//! fixed badge or error and counts calls, optionally after a delay.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::domain::{Badge, BadgeError, BadgeRequestOptions, CheckResult, ProviderError, Result};
use crate::provider::{CheckSuitePage, CheckSuiteQuery, CheckSuiteSource};
use crate::resolver::BadgeService;

// ---------------------------------------------------------------------------
// PagedSource
// ---------------------------------------------------------------------------

/// Owned copy of a [`CheckSuiteQuery`] seen by [`PagedSource`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedQuery {
    pub owner: String,
    pub repo: String,
    pub git_ref: String,
    pub app_id: Option<u64>,
    pub page: u32,
}

/// `CheckSuiteSource` serving fixed pages (page `n` is `pages[n - 1]`).
#[derive(Debug, Default)]
pub struct PagedSource {
    pages: Vec<Vec<CheckResult>>,
    fail_on_page: Option<u32>,
    next_page_override: Option<u32>,
    queries: Mutex<Vec<RecordedQuery>>,
}

impl PagedSource {
    pub fn new(pages: Vec<Vec<CheckResult>>) -> Self {
        Self {
            pages,
            ..Self::default()
        }
    }

    /// Return an HTTP error when this page is requested.
    pub fn failing_on_page(mut self, page: u32) -> Self {
        self.fail_on_page = Some(page);
        self
    }

    /// Advertise `page` as the next page on every response, whatever was asked.
    pub fn with_next_page(mut self, page: u32) -> Self {
        self.next_page_override = Some(page);
        self
    }

    pub fn queries(&self) -> Vec<RecordedQuery> {
        self.queries.lock().unwrap().clone()
    }

    pub fn requested_pages(&self) -> Vec<u32> {
        self.queries().into_iter().map(|q| q.page).collect()
    }
}

#[async_trait]
impl CheckSuiteSource for PagedSource {
    async fn list_check_suites(
        &self,
        query: &CheckSuiteQuery<'_>,
    ) -> std::result::Result<CheckSuitePage, ProviderError> {
        self.queries.lock().unwrap().push(RecordedQuery {
            owner: query.owner.to_string(),
            repo: query.repo.to_string(),
            git_ref: query.git_ref.to_string(),
            app_id: query.app_id,
            page: query.page,
        });
        if self.fail_on_page == Some(query.page) {
            return Err(ProviderError::Status {
                status: 502,
                url: format!("fake://page/{}", query.page),
            });
        }
        let idx = query.page.saturating_sub(1) as usize;
        let results = self.pages.get(idx).cloned().unwrap_or_default();
        let next_page = self
            .next_page_override
            .or_else(|| (idx + 1 < self.pages.len()).then_some(query.page + 1));
        Ok(CheckSuitePage { results, next_page })
    }
}

// ---------------------------------------------------------------------------
// ScriptedService
// ---------------------------------------------------------------------------

/// `BadgeService` returning a fixed outcome.
#[derive(Debug)]
pub struct ScriptedService {
    badge: Option<Badge>,
    delay: Option<Duration>,
    calls: AtomicUsize,
}

impl ScriptedService {
    /// Service that always resolves to `badge`.
    pub fn resolving(badge: Badge) -> Self {
        Self {
            badge: Some(badge),
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Service whose provider always fails.
    pub fn failing() -> Self {
        Self {
            badge: None,
            delay: None,
            calls: AtomicUsize::new(0),
        }
    }

    /// Sleep before answering.
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl BadgeService for ScriptedService {
    async fn check_badge(
        &self,
        owner: &str,
        repo: &str,
        options: &BadgeRequestOptions,
    ) -> Result<Badge> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.badge {
            Some(badge) => Ok(badge.clone()),
            None => Err(BadgeError::Provider {
                owner: owner.to_string(),
                repo: repo.to_string(),
                branch: options.branch.clone(),
                app_id: options.app_filter(),
                source: ProviderError::Http("scripted failure".to_string()),
            }),
        }
    }
}
