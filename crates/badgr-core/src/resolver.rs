//! Check-suite resolution.
//!
//! [`CheckResolver`] pages through a [`CheckSuiteSource`] until it is
//! exhausted and reduces everything it saw into one [`Badge`].

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::aggregator::combine;
use crate::domain::{Badge, BadgeError, BadgeRequestOptions, Result};
use crate::provider::{CheckSuiteQuery, CheckSuiteSource};

/// Anything that can compute a fresh badge for a repository.
#[async_trait]
pub trait BadgeService: Send + Sync {
    async fn check_badge(
        &self,
        owner: &str,
        repo: &str,
        options: &BadgeRequestOptions,
    ) -> Result<Badge>;
}

/// [`BadgeService`] backed by provider check suites.
pub struct CheckResolver {
    source: Arc<dyn CheckSuiteSource>,
}

impl CheckResolver {
    pub fn new(source: Arc<dyn CheckSuiteSource>) -> Self {
        Self { source }
    }
}

#[async_trait]
impl BadgeService for CheckResolver {
    /// Fetch every page, then aggregate once.
    ///
    /// Any page error fails the whole call; a truncated page set is never
    /// aggregated. Zero check suites is a valid answer and yields `unknown`.
    async fn check_badge(
        &self,
        owner: &str,
        repo: &str,
        options: &BadgeRequestOptions,
    ) -> Result<Badge> {
        let mut results = Vec::new();
        let mut page = 1;
        loop {
            let query = CheckSuiteQuery {
                owner,
                repo,
                git_ref: &options.branch,
                app_id: options.app_filter(),
                page,
            };
            let fetched = self
                .source
                .list_check_suites(&query)
                .await
                .map_err(|source| BadgeError::Provider {
                    owner: owner.to_string(),
                    repo: repo.to_string(),
                    branch: options.branch.clone(),
                    app_id: options.app_filter(),
                    source,
                })?;
            results.extend(fetched.results);
            match fetched.next_page {
                // Guard against a provider pointing back at a page we already read.
                Some(next) if next > page => page = next,
                _ => break,
            }
        }

        debug!(
            owner = %owner,
            repo = %repo,
            branch = %options.branch,
            check_suites = results.len(),
            "aggregating check suites"
        );
        Ok(Badge::result(&options.badge_name, combine(&results)))
    }
}
