//! Upstream check-suite provider seam.

use async_trait::async_trait;

use crate::domain::{CheckResult, ProviderError};

/// Query for one page of check suites.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CheckSuiteQuery<'a> {
    pub owner: &'a str,
    pub repo: &'a str,
    /// Branch, tag, or commit SHA.
    pub git_ref: &'a str,
    pub app_id: Option<u64>,
    /// 1-based page number.
    pub page: u32,
}

/// One page of check suites.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CheckSuitePage {
    pub results: Vec<CheckResult>,
    /// Next page number, or `None` when this was the last page.
    pub next_page: Option<u32>,
}

/// Injectable data source for check suites.
///
/// Implement this trait to plug in the GitHub API or test stubs.
#[async_trait]
pub trait CheckSuiteSource: Send + Sync {
    async fn list_check_suites(
        &self,
        query: &CheckSuiteQuery<'_>,
    ) -> Result<CheckSuitePage, ProviderError>;
}
