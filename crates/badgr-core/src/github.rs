//! GitHub check-suite client
//!
//! Lists check suites for a ref through the GitHub REST API and follows the
//! `Link` header for pagination.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, ACCEPT, LINK};
use reqwest::Url;
use serde::Deserialize;
use tracing::debug;

use crate::domain::{CheckResult, ProviderError};
use crate::provider::{CheckSuitePage, CheckSuiteQuery, CheckSuiteSource};

/// Public GitHub API root.
pub const DEFAULT_API_URL: &str = "https://api.github.com";

/// Page size requested from GitHub (its maximum).
pub const PER_PAGE: u32 = 100;

/// GitHub client configuration
#[derive(Debug, Clone)]
pub struct GitHubConfig {
    /// API root, without trailing slash
    pub api_url: String,
    /// Token for authenticated requests (raises rate limits)
    pub token: Option<String>,
}

impl Default for GitHubConfig {
    fn default() -> Self {
        GitHubConfig {
            api_url: DEFAULT_API_URL.to_string(),
            token: None,
        }
    }
}

impl GitHubConfig {
    /// Set authentication token
    pub fn with_token(mut self, token: &str) -> Self {
        self.token = Some(token.to_string());
        self
    }
}

#[derive(Debug, Deserialize)]
struct ListCheckSuitesResponse {
    #[serde(default)]
    check_suites: Vec<CheckResult>,
}

/// GitHub implementation of [`CheckSuiteSource`].
pub struct GitHubClient {
    config: GitHubConfig,
    http_client: reqwest::Client,
}

impl GitHubClient {
    pub fn new(config: GitHubConfig) -> Result<Self, ProviderError> {
        let http_client = reqwest::Client::builder()
            .user_agent(concat!("badgr/", env!("CARGO_PKG_VERSION")))
            .build()?;
        Ok(GitHubClient {
            config,
            http_client,
        })
    }

    fn check_suites_url(&self, query: &CheckSuiteQuery<'_>) -> String {
        check_suites_url(&self.config.api_url, query.owner, query.repo, query.git_ref)
    }
}

#[async_trait]
impl CheckSuiteSource for GitHubClient {
    async fn list_check_suites(
        &self,
        query: &CheckSuiteQuery<'_>,
    ) -> Result<CheckSuitePage, ProviderError> {
        let url = self.check_suites_url(query);
        let mut params = vec![
            ("page", query.page.to_string()),
            ("per_page", PER_PAGE.to_string()),
        ];
        if let Some(app_id) = query.app_id {
            params.push(("app_id", app_id.to_string()));
        }

        debug!(url = %url, page = query.page, "listing check suites");

        let mut request = self
            .http_client
            .get(&url)
            .header(ACCEPT, "application/vnd.github+json")
            .query(&params);
        if let Some(token) = &self.config.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(ProviderError::Status {
                status: status.as_u16(),
                url,
            });
        }

        let next_page = next_page(response.headers());
        let body: ListCheckSuitesResponse = response.json().await?;
        Ok(CheckSuitePage {
            results: body.check_suites,
            next_page,
        })
    }
}

/// `{api}/repos/{owner}/{repo}/commits/{ref}/check-suites`, with each path
/// segment escaped. Slashes inside the ref are kept so `release/1.0` works.
pub fn check_suites_url(api_url: &str, owner: &str, repo: &str, git_ref: &str) -> String {
    let escaped_ref = git_ref
        .split('/')
        .map(|seg| urlencoding::encode(seg).into_owned())
        .collect::<Vec<_>>()
        .join("/");
    format!(
        "{}/repos/{}/{}/commits/{}/check-suites",
        api_url.trim_end_matches('/'),
        urlencoding::encode(owner),
        urlencoding::encode(repo),
        escaped_ref
    )
}

/// Page number of the `rel="next"` entry in a `Link` header, if any.
pub fn next_page(headers: &HeaderMap) -> Option<u32> {
    let link = headers.get(LINK)?.to_str().ok()?;
    parse_next_page(link)
}

fn parse_next_page(link: &str) -> Option<u32> {
    link.split(',').find_map(|entry| {
        let mut parts = entry.split(';');
        let target = parts.next()?.trim();
        let is_next = parts.any(|p| p.trim() == r#"rel="next""#);
        if !is_next {
            return None;
        }
        let target = target.strip_prefix('<')?.strip_suffix('>')?;
        Url::parse(target)
            .ok()?
            .query_pairs()
            .find(|(k, _)| k == "page")
            .and_then(|(_, v)| v.parse().ok())
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::header::HeaderValue;

    #[test]
    fn test_check_suites_url() {
        assert_eq!(
            check_suites_url("https://api.github.com", "brigadecore", "badgr", "main"),
            "https://api.github.com/repos/brigadecore/badgr/commits/main/check-suites"
        );
    }

    #[test]
    fn test_check_suites_url_keeps_ref_slashes() {
        assert_eq!(
            check_suites_url("https://ghe.example.com/api/v3/", "o", "r", "release/1.0 rc"),
            "https://ghe.example.com/api/v3/repos/o/r/commits/release/1.0%20rc/check-suites"
        );
    }

    #[test]
    fn test_parse_next_page() {
        let link = r#"<https://api.github.com/repositories/1/commits/main/check-suites?page=2&per_page=100>; rel="next", <https://api.github.com/repositories/1/commits/main/check-suites?page=5&per_page=100>; rel="last""#;
        assert_eq!(parse_next_page(link), Some(2));
    }

    #[test]
    fn test_parse_next_page_on_last_page() {
        let link = r#"<https://api.github.com/x?page=1>; rel="first", <https://api.github.com/x?page=4>; rel="prev""#;
        assert_eq!(parse_next_page(link), None);
    }

    #[test]
    fn test_next_page_without_link_header() {
        assert_eq!(next_page(&HeaderMap::new()), None);
    }

    #[test]
    fn test_next_page_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert(
            LINK,
            HeaderValue::from_static(r#"<https://api.github.com/x?per_page=100&page=3>; rel="next""#),
        );
        assert_eq!(next_page(&headers), Some(3));
    }

    #[test]
    fn test_decode_list_response() {
        let body = r#"{
            "total_count": 2,
            "check_suites": [
                {"id": 5, "status": "completed", "conclusion": "success"},
                {"id": 6, "status": "in_progress", "conclusion": null}
            ]
        }"#;
        let parsed: ListCheckSuitesResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.check_suites.len(), 2);
        assert_eq!(parsed.check_suites[0], CheckResult::completed("success"));
    }

    #[test]
    fn test_client_builds() {
        let client = GitHubClient::new(GitHubConfig::default().with_token("t"));
        assert!(client.is_ok());
    }
}
