//! Domain-level error taxonomy for Badgr.

/// Errors raised while fetching check suites from the provider.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("http error: {0}")]
    Http(String),

    #[error("unexpected status {status} from {url}")]
    Status { status: u16, url: String },

    #[error("could not decode check suites: {0}")]
    Decode(String),
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ProviderError::Decode(err.to_string())
        } else {
            ProviderError::Http(err.to_string())
        }
    }
}

/// Badgr domain errors.
#[derive(Debug, thiserror::Error)]
pub enum BadgeError {
    /// The `appID` query parameter was present but not an integer.
    #[error("invalid appID: {0:?}")]
    InvalidAppId(String),

    /// A check-suite page could not be fetched; no partial result is kept.
    #[error("error retrieving check suites for {} from GitHub: {source}", describe_target(.owner, .repo, .branch, .app_id))]
    Provider {
        owner: String,
        repo: String,
        branch: String,
        app_id: Option<u64>,
        source: ProviderError,
    },

    /// Fresh resolution did not finish within its deadline.
    #[error("check suite resolution timed out after {0:?}")]
    Timeout(std::time::Duration),
}

fn describe_target(owner: &str, repo: &str, branch: &str, app_id: &Option<u64>) -> String {
    match app_id {
        Some(id) => format!("appID {id}, owner {owner:?}, repo {repo:?}, branch {branch:?}"),
        None => format!("owner {owner:?}, repo {repo:?}, branch {branch:?}"),
    }
}

/// Result type for Badgr domain operations.
pub type Result<T> = std::result::Result<T, BadgeError>;
