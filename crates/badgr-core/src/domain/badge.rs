//! Badges and badge request options.

use serde::{Deserialize, Serialize};

use super::error::BadgeError;
use super::status::{CheckStatus, Color};

/// Label used when a request does not name its badge.
pub const DEFAULT_BADGE_NAME: &str = "build";

/// Branch used when a request does not name one.
pub const DEFAULT_BRANCH: &str = "main";

/// Something that can be drawn as a badge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Badge {
    /// Outcome of the checked repository's check suites.
    Result { name: String, status: CheckStatus },
    /// Badgr itself failed; `status` is usually an HTTP status code.
    Error { status: String },
}

impl Badge {
    pub fn result(name: impl Into<String>, status: CheckStatus) -> Self {
        Badge::Result {
            name: name.into(),
            status,
        }
    }

    /// Error badge carrying an HTTP status code as its status text.
    pub fn error(code: u16) -> Self {
        Badge::Error {
            status: code.to_string(),
        }
    }

    /// Label on the left-hand side.
    pub fn name(&self) -> &str {
        match self {
            Badge::Result { name, .. } => name,
            Badge::Error { .. } => "error",
        }
    }

    /// Text on the right-hand side.
    pub fn status_text(&self) -> &str {
        match self {
            Badge::Result { status, .. } => status.as_str(),
            Badge::Error { status } => status,
        }
    }

    pub fn color(&self) -> Color {
        match self {
            Badge::Result { status, .. } => status.color(),
            Badge::Error { .. } => Color::Red,
        }
    }

    /// Aggregated status, if this is a result badge.
    pub fn check_status(&self) -> Option<CheckStatus> {
        match self {
            Badge::Result { status, .. } => Some(*status),
            Badge::Error { .. } => None,
        }
    }
}

/// Fully resolved options for one badge request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BadgeRequestOptions {
    pub badge_name: String,
    pub branch: String,
    /// Restrict to check suites from this GitHub App. `0` means all apps.
    pub app_id: u64,
}

impl Default for BadgeRequestOptions {
    fn default() -> Self {
        Self {
            badge_name: DEFAULT_BADGE_NAME.to_string(),
            branch: DEFAULT_BRANCH.to_string(),
            app_id: 0,
        }
    }
}

impl BadgeRequestOptions {
    /// The app filter, or `None` when unfiltered.
    pub fn app_filter(&self) -> Option<u64> {
        (self.app_id != 0).then_some(self.app_id)
    }
}

/// Raw query string of a badge request: `?name=&appID=&branch=`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BadgeQuery {
    pub name: Option<String>,
    pub app_id: Option<String>,
    pub branch: Option<String>,
}

impl BadgeQuery {
    /// Collect the recognised parameters from decoded query pairs.
    ///
    /// A repeated key keeps its first value; unknown keys are ignored.
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: AsRef<str>,
        V: Into<String>,
    {
        let mut query = Self::default();
        for (key, value) in pairs {
            let slot = match key.as_ref() {
                "name" => &mut query.name,
                "appID" => &mut query.app_id,
                "branch" => &mut query.branch,
                _ => continue,
            };
            if slot.is_none() {
                *slot = Some(value.into());
            }
        }
        query
    }

    /// Apply defaults and validate `appID`.
    ///
    /// Empty values count as absent. A present `appID` that is not a
    /// non-negative integer is rejected.
    pub fn into_options(self) -> Result<BadgeRequestOptions, BadgeError> {
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());
        let app_id = match non_empty(self.app_id) {
            None => 0,
            Some(raw) => raw
                .parse::<u64>()
                .map_err(|_| BadgeError::InvalidAppId(raw))?,
        };
        Ok(BadgeRequestOptions {
            badge_name: non_empty(self.name).unwrap_or_else(|| DEFAULT_BADGE_NAME.to_string()),
            branch: non_empty(self.branch).unwrap_or_else(|| DEFAULT_BRANCH.to_string()),
            app_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_badge_fields() {
        let badge = Badge::result("tests", CheckStatus::TimedOut);
        assert_eq!(badge.name(), "tests");
        assert_eq!(badge.status_text(), "timed out");
        assert_eq!(badge.color(), Color::Red);
        assert_eq!(badge.check_status(), Some(CheckStatus::TimedOut));
    }

    #[test]
    fn test_error_badge_is_always_red_and_named_error() {
        let badge = Badge::error(500);
        assert_eq!(badge.name(), "error");
        assert_eq!(badge.status_text(), "500");
        assert_eq!(badge.color(), Color::Red);
        assert_eq!(badge.check_status(), None);
    }

    #[test]
    fn test_query_defaults() {
        let opts = BadgeQuery::default().into_options().unwrap();
        assert_eq!(opts, BadgeRequestOptions::default());
        assert_eq!(opts.badge_name, "build");
        assert_eq!(opts.branch, "main");
        assert_eq!(opts.app_filter(), None);
    }

    #[test]
    fn test_query_empty_values_use_defaults() {
        let query = BadgeQuery {
            name: Some(String::new()),
            app_id: Some(String::new()),
            branch: Some(String::new()),
        };
        assert_eq!(query.into_options().unwrap(), BadgeRequestOptions::default());
    }

    #[test]
    fn test_query_explicit_values() {
        let query = BadgeQuery {
            name: Some("lint".to_string()),
            app_id: Some("15368".to_string()),
            branch: Some("v2".to_string()),
        };
        let opts = query.into_options().unwrap();
        assert_eq!(opts.badge_name, "lint");
        assert_eq!(opts.branch, "v2");
        assert_eq!(opts.app_filter(), Some(15368));
    }

    #[test]
    fn test_query_rejects_non_numeric_app_id() {
        for raw in ["abc", "12x", "-4", "1.5"] {
            let query = BadgeQuery {
                app_id: Some(raw.to_string()),
                ..Default::default()
            };
            let err = query.into_options().unwrap_err();
            assert!(matches!(err, BadgeError::InvalidAppId(ref v) if v == raw));
        }
    }

    #[test]
    fn test_from_pairs_first_value_wins() {
        let query = BadgeQuery::from_pairs([
            ("branch", "main"),
            ("name", "lint"),
            ("branch", "dev"),
            ("appID", "7"),
            ("appID", "oops"),
            ("utm_source", "readme"),
        ]);
        assert_eq!(
            query,
            BadgeQuery {
                name: Some("lint".to_string()),
                app_id: Some("7".to_string()),
                branch: Some("main".to_string()),
            }
        );
        assert_eq!(query.into_options().unwrap().app_filter(), Some(7));
    }

    #[test]
    fn test_from_pairs_keys_are_case_sensitive() {
        let query = BadgeQuery::from_pairs([("appid", "x"), ("Branch", "dev")]);
        assert_eq!(query, BadgeQuery::default());
    }

    #[test]
    fn test_zero_app_id_means_unfiltered() {
        let query = BadgeQuery {
            app_id: Some("0".to_string()),
            ..Default::default()
        };
        assert_eq!(query.into_options().unwrap().app_filter(), None);
    }
}
