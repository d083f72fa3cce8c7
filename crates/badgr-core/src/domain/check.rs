//! Provider-reported check results.

use serde::{Deserialize, Serialize};

use super::status::CheckStatus;

/// One check suite as reported by GitHub.
///
/// `status` is the coarse lifecycle state (`queued`, `in_progress`,
/// `completed`); `conclusion` is only meaningful once completed. Both are
/// kept as raw strings so unrecognized values survive decoding and map to
/// [`CheckStatus::Unknown`] instead of failing the whole page.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct CheckResult {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub conclusion: Option<String>,
}

impl CheckResult {
    pub fn new(status: &str, conclusion: Option<&str>) -> Self {
        Self {
            status: Some(status.to_string()),
            conclusion: conclusion.map(str::to_string),
        }
    }

    /// A finished check suite with the given conclusion.
    pub fn completed(conclusion: &str) -> Self {
        Self::new("completed", Some(conclusion))
    }

    /// Map this result onto the badge severity scale.
    pub fn check_status(&self) -> CheckStatus {
        match self.status.as_deref() {
            Some("completed") => match self.conclusion.as_deref() {
                Some("success") => CheckStatus::Passed,
                Some("failure") => CheckStatus::Failed,
                Some("neutral") => CheckStatus::Neutral,
                // GitHub spells it with two Ls.
                Some("cancelled") => CheckStatus::Canceled,
                Some("timed_out") => CheckStatus::TimedOut,
                Some("action_required") => CheckStatus::ActionRequired,
                _ => CheckStatus::Unknown,
            },
            Some("in_progress") => CheckStatus::InProgress,
            Some("queued") => CheckStatus::Queued,
            _ => CheckStatus::Unknown,
        }
    }
}
