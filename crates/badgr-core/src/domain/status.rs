//! Consolidated check status and badge colors.

use serde::{Deserialize, Serialize};

/// shields.io color names used by Badgr.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Color {
    #[serde(rename = "brightgreen")]
    Green,
    Blue,
    Yellow,
    Red,
}

impl Color {
    pub fn as_str(&self) -> &'static str {
        match self {
            Color::Green => "brightgreen",
            Color::Blue => "blue",
            Color::Yellow => "yellow",
            Color::Red => "red",
        }
    }
}

impl std::fmt::Display for Color {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Status of one check suite, or of several combined.
///
/// Variants are declared from most to least severe, so the derived `Ord`
/// makes the most severe status the *smallest*. `Unknown` is both the
/// default and the most severe value: a badge nobody has reported on is
/// never optimistic, and combining anything with `Unknown` stays `Unknown`.
#[derive(
    Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash,
)]
#[serde(rename_all = "snake_case")]
pub enum CheckStatus {
    #[default]
    Unknown,
    Failed,
    TimedOut,
    ActionRequired,
    Canceled,
    Neutral,
    Queued,
    InProgress,
    Passed,
}

impl CheckStatus {
    /// Every status, most severe first.
    pub const ALL: [CheckStatus; 9] = [
        CheckStatus::Unknown,
        CheckStatus::Failed,
        CheckStatus::TimedOut,
        CheckStatus::ActionRequired,
        CheckStatus::Canceled,
        CheckStatus::Neutral,
        CheckStatus::Queued,
        CheckStatus::InProgress,
        CheckStatus::Passed,
    ];

    /// Severity rank; 0 is most severe.
    pub fn rank(&self) -> u8 {
        *self as u8
    }

    /// The more severe of two statuses.
    pub fn combine(self, other: CheckStatus) -> CheckStatus {
        self.min(other)
    }

    /// Text shown on the right-hand side of the badge.
    pub fn as_str(&self) -> &'static str {
        match self {
            CheckStatus::Unknown => "unknown",
            CheckStatus::Failed => "failed",
            CheckStatus::TimedOut => "timed out",
            CheckStatus::ActionRequired => "action required",
            CheckStatus::Canceled => "canceled",
            CheckStatus::Neutral => "neutral",
            CheckStatus::Queued => "queued",
            CheckStatus::InProgress => "in progress",
            CheckStatus::Passed => "passed",
        }
    }

    pub fn color(&self) -> Color {
        match self {
            CheckStatus::Passed => Color::Green,
            CheckStatus::Queued | CheckStatus::InProgress => Color::Blue,
            CheckStatus::Failed | CheckStatus::TimedOut => Color::Red,
            CheckStatus::Unknown
            | CheckStatus::ActionRequired
            | CheckStatus::Canceled
            | CheckStatus::Neutral => Color::Yellow,
        }
    }
}

impl std::fmt::Display for CheckStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_unknown() {
        assert_eq!(CheckStatus::default(), CheckStatus::Unknown);
    }

    #[test]
    fn test_ranks_follow_severity_order() {
        for (i, status) in CheckStatus::ALL.iter().enumerate() {
            assert_eq!(status.rank() as usize, i);
        }
        assert_eq!(CheckStatus::Unknown.rank(), 0);
        assert_eq!(CheckStatus::Passed.rank(), 8);
    }

    #[test]
    fn test_combine_picks_more_severe() {
        assert_eq!(
            CheckStatus::Passed.combine(CheckStatus::InProgress),
            CheckStatus::InProgress
        );
        assert_eq!(
            CheckStatus::Failed.combine(CheckStatus::Unknown),
            CheckStatus::Unknown
        );
        assert_eq!(
            CheckStatus::Queued.combine(CheckStatus::TimedOut),
            CheckStatus::TimedOut
        );
    }

    #[test]
    fn test_unknown_dominates_everything() {
        for status in CheckStatus::ALL {
            assert_eq!(status.combine(CheckStatus::Unknown), CheckStatus::Unknown);
            assert_eq!(CheckStatus::Unknown.combine(status), CheckStatus::Unknown);
        }
    }

    #[test]
    fn test_status_text() {
        assert_eq!(CheckStatus::TimedOut.to_string(), "timed out");
        assert_eq!(CheckStatus::ActionRequired.to_string(), "action required");
        assert_eq!(CheckStatus::InProgress.to_string(), "in progress");
        assert_eq!(CheckStatus::Canceled.to_string(), "canceled");
    }

    #[test]
    fn test_colors() {
        assert_eq!(CheckStatus::Passed.color(), Color::Green);
        assert_eq!(CheckStatus::Queued.color(), Color::Blue);
        assert_eq!(CheckStatus::InProgress.color(), Color::Blue);
        assert_eq!(CheckStatus::Failed.color(), Color::Red);
        assert_eq!(CheckStatus::TimedOut.color(), Color::Red);
        for status in [
            CheckStatus::Unknown,
            CheckStatus::ActionRequired,
            CheckStatus::Canceled,
            CheckStatus::Neutral,
        ] {
            assert_eq!(status.color(), Color::Yellow);
        }
        assert_eq!(Color::Green.to_string(), "brightgreen");
    }
}
