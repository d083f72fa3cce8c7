//! Check-status aggregation.
//!
//! Reduces any number of independently reported check suites into the single
//! status a badge shows: the most severe one.

use crate::domain::{CheckResult, CheckStatus};

/// Combine check results into one badge status.
///
/// Empty input yields [`CheckStatus::Unknown`]. Otherwise each result is
/// mapped on its own and the most severe mapping wins, so one failing (or
/// unrecognized) suite drags the badge down no matter how many passed.
pub fn combine<'a, I>(results: I) -> CheckStatus
where
    I: IntoIterator<Item = &'a CheckResult>,
{
    results
        .into_iter()
        .map(CheckResult::check_status)
        .min()
        .unwrap_or_default()
}
