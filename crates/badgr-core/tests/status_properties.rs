use badgr_core::{combine, CheckResult, CheckStatus};
use proptest::prelude::*;
use proptest::test_runner::Config;

const STATUSES: &[&str] = &["queued", "in_progress", "completed", "requested", "bogus"];
const CONCLUSIONS: &[&str] = &[
    "success",
    "failure",
    "neutral",
    "cancelled",
    "timed_out",
    "action_required",
    "stale",
    "skipped",
];

fn check_result() -> impl Strategy<Value = CheckResult> {
    (
        prop::sample::select(STATUSES),
        prop::option::of(prop::sample::select(CONCLUSIONS)),
    )
        .prop_map(|(status, conclusion)| CheckResult::new(status, conclusion))
}

proptest! {
    #![proptest_config(Config::with_cases(256))]

    #[test]
    fn combine_ignores_order(mut results in prop::collection::vec(check_result(), 0..24)) {
        let forward = combine(&results);
        results.reverse();
        prop_assert_eq!(combine(&results), forward);
    }

    #[test]
    fn combine_is_most_severe_member(results in prop::collection::vec(check_result(), 1..24)) {
        let combined = combine(&results);
        for result in &results {
            prop_assert!(combined.rank() <= result.check_status().rank());
        }
        prop_assert!(results.iter().any(|r| r.check_status() == combined));
    }

    #[test]
    fn combine_splits_over_concatenation(
        left in prop::collection::vec(check_result(), 0..12),
        right in prop::collection::vec(check_result(), 0..12),
    ) {
        let mut all = left.clone();
        all.extend(right.iter().cloned());
        let expected = if left.is_empty() {
            combine(&right)
        } else if right.is_empty() {
            combine(&left)
        } else {
            combine(&left).combine(combine(&right))
        };
        prop_assert_eq!(combine(&all), expected);
    }

    #[test]
    fn status_combine_is_commutative(
        a in prop::sample::select(CheckStatus::ALL.to_vec()),
        b in prop::sample::select(CheckStatus::ALL.to_vec()),
    ) {
        prop_assert_eq!(a.combine(b), b.combine(a));
    }
}
