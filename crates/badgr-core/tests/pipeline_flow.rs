//! End-to-end pipeline tests over the real tiered cache and check resolver.
//!
//! The Redis and GitHub edges are replaced by in-memory fakes; everything in
//! between (key layout, TTLs, pagination, aggregation, fallback order) is the
//! production code path.

use std::sync::Arc;
use std::time::Duration;

use badgr_cache::fakes::MemoryStore;
use badgr_cache::{cache_key, Tier, TieredCache};
use badgr_core::fakes::PagedSource;
use badgr_core::{BadgeQuery, CheckResolver, CheckResult, Outcome, RequestPipeline};

const IDENTITY: &str = "/v1/github/checks/acme/widget/badge.svg";

fn pipeline(store: &Arc<MemoryStore>, source: &Arc<PagedSource>, prefix: &str) -> RequestPipeline {
    let cache = Arc::new(TieredCache::new(store.clone(), prefix));
    let resolver = Arc::new(CheckResolver::new(source.clone()));
    RequestPipeline::new(cache, resolver)
}

#[tokio::test]
async fn fresh_result_is_written_to_both_tiers() {
    let store = Arc::new(MemoryStore::new());
    let source = Arc::new(PagedSource::new(vec![
        vec![CheckResult::completed("success")],
        vec![CheckResult::new("in_progress", None)],
    ]));

    let res = pipeline(&store, &source, "")
        .serve(IDENTITY, "acme", "widget", BadgeQuery::default())
        .await;

    assert_eq!(res.outcome, Outcome::Fresh);
    assert_eq!(
        res.url,
        "https://img.shields.io/static/v1?label=build&message=in%20progress&color=blue"
    );

    let writes = store.writes();
    assert_eq!(writes.len(), 2);
    assert_eq!(writes[0].key, cache_key("", Tier::Warm, IDENTITY));
    assert_eq!(writes[0].ttl, Duration::from_secs(60));
    assert_eq!(writes[1].key, cache_key("", Tier::Cold, IDENTITY));
    assert_eq!(writes[1].ttl, Duration::from_secs(24 * 60 * 60));
    assert!(writes.iter().all(|w| w.value == res.url));
}

#[tokio::test]
async fn second_request_is_served_warm() {
    let store = Arc::new(MemoryStore::new());
    let source = Arc::new(PagedSource::new(vec![vec![CheckResult::completed(
        "success",
    )]]));
    let pipeline = pipeline(&store, &source, "prod");

    let first = pipeline
        .serve(IDENTITY, "acme", "widget", BadgeQuery::default())
        .await;
    let second = pipeline
        .serve(IDENTITY, "acme", "widget", BadgeQuery::default())
        .await;

    assert_eq!(first.outcome, Outcome::Fresh);
    assert_eq!(second.outcome, Outcome::WarmHit);
    assert_eq!(second.url, first.url);
    assert_eq!(source.requested_pages(), vec![1]);
}

#[tokio::test]
async fn provider_outage_serves_last_known_cold_value() {
    let store = Arc::new(MemoryStore::new());
    let healthy = Arc::new(PagedSource::new(vec![vec![CheckResult::completed(
        "failure",
    )]]));
    let known = pipeline(&store, &healthy, "")
        .serve(IDENTITY, "acme", "widget", BadgeQuery::default())
        .await;

    // Warm tier unreachable and the provider down: only cold is left.
    store.fail_reads_for(&cache_key("", Tier::Warm, IDENTITY));
    let broken = Arc::new(PagedSource::new(vec![]).failing_on_page(1));
    let res = pipeline(&store, &broken, "")
        .serve(IDENTITY, "acme", "widget", BadgeQuery::default())
        .await;

    assert_eq!(res.outcome, Outcome::ColdHit);
    assert_eq!(res.url, known.url);
}

#[tokio::test]
async fn cold_start_outage_serves_500_badge() {
    let store = Arc::new(MemoryStore::new());
    let broken = Arc::new(PagedSource::new(vec![]).failing_on_page(1));

    let res = pipeline(&store, &broken, "")
        .serve(IDENTITY, "acme", "widget", BadgeQuery::default())
        .await;

    assert_eq!(res.outcome, Outcome::Exhausted);
    assert_eq!(
        res.url,
        "https://img.shields.io/static/v1?label=error&message=500&color=red"
    );
    assert!(store.writes().is_empty());
}

#[tokio::test]
async fn query_options_reach_the_provider() {
    let store = Arc::new(MemoryStore::new());
    let source = Arc::new(PagedSource::new(vec![vec![CheckResult::completed(
        "success",
    )]]));
    let query = BadgeQuery {
        name: Some("tests".to_string()),
        app_id: Some("15368".to_string()),
        branch: Some("develop".to_string()),
    };

    let res = pipeline(&store, &source, "")
        .serve(IDENTITY, "acme", "widget", query)
        .await;

    assert_eq!(
        res.url,
        "https://img.shields.io/static/v1?label=tests&message=passed&color=brightgreen"
    );
    let seen = source.queries();
    assert_eq!(seen[0].git_ref, "develop");
    assert_eq!(seen[0].app_id, Some(15368));
}

#[tokio::test]
async fn invalid_app_id_never_reaches_cache_or_provider() {
    let store = Arc::new(MemoryStore::new());
    let source = Arc::new(PagedSource::new(vec![vec![]]));
    let query = BadgeQuery {
        app_id: Some("-4".to_string()),
        ..Default::default()
    };

    let res = pipeline(&store, &source, "")
        .serve(IDENTITY, "acme", "widget", query)
        .await;

    assert_eq!(res.outcome, Outcome::InvalidRequest);
    assert!(res.url.contains("message=400"));
    assert!(store.writes().is_empty());
    assert!(source.queries().is_empty());
}
