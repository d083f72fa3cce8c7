//! HTTP surface: badge redirects and a liveness probe.

use axum::extract::rejection::QueryRejection;
use axum::extract::{OriginalUri, Path, Query, State};
use axum::response::Redirect;
use axum::routing::get;
use axum::Router;
use badgr_core::obs::request_span;
use badgr_core::{badge_url, Badge, BadgeQuery, RequestPipeline};
use tracing::{debug, Instrument};

pub const BADGE_ROUTE: &str = "/v1/github/checks/{owner}/{repo}/badge.svg";

pub fn build_router(pipeline: RequestPipeline) -> Router {
    Router::new()
        .route(BADGE_ROUTE, get(github_checks_badge))
        .route("/healthz", get(healthz))
        .with_state(pipeline)
}

/// Redirect to the rendered badge. Always answers `303 See Other`, even when
/// the badge itself reports an error.
async fn github_checks_badge(
    State(pipeline): State<RequestPipeline>,
    Path((owner, repo)): Path<(String, String)>,
    OriginalUri(uri): OriginalUri,
    query: Result<Query<Vec<(String, String)>>, QueryRejection>,
) -> Redirect {
    // The full path and query string keys the cache, so every option
    // combination is cached on its own.
    let identity = uri
        .path_and_query()
        .map(|pq| pq.as_str())
        .unwrap_or_else(|| uri.path())
        .to_string();

    // Decoded as raw pairs so a repeated key keeps its first value instead
    // of failing the whole query.
    let query = match query {
        Ok(Query(pairs)) => BadgeQuery::from_pairs(pairs),
        Err(rejection) => {
            debug!(request = %identity, error = %rejection, "rejected badge query");
            return Redirect::to(&badge_url(&Badge::error(400)));
        }
    };

    let resolution = pipeline
        .serve(&identity, &owner, &repo, query)
        .instrument(request_span(&identity))
        .await;
    debug!(request = %identity, outcome = ?resolution.outcome, "badge resolved");
    Redirect::to(&resolution.url)
}

async fn healthz() -> &'static str {
    "OK"
}
