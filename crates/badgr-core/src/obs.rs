//! Structured observability hooks for badge request resolution.
//!
//! This module provides:
//! - [`request_span`], a request-scoped span for `.instrument()`
//! - Emission functions for each pipeline outcome: warm hit, fresh
//!   resolution, cache write failure, cold fallback, exhaustion
//!
//! Events are emitted at `info!` (outcomes) or `warn!` (degradations) with an
//! `event` field so log pipelines can count them.

use tracing::{info, warn};

/// Request-scoped span for async handlers, to be attached with
/// [`tracing::Instrument`] rather than entered across `.await` points.
pub fn request_span(request: &str) -> tracing::Span {
    let request_id = uuid::Uuid::new_v4();
    tracing::info_span!("badgr.request", request_id = %request_id, request = %request)
}

/// Emit event: served straight from the warm tier.
pub fn emit_warm_hit(key: &str) {
    info!(event = "badge.warm_hit", key = %key);
}

/// Emit event: warm tier lookup failed (warning level).
pub fn emit_warm_error(key: &str, error: &dyn std::fmt::Display) {
    warn!(event = "badge.warm_error", key = %key, error = %error);
}

/// Emit event: fresh badge computed.
pub fn emit_resolved(key: &str, status: &str, duration_ms: u64) {
    info!(
        event = "badge.resolved",
        key = %key,
        status = %status,
        duration_ms = duration_ms,
    );
}

/// Emit event: fresh badge could not be written to cache (warning level).
pub fn emit_cache_write_error(key: &str, error: &dyn std::fmt::Display) {
    warn!(event = "badge.cache_write_error", key = %key, error = %error);
}

/// Emit event: the response stopped waiting for its cache write, which keeps
/// running in the background (warning level).
pub fn emit_cache_write_pending(key: &str, budget_ms: u64) {
    warn!(event = "badge.cache_write_pending", key = %key, budget_ms = budget_ms);
}

/// Emit event: fresh resolution failed (warning level).
pub fn emit_resolve_error(key: &str, error: &dyn std::fmt::Display) {
    warn!(event = "badge.resolve_error", key = %key, error = %error);
}

/// Emit event: served a stale value from the cold tier.
pub fn emit_cold_hit(key: &str) {
    info!(event = "badge.cold_hit", key = %key);
}

/// Emit event: cold tier lookup failed (warning level).
pub fn emit_cold_error(key: &str, error: &dyn std::fmt::Display) {
    warn!(event = "badge.cold_error", key = %key, error = %error);
}

/// Emit event: every fallback failed; serving the error badge.
pub fn emit_exhausted(key: &str) {
    warn!(event = "badge.exhausted", key = %key);
}

/// Emit event: rejected a malformed `appID`.
pub fn emit_invalid_app_id(key: &str, value: &str) {
    info!(event = "badge.invalid_app_id", key = %key, app_id = %value);
}
