//! Badgr Core Library
//!
//! Check-status aggregation and badge resolution for CI status badges.
//!
//! A request flows through [`RequestPipeline`]: warm cache, then a fresh
//! [`BadgeService`] lookup (usually [`CheckResolver`] over [`GitHubClient`]),
//! then the cold cache, then an error badge.

pub mod aggregator;
pub mod domain;
pub mod fakes;
pub mod github;
pub mod obs;
pub mod pipeline;
pub mod provider;
pub mod render;
pub mod resolver;
pub mod telemetry;

pub use domain::{
    Badge, BadgeError, BadgeQuery, BadgeRequestOptions, CheckResult, CheckStatus, Color,
    ProviderError, Result, DEFAULT_BADGE_NAME, DEFAULT_BRANCH,
};

pub use aggregator::combine;
pub use github::{GitHubClient, GitHubConfig};
pub use pipeline::{
    Outcome, RequestPipeline, Resolution, DEFAULT_CACHE_WRITE_BUDGET, DEFAULT_RESOLVE_TIMEOUT,
};
pub use provider::{CheckSuitePage, CheckSuiteQuery, CheckSuiteSource};
pub use render::badge_url;
pub use resolver::{BadgeService, CheckResolver};

pub use obs::request_span;
pub use telemetry::init_tracing;

/// Badgr version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
