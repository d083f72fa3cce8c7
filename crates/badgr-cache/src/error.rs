//! Error types for badgr-cache

use std::time::Duration;

use thiserror::Error;

use crate::storage_traits::Tier;

/// Errors that can occur while reading or writing cached badges.
///
/// A cache miss is never represented here; misses are `Ok(None)`.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Could not obtain a connection to the backing store
    #[error("Cache connection failed: {0}")]
    Connection(String),

    /// The backing store rejected or failed a command
    #[error("Cache command failed: {0}")]
    Command(String),

    /// A single command attempt exceeded its deadline
    #[error("Cache command timed out after {0:?}")]
    Timeout(Duration),

    /// Reading one tier failed
    #[error("error retrieving result for key {key:?} from {tier} cache: {source}")]
    Read {
        tier: Tier,
        key: String,
        source: Box<CacheError>,
    },

    /// One or both tier writes failed; both were attempted
    #[error("error writing result for key {key:?} to cache: {}", describe_failures(.failures))]
    Write {
        key: String,
        failures: Vec<(Tier, CacheError)>,
    },
}

impl CacheError {
    /// Tiers whose write failed, in attempt order. Empty for non-write errors.
    pub fn failed_tiers(&self) -> Vec<Tier> {
        match self {
            CacheError::Write { failures, .. } => failures.iter().map(|(tier, _)| *tier).collect(),
            _ => Vec::new(),
        }
    }
}

fn describe_failures(failures: &[(Tier, CacheError)]) -> String {
    failures
        .iter()
        .map(|(tier, err)| format!("{tier} tier: {err}"))
        .collect::<Vec<_>>()
        .join("; ")
}

impl From<redis::RedisError> for CacheError {
    fn from(err: redis::RedisError) -> Self {
        if err.is_connection_refusal() || err.is_connection_dropped() || err.is_io_error() {
            CacheError::Connection(err.to_string())
        } else {
            CacheError::Command(err.to_string())
        }
    }
}
