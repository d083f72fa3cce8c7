//! Storage trait definitions for Badgr
//!
//! Two layers:
//! - `KvStore`: a plain string store with per-write TTLs (Redis in production)
//! - `Cache`: the warm/cold contract the request pipeline depends on
//!
//! `TieredCache` bridges the two so every backend gets the same tier
//! semantics. In-memory fakes for both layers live in the `fakes` module.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;

/// Result type for cache operations
pub type CacheResult<T> = std::result::Result<T, CacheError>;

/// TTL for the warm tier.
pub const WARM_TTL: Duration = Duration::from_secs(60);

/// TTL for the cold tier.
pub const COLD_TTL: Duration = Duration::from_secs(24 * 60 * 60);

/// One of the two independently keyed cache tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Tier {
    Warm,
    Cold,
}

impl Tier {
    /// Tag used inside cache keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Warm => "warm",
            Tier::Cold => "cold",
        }
    }

    /// Expiry applied to every write into this tier.
    pub fn ttl(&self) -> Duration {
        match self {
            Tier::Warm => WARM_TTL,
            Tier::Cold => COLD_TTL,
        }
    }
}

impl std::fmt::Display for Tier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Build the store key for a request identity: `[prefix:]tier:identity`.
pub fn cache_key(prefix: &str, tier: Tier, identity: &str) -> String {
    if prefix.is_empty() {
        format!("{}:{}", tier, identity)
    } else {
        format!("{}:{}:{}", prefix, tier, identity)
    }
}

// ---------------------------------------------------------------------------
// KvStore: raw keyed storage
// ---------------------------------------------------------------------------

/// String key-value store with expiring writes.
///
/// Guarantees:
/// - `get` returns `Ok(None)` for an absent key; only I/O or protocol
///   failures produce `Err`.
/// - `set_ex` overwrites any existing value (last writer wins).
#[async_trait]
pub trait KvStore: Send + Sync {
    async fn get(&self, key: &str) -> CacheResult<Option<String>>;

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;
}

#[async_trait]
impl<S: KvStore + ?Sized> KvStore for Arc<S> {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        (**self).get(key).await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        (**self).set_ex(key, value, ttl).await
    }
}

// ---------------------------------------------------------------------------
// Cache: warm/cold contract
// ---------------------------------------------------------------------------

/// Two-tier cache of rendered badge URLs, keyed by request identity.
///
/// Guarantees:
/// - `set` attempts the warm write and then the cold write, regardless of
///   whether the warm write failed. It errors only after both attempts.
/// - `get_warm`/`get_cold` return `Ok(None)` on a miss.
/// - The tiers never consult each other.
#[async_trait]
pub trait Cache: Send + Sync {
    /// Write `value` into both tiers.
    async fn set(&self, key: &str, value: &str) -> CacheResult<()>;

    /// Read from the warm tier.
    async fn get_warm(&self, key: &str) -> CacheResult<Option<String>>;

    /// Read from the cold tier.
    async fn get_cold(&self, key: &str) -> CacheResult<Option<String>>;
}

/// `Cache` implementation layered over any [`KvStore`].
pub struct TieredCache<S> {
    store: S,
    prefix: String,
}

impl<S: KvStore> TieredCache<S> {
    pub fn new(store: S, prefix: impl Into<String>) -> Self {
        Self {
            store,
            prefix: prefix.into(),
        }
    }

    /// Deployment-wide key prefix ("" when unset).
    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    async fn get_tier(&self, tier: Tier, key: &str) -> CacheResult<Option<String>> {
        let full_key = cache_key(&self.prefix, tier, key);
        match self.store.get(&full_key).await {
            // An empty payload is indistinguishable from a miss for callers.
            Ok(value) => Ok(value.filter(|v| !v.is_empty())),
            Err(e) => Err(CacheError::Read {
                tier,
                key: full_key,
                source: Box::new(e),
            }),
        }
    }
}

#[async_trait]
impl<S: KvStore> Cache for TieredCache<S> {
    async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        let mut failures = Vec::new();
        for tier in [Tier::Warm, Tier::Cold] {
            let full_key = cache_key(&self.prefix, tier, key);
            if let Err(e) = self.store.set_ex(&full_key, value, tier.ttl()).await {
                failures.push((tier, e));
            }
        }
        if failures.is_empty() {
            Ok(())
        } else {
            Err(CacheError::Write {
                key: key.to_string(),
                failures,
            })
        }
    }

    async fn get_warm(&self, key: &str) -> CacheResult<Option<String>> {
        self.get_tier(Tier::Warm, key).await
    }

    async fn get_cold(&self, key: &str) -> CacheResult<Option<String>> {
        self.get_tier(Tier::Cold, key).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cache_key_without_prefix() {
        assert_eq!(
            cache_key("", Tier::Warm, "/v1/github/checks/o/r/badge.svg"),
            "warm:/v1/github/checks/o/r/badge.svg"
        );
    }

    #[test]
    fn test_cache_key_with_prefix() {
        assert_eq!(
            cache_key("staging", Tier::Cold, "/badge.svg?branch=dev"),
            "staging:cold:/badge.svg?branch=dev"
        );
    }

    #[test]
    fn test_tier_ttls() {
        assert_eq!(Tier::Warm.ttl(), Duration::from_secs(60));
        assert_eq!(Tier::Cold.ttl(), Duration::from_secs(86_400));
        assert!(Tier::Warm.ttl() < Tier::Cold.ttl());
    }
}
