//! Badgr-Cache: two-tier result cache for rendered badges
//!
//! This crate holds the persistence side of Badgr. A rendered badge URL is
//! written to two independent tiers:
//!
//! - **warm**: short TTL, consulted first on every request
//! - **cold**: long TTL, consulted only when a fresh lookup fails
//!
//! ## Key Components
//!
//! - `Cache`: the contract the request pipeline depends on
//! - `TieredCache`: implements `Cache` over any `KvStore`
//! - `RedisStore`: Redis-backed `KvStore`
//! - `fakes`: in-memory stores and caches for tests

mod error;
pub mod fakes;
pub mod redis_store;
pub mod storage_traits;

pub use error::CacheError;
pub use redis_store::{RedisConfig, RedisStore};
pub use storage_traits::{cache_key, Cache, CacheResult, KvStore, Tier, TieredCache};
