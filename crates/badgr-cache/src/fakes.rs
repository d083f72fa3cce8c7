//! In-memory fakes for cache traits (testing only)
//!
//! Provides `MemoryStore` (a `KvStore`) and `ScriptedCache` (a `Cache`) that
//! satisfy the trait contracts without Redis. Both record every call so tests
//! can assert on what the pipeline did, not just what it returned.

use std::collections::{HashMap, HashSet};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;

use crate::error::CacheError;
use crate::storage_traits::*;

// ---------------------------------------------------------------------------
// MemoryStore
// ---------------------------------------------------------------------------

/// One recorded `set_ex` call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedWrite {
    pub key: String,
    pub value: String,
    pub ttl: Duration,
}

/// In-memory `KvStore` backed by a `HashMap<key, value>`.
///
/// TTLs are recorded but never enforced. Keys can be marked as failing for
/// reads or writes to simulate a broken backend.
#[derive(Debug, Default)]
pub struct MemoryStore {
    values: Mutex<HashMap<String, String>>,
    writes: Mutex<Vec<RecordedWrite>>,
    failing_reads: Mutex<HashSet<String>>,
    failing_writes: Mutex<HashSet<String>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a value directly, bypassing write recording.
    pub fn insert(&self, key: &str, value: &str) {
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
    }

    /// Make every subsequent `get(key)` fail.
    pub fn fail_reads_for(&self, key: &str) {
        self.failing_reads.lock().unwrap().insert(key.to_string());
    }

    /// Make every subsequent `set_ex(key, ..)` fail.
    pub fn fail_writes_for(&self, key: &str) {
        self.failing_writes.lock().unwrap().insert(key.to_string());
    }

    /// All `set_ex` calls in order, including failed ones.
    pub fn writes(&self) -> Vec<RecordedWrite> {
        self.writes.lock().unwrap().clone()
    }

    pub fn value(&self, key: &str) -> Option<String> {
        self.values.lock().unwrap().get(key).cloned()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        if self.failing_reads.lock().unwrap().contains(key) {
            return Err(CacheError::Connection(format!("read of {key} refused")));
        }
        Ok(self.values.lock().unwrap().get(key).cloned())
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        self.writes.lock().unwrap().push(RecordedWrite {
            key: key.to_string(),
            value: value.to_string(),
            ttl,
        });
        if self.failing_writes.lock().unwrap().contains(key) {
            return Err(CacheError::Command(format!("write of {key} refused")));
        }
        self.values
            .lock()
            .unwrap()
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// ScriptedCache
// ---------------------------------------------------------------------------

/// Scripted outcome for one tier read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TierOutcome {
    Hit(String),
    Miss,
    Fail,
}

/// A call observed by [`ScriptedCache`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CacheCall {
    GetWarm(String),
    GetCold(String),
    Set { key: String, value: String },
}

/// `Cache` whose reads return fixed outcomes and whose writes are recorded.
#[derive(Debug)]
pub struct ScriptedCache {
    warm: TierOutcome,
    cold: TierOutcome,
    fail_set: bool,
    set_delay: Option<Duration>,
    calls: Mutex<Vec<CacheCall>>,
}

impl Default for ScriptedCache {
    fn default() -> Self {
        Self {
            warm: TierOutcome::Miss,
            cold: TierOutcome::Miss,
            fail_set: false,
            set_delay: None,
            calls: Mutex::new(Vec::new()),
        }
    }
}

impl ScriptedCache {
    /// Cache that misses on both tiers and accepts writes.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_warm(mut self, outcome: TierOutcome) -> Self {
        self.warm = outcome;
        self
    }

    pub fn with_cold(mut self, outcome: TierOutcome) -> Self {
        self.cold = outcome;
        self
    }

    /// Make `set` fail on both tiers.
    pub fn failing_set(mut self) -> Self {
        self.fail_set = true;
        self
    }

    /// Make `set` sleep after recording the call.
    pub fn with_set_delay(mut self, delay: Duration) -> Self {
        self.set_delay = Some(delay);
        self
    }

    pub fn calls(&self) -> Vec<CacheCall> {
        self.calls.lock().unwrap().clone()
    }

    /// Values passed to `set`, in order.
    pub fn sets(&self) -> Vec<(String, String)> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                CacheCall::Set { key, value } => Some((key, value)),
                _ => None,
            })
            .collect()
    }

    fn read(&self, tier: Tier, key: &str) -> CacheResult<Option<String>> {
        let outcome = match tier {
            Tier::Warm => &self.warm,
            Tier::Cold => &self.cold,
        };
        match outcome {
            TierOutcome::Hit(v) => Ok(Some(v.clone())),
            TierOutcome::Miss => Ok(None),
            TierOutcome::Fail => Err(CacheError::Read {
                tier,
                key: key.to_string(),
                source: Box::new(CacheError::Connection("scripted failure".to_string())),
            }),
        }
    }
}

#[async_trait]
impl Cache for ScriptedCache {
    async fn set(&self, key: &str, value: &str) -> CacheResult<()> {
        self.calls.lock().unwrap().push(CacheCall::Set {
            key: key.to_string(),
            value: value.to_string(),
        });
        if let Some(delay) = self.set_delay {
            tokio::time::sleep(delay).await;
        }
        if self.fail_set {
            return Err(CacheError::Write {
                key: key.to_string(),
                failures: vec![
                    (Tier::Warm, CacheError::Command("scripted failure".to_string())),
                    (Tier::Cold, CacheError::Command("scripted failure".to_string())),
                ],
            });
        }
        Ok(())
    }

    async fn get_warm(&self, key: &str) -> CacheResult<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .push(CacheCall::GetWarm(key.to_string()));
        self.read(Tier::Warm, key)
    }

    async fn get_cold(&self, key: &str) -> CacheResult<Option<String>> {
        self.calls
            .lock()
            .unwrap()
            .push(CacheCall::GetCold(key.to_string()));
        self.read(Tier::Cold, key)
    }
}
