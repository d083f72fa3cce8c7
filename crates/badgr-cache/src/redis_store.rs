//! Redis-backed [`KvStore`].
//!
//! All commands share one multiplexed [`ConnectionManager`], opened on first
//! use so the daemon starts even when Redis is briefly unavailable. The manager
//! reconnects on its own after a dropped connection. Every command runs under a
//! per-attempt deadline and is retried a bounded number of times.

use std::future::Future;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::AsyncCommands;
use tokio::sync::OnceCell;
use tokio::time::timeout;
use tracing::debug;

use crate::error::CacheError;
use crate::storage_traits::{CacheResult, KvStore};

/// Connection settings for [`RedisStore`].
#[derive(Debug, Clone)]
pub struct RedisConfig {
    pub host: String,
    pub port: u16,
    pub password: String,
    pub db: i64,
    pub enable_tls: bool,
    /// Deadline for a single command attempt.
    pub command_timeout: Duration,
    /// Attempts per command before giving up (at least one).
    pub max_retries: usize,
}

impl Default for RedisConfig {
    fn default() -> Self {
        RedisConfig {
            host: "localhost".to_string(),
            port: 6379,
            password: String::new(),
            db: 0,
            enable_tls: false,
            command_timeout: Duration::from_secs(1),
            max_retries: 5,
        }
    }
}

impl RedisConfig {
    /// Create config for a specific host with defaults for everything else
    pub fn new(host: &str, port: u16) -> Self {
        RedisConfig {
            host: host.to_string(),
            port,
            ..Self::default()
        }
    }

    /// Connection URL understood by `redis::Client::open`.
    ///
    /// TLS uses the `rediss://` scheme with the host as server name.
    pub fn connection_url(&self) -> String {
        let scheme = if self.enable_tls { "rediss" } else { "redis" };
        if self.password.is_empty() {
            format!("{}://{}:{}/{}", scheme, self.host, self.port, self.db)
        } else {
            format!(
                "{}://:{}@{}:{}/{}",
                scheme,
                urlencoding::encode(&self.password),
                self.host,
                self.port,
                self.db
            )
        }
    }
}

/// Redis implementation of [`KvStore`].
#[derive(Clone)]
pub struct RedisStore {
    client: redis::Client,
    manager: Arc<OnceCell<ConnectionManager>>,
    command_timeout: Duration,
    max_retries: usize,
}

impl RedisStore {
    /// Build a store from config. Does not connect.
    pub fn new(config: &RedisConfig) -> CacheResult<Self> {
        let client = redis::Client::open(config.connection_url())
            .map_err(|e| CacheError::Connection(e.to_string()))?;
        Ok(Self {
            client,
            manager: Arc::new(OnceCell::new()),
            command_timeout: config.command_timeout,
            max_retries: config.max_retries,
        })
    }

    /// Shared connection, opened by the first caller. A failed open leaves the
    /// cell empty so the next attempt tries again.
    async fn connection(&self) -> CacheResult<ConnectionManager> {
        let manager = self
            .manager
            .get_or_try_init(|| ConnectionManager::new(self.client.clone()))
            .await?;
        Ok(manager.clone())
    }

    /// Whether the shared connection has been opened.
    pub fn is_connected(&self) -> bool {
        self.manager.initialized()
    }

    async fn with_retry<T, Fut, F>(&self, mut op: F) -> CacheResult<T>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = CacheResult<T>>,
    {
        let attempts = self.max_retries.max(1);
        let mut last = None;
        for attempt in 0..attempts {
            match timeout(self.command_timeout, op()).await {
                Ok(Ok(v)) => return Ok(v),
                Ok(Err(e)) => last = Some(e),
                Err(_) => last = Some(CacheError::Timeout(self.command_timeout)),
            }
            if attempt + 1 < attempts {
                debug!(attempt = attempt + 1, "retrying redis command");
                tokio::time::sleep(Duration::from_millis(5)).await;
            }
        }
        Err(last.unwrap_or_else(|| CacheError::Command("redis failure".to_string())))
    }
}

#[async_trait]
impl KvStore for RedisStore {
    async fn get(&self, key: &str) -> CacheResult<Option<String>> {
        self.with_retry(|| async move {
            let mut conn = self.connection().await?;
            let value: Option<String> = conn.get(key).await?;
            Ok(value)
        })
        .await
    }

    async fn set_ex(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let secs = ttl.as_secs().max(1);
        self.with_retry(|| async move {
            let mut conn = self.connection().await?;
            let _: () = conn.set_ex(key, value, secs).await?;
            Ok(())
        })
        .await
    }
}
