//! Key/Value Cache
//!
//! Short-lived values with a TTL (verification codes). Two backends:
//! - [`RedisCache`] for deployments, every call bounded by a timeout
//! - [`MemoryCache`] for local development and tests
//!
//! Both implement an atomic compare-and-delete so a value can be consumed at
//! most once even when two requests race for it.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use redis::Script;
use redis::aio::ConnectionManager;
use thiserror::Error;
use tokio::sync::Mutex;
use tokio::time::Instant;

use crate::crypto::constant_time_eq;

/// Cache result type alias
pub type CacheResult<T> = Result<T, CacheError>;

/// Cache backend failures
#[derive(Debug, Error)]
pub enum CacheError {
    #[error("Cache backend error: {0}")]
    Backend(#[from] redis::RedisError),

    #[error("Cache operation timed out after {0:?}")]
    Timeout(Duration),
}

/// TTL cache trait
#[trait_variant::make(KeyValueCache: Send)]
pub trait LocalKeyValueCache {
    /// Store `value` under `key` for `ttl`, replacing any previous value
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()>;

    /// Delete `key` only if it currently holds `expected`
    ///
    /// Returns `true` when the value matched and was removed. A missing,
    /// expired or different value leaves the cache untouched.
    async fn take_if_equals(&self, key: &str, expected: &str) -> CacheResult<bool>;
}

// ============================================================================
// Redis
// ============================================================================

const TAKE_IF_EQUALS_SCRIPT: &str = r#"
if redis.call('GET', KEYS[1]) == ARGV[1] then
    return redis.call('DEL', KEYS[1])
else
    return 0
end
"#;

/// Redis-backed cache
#[derive(Clone)]
pub struct RedisCache {
    conn: ConnectionManager,
    op_timeout: Duration,
}

impl RedisCache {
    /// Connect and verify the server is reachable
    pub async fn connect(url: &str, op_timeout: Duration) -> CacheResult<Self> {
        let client = redis::Client::open(url)?;
        let conn = tokio::time::timeout(op_timeout, ConnectionManager::new(client))
            .await
            .map_err(|_| CacheError::Timeout(op_timeout))??;

        tracing::info!(timeout_ms = op_timeout.as_millis() as u64, "Connected to Redis");

        Ok(Self { conn, op_timeout })
    }

    async fn bounded<T, F>(&self, fut: F) -> CacheResult<T>
    where
        F: Future<Output = redis::RedisResult<T>>,
    {
        match tokio::time::timeout(self.op_timeout, fut).await {
            Ok(result) => result.map_err(CacheError::from),
            Err(_) => Err(CacheError::Timeout(self.op_timeout)),
        }
    }
}

impl KeyValueCache for RedisCache {
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let mut conn = self.conn.clone();
        let ttl_ms = ttl.as_millis().max(1) as u64;

        self.bounded(async move {
            let _: () = redis::cmd("SET")
                .arg(key)
                .arg(value)
                .arg("PX")
                .arg(ttl_ms)
                .query_async(&mut conn)
                .await?;
            Ok(())
        })
        .await
    }

    async fn take_if_equals(&self, key: &str, expected: &str) -> CacheResult<bool> {
        let mut conn = self.conn.clone();

        self.bounded(async move {
            let deleted: i32 = Script::new(TAKE_IF_EQUALS_SCRIPT)
                .key(key)
                .arg(expected)
                .invoke_async(&mut conn)
                .await?;
            Ok(deleted == 1)
        })
        .await
    }
}

// ============================================================================
// In-memory
// ============================================================================

struct Entry {
    value: String,
    expires_at: Instant,
}

/// Process-local cache
///
/// Clones share the same map.
#[derive(Clone, Default)]
pub struct MemoryCache {
    entries: Arc<Mutex<HashMap<String, Entry>>>,
}

impl MemoryCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of live (unexpired) entries
    pub async fn len(&self) -> usize {
        let now = Instant::now();
        self.entries
            .lock()
            .await
            .values()
            .filter(|e| e.expires_at > now)
            .count()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

impl KeyValueCache for MemoryCache {
    async fn set_with_ttl(&self, key: &str, value: &str, ttl: Duration) -> CacheResult<()> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        entries.retain(|_, e| e.expires_at > now);
        entries.insert(
            key.to_string(),
            Entry {
                value: value.to_string(),
                expires_at: now + ttl,
            },
        );

        Ok(())
    }

    async fn take_if_equals(&self, key: &str, expected: &str) -> CacheResult<bool> {
        let now = Instant::now();
        let mut entries = self.entries.lock().await;

        let matches = match entries.get(key) {
            Some(entry) if entry.expires_at <= now => {
                entries.remove(key);
                false
            }
            Some(entry) => constant_time_eq(entry.value.as_bytes(), expected.as_bytes()),
            None => false,
        };

        if matches {
            entries.remove(key);
        }

        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::{Duration, KeyValueCache, MemoryCache};

    const TTL: Duration = Duration::from_secs(60);

    #[tokio::test]
    async fn test_take_if_equals_consumes_once() {
        let cache = MemoryCache::new();
        cache.set_with_ttl("k", "123456", TTL).await.unwrap();

        assert!(cache.take_if_equals("k", "123456").await.unwrap());
        assert!(!cache.take_if_equals("k", "123456").await.unwrap());
        assert!(cache.is_empty().await);
    }

    #[tokio::test]
    async fn test_mismatch_leaves_value() {
        let cache = MemoryCache::new();
        cache.set_with_ttl("k", "123456", TTL).await.unwrap();

        assert!(!cache.take_if_equals("k", "000000").await.unwrap());
        assert!(cache.take_if_equals("k", "123456").await.unwrap());
    }

    #[tokio::test]
    async fn test_overwrite_replaces_previous_value() {
        let cache = MemoryCache::new();
        cache.set_with_ttl("k", "111111", TTL).await.unwrap();
        cache.set_with_ttl("k", "222222", TTL).await.unwrap();

        assert!(!cache.take_if_equals("k", "111111").await.unwrap());
        assert!(cache.take_if_equals("k", "222222").await.unwrap());
    }

    #[tokio::test]
    async fn test_expired_value_never_matches() {
        let cache = MemoryCache::new();
        cache.set_with_ttl("k", "123456", Duration::ZERO).await.unwrap();

        assert!(!cache.take_if_equals("k", "123456").await.unwrap());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn test_concurrent_takes_single_winner() {
        let cache = MemoryCache::new();
        cache.set_with_ttl("k", "123456", TTL).await.unwrap();

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let cache = cache.clone();
                tokio::spawn(async move { cache.take_if_equals("k", "123456").await.unwrap() })
            })
            .collect();

        let mut winners = 0;
        for handle in handles {
            if handle.await.unwrap() {
                winners += 1;
            }
        }
        assert_eq!(winners, 1);
    }
}
