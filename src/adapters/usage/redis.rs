//! Redis-backed usage store for production deployments.
//!
//! Each (user, day) counter is a Redis hash mirroring the remote document
//! layout: count, user_id, date, updated_at. The conditional consume runs
//! as a single EVAL script so the under-ceiling check and the increment
//! are one atomic server-side step and a denial never increments.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::{AsyncCommands, Script};

use crate::domain::foundation::Timestamp;
use crate::domain::quota::UsageKey;
use crate::ports::{ConsumeOutcome, UsageStore, UsageStoreError};

/// Superseded counters age out of the cache after two days. This is cache
/// hygiene only; the quota logic never addresses a past day's key.
const DEFAULT_TTL_SECS: u64 = 2 * 24 * 60 * 60;

// Returns the new count on consume, or the negated current count when the
// ceiling was reached.
const CONSUME_SCRIPT: &str = r#"
local count = tonumber(redis.call('HGET', KEYS[1], 'count') or '0')
if count >= tonumber(ARGV[1]) then
  return -count
end
count = redis.call('HINCRBY', KEYS[1], 'count', 1)
redis.call('HSET', KEYS[1], 'user_id', ARGV[2], 'date', ARGV[3], 'updated_at', ARGV[4])
if count == 1 then
  redis.call('EXPIRE', KEYS[1], ARGV[5])
end
return count
"#;

/// Redis-backed usage store for multi-server deployments.
#[derive(Clone)]
pub struct RedisUsageStore {
    conn: MultiplexedConnection,
    consume_script: Script,
    ttl_secs: u64,
}

impl RedisUsageStore {
    /// Creates a new Redis usage store.
    pub fn new(conn: MultiplexedConnection) -> Self {
        Self {
            conn,
            consume_script: Script::new(CONSUME_SCRIPT),
            ttl_secs: DEFAULT_TTL_SECS,
        }
    }

    /// Overrides the counter TTL.
    pub fn with_ttl_secs(mut self, ttl_secs: u64) -> Self {
        self.ttl_secs = ttl_secs;
        self
    }

    fn redis_key(key: &UsageKey) -> String {
        format!("usage:{}", key.storage_key())
    }
}

#[async_trait]
impl UsageStore for RedisUsageStore {
    async fn count(&self, key: &UsageKey) -> Result<u64, UsageStoreError> {
        let mut conn = self.conn.clone();

        let count: Option<i64> = conn
            .hget(Self::redis_key(key), "count")
            .await
            .map_err(|e: redis::RedisError| UsageStoreError::Unavailable(e.to_string()))?;

        match count {
            Some(n) if n < 0 => Err(UsageStoreError::CorruptRecord {
                key: key.storage_key(),
                reason: format!("negative count {}", n),
            }),
            Some(n) => Ok(n as u64),
            None => Ok(0),
        }
    }

    async fn try_consume(
        &self,
        key: &UsageKey,
        ceiling: u32,
    ) -> Result<ConsumeOutcome, UsageStoreError> {
        let mut conn = self.conn.clone();

        let result: i64 = self
            .consume_script
            .key(Self::redis_key(key))
            .arg(i64::from(ceiling))
            .arg(key.user_id().as_str())
            .arg(key.day().to_string())
            .arg(Timestamp::now().as_unix_secs())
            .arg(self.ttl_secs)
            .invoke_async(&mut conn)
            .await
            .map_err(|e: redis::RedisError| UsageStoreError::Unavailable(e.to_string()))?;

        if result > 0 {
            Ok(ConsumeOutcome::Consumed {
                new_count: result as u64,
            })
        } else {
            Ok(ConsumeOutcome::LimitReached {
                count: result.unsigned_abs(),
            })
        }
    }
}

impl std::fmt::Debug for RedisUsageStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisUsageStore")
            .field("ttl_secs", &self.ttl_secs)
            .finish_non_exhaustive()
    }
}
