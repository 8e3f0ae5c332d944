//! UsageStore adapter implementations.

mod in_memory;
mod postgres;
mod redis;

pub use in_memory::InMemoryUsageStore;
pub use postgres::PostgresUsageStore;
pub use redis::RedisUsageStore;
