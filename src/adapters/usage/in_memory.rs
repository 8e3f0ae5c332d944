//! In-memory usage store for testing and development.
//!
//! Holds the same document shape the remote store would: one record per
//! (user, day) key with a count, the owner, the date string, and a
//! last-update timestamp. The check and the increment happen under one
//! write lock, so this adapter has the atomic-consume guarantee.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::Timestamp;
use crate::domain::quota::UsageKey;
use crate::ports::{ConsumeOutcome, UsageStore, UsageStoreError};

/// One stored counter document.
#[derive(Debug, Clone)]
struct UsageDocument {
    count: u64,
    user_id: String,
    date: String,
    updated_at: Timestamp,
}

/// In-memory usage store for tests and single-process development.
#[derive(Debug, Default)]
pub struct InMemoryUsageStore {
    documents: Arc<RwLock<HashMap<String, UsageDocument>>>,
}

impl InMemoryUsageStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of counter documents currently held.
    ///
    /// Lets tests assert that denied or unlimited paths created nothing.
    pub async fn document_count(&self) -> usize {
        self.documents.read().await.len()
    }

    /// Returns the stored (count, user_id, date, updated_at) fields for a
    /// key, mirroring the remote document layout.
    pub async fn document(&self, key: &UsageKey) -> Option<(u64, String, String, Timestamp)> {
        let documents = self.documents.read().await;
        documents
            .get(&key.storage_key())
            .map(|d| (d.count, d.user_id.clone(), d.date.clone(), d.updated_at))
    }
}

#[async_trait]
impl UsageStore for InMemoryUsageStore {
    async fn count(&self, key: &UsageKey) -> Result<u64, UsageStoreError> {
        let documents = self.documents.read().await;
        Ok(documents.get(&key.storage_key()).map_or(0, |d| d.count))
    }

    async fn try_consume(
        &self,
        key: &UsageKey,
        ceiling: u32,
    ) -> Result<ConsumeOutcome, UsageStoreError> {
        let storage_key = key.storage_key();
        let mut documents = self.documents.write().await;

        let current = documents.get(&storage_key).map_or(0, |d| d.count);
        if current >= u64::from(ceiling) {
            return Ok(ConsumeOutcome::LimitReached { count: current });
        }

        let new_count = current + 1;
        documents.insert(
            storage_key,
            UsageDocument {
                count: new_count,
                user_id: key.user_id().to_string(),
                date: key.day().to_string(),
                updated_at: Timestamp::now(),
            },
        );

        Ok(ConsumeOutcome::Consumed { new_count })
    }
}
