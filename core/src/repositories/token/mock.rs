//! In-memory implementation of TokenStore for testing

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::RwLock;

use crate::domain::entities::token::SessionTokenRecord;
use crate::errors::{DomainError, DomainResult};

use super::r#trait::TokenStore;

/// Mock token store for testing
///
/// Implements the batched expired-record delete faithfully, including the
/// inter-batch pause, so sweeper behavior can be exercised without a real
/// datastore.
pub struct MockTokenStore {
    records: Arc<RwLock<HashMap<String, SessionTokenRecord>>>,
}

impl MockTokenStore {
    /// Create a new mock store
    pub fn new() -> Self {
        Self {
            records: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Number of records currently held
    pub async fn len(&self) -> usize {
        self.records.read().await.len()
    }

    /// Whether the store is empty
    pub async fn is_empty(&self) -> bool {
        self.records.read().await.is_empty()
    }
}

impl Default for MockTokenStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl TokenStore for MockTokenStore {
    async fn insert(&self, record: SessionTokenRecord) -> DomainResult<()> {
        let mut records = self.records.write().await;

        // Hash collision means the same secret was issued twice
        if records.contains_key(&record.token_hash) {
            return Err(DomainError::Internal {
                message: "token hash already exists".to_string(),
            });
        }

        records.insert(record.token_hash.clone(), record);
        Ok(())
    }

    async fn find_by_hash(&self, token_hash: &str) -> DomainResult<Option<SessionTokenRecord>> {
        let records = self.records.read().await;
        Ok(records.get(token_hash).cloned())
    }

    async fn delete_by_hash(&self, token_hash: &str) -> DomainResult<bool> {
        let mut records = self.records.write().await;
        Ok(records.remove(token_hash).is_some())
    }

    async fn delete_expired(
        &self,
        now: DateTime<Utc>,
        max_delete: usize,
        batch_size: usize,
        batch_pause: Duration,
    ) -> DomainResult<usize> {
        let batch_size = batch_size.max(1);
        let mut deleted = 0;

        while deleted < max_delete {
            // Each batch takes the lock independently, so inserts and
            // lookups interleave between batches.
            let batch: Vec<String> = {
                let records = self.records.read().await;
                records
                    .values()
                    .filter(|r| r.is_expired_at(now))
                    .take(batch_size.min(max_delete - deleted))
                    .map(|r| r.token_hash.clone())
                    .collect()
            };

            if batch.is_empty() {
                break;
            }

            {
                let mut records = self.records.write().await;
                for hash in &batch {
                    if records.remove(hash).is_some() {
                        deleted += 1;
                    }
                }
            }

            if deleted < max_delete && !batch_pause.is_zero() {
                tokio::time::sleep(batch_pause).await;
            }
        }

        Ok(deleted)
    }
}
