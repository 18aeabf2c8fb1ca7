//! Token store trait defining the interface for session-token persistence.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::time::Duration;

use crate::domain::entities::token::SessionTokenRecord;
use crate::errors::DomainResult;

/// Store trait for opaque session-token records
///
/// Records are keyed by the one-way hash of the raw secret; the secret
/// itself never reaches the store. Implementations must be safe under
/// concurrent access from many request handlers plus the background
/// sweeper.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist a new session-token record
    ///
    /// # Returns
    /// * `Ok(())` - Record persisted
    /// * `Err(DomainError)` - Persistence failed (e.g., duplicate hash)
    async fn insert(&self, record: SessionTokenRecord) -> DomainResult<()>;

    /// Find a record by the hash of its raw secret
    ///
    /// # Returns
    /// * `Ok(Some(record))` - Record found
    /// * `Ok(None)` - No record with the given hash
    /// * `Err(DomainError)` - Store error occurred
    async fn find_by_hash(&self, token_hash: &str) -> DomainResult<Option<SessionTokenRecord>>;

    /// Delete a record by hash (physical revocation)
    ///
    /// # Returns
    /// * `Ok(true)` - A record was deleted
    /// * `Ok(false)` - No record with the given hash
    async fn delete_by_hash(&self, token_hash: &str) -> DomainResult<bool>;

    /// Delete expired records in bounded batches
    ///
    /// Deletes records with `expires <= now`, at most `batch_size` per
    /// batch and at most `max_delete` in total, pausing `batch_pause`
    /// between batches to bound contention on the backing store. Each
    /// batch commits independently; records inserted concurrently may be
    /// missed and are picked up by a later sweep.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of records actually deleted
    async fn delete_expired(
        &self,
        now: DateTime<Utc>,
        max_delete: usize,
        batch_size: usize,
        batch_pause: Duration,
    ) -> DomainResult<usize>;
}
