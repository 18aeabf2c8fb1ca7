//! Caching decorator over a key provider
//!
//! Entries expire on two independent bounds: age and use count. Either
//! bound configured as 0 is not enforced. When the cache is full the
//! least-recently-used entry is evicted. Stale entries are dropped lazily
//! on access.
//!
//! Concurrent misses on the same fingerprint are NOT coalesced: each may
//! invoke the inner provider and the last insert wins. Materials for the
//! same fingerprint are fungible, so this is a deliberate relaxation that
//! keeps the compute path free of locks, not single-flight.

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use vault_shared::config::MaterialsCacheSettings;

use crate::errors::DomainResult;
use crate::services::metrics::{MetricsSink, NoopMetrics};
use crate::services::suppliers::{Clock, SystemClock};

use super::key_provider::KeyProvider;
use super::materials::{EncryptionMaterials, MaterialsRequest};

/// Configuration for the materials cache
#[derive(Debug, Clone, Copy)]
pub struct MaterialsCacheConfig {
    /// Whether caching is enabled at all
    pub enabled: bool,
    /// Maximum number of entries (0 = unbounded)
    pub max_size: usize,
    /// Maximum age of an entry in seconds (0 = no age bound)
    pub max_age_seconds: u64,
    /// Maximum number of uses per entry (0 = no use-count bound)
    pub message_use_limit: u64,
}

impl Default for MaterialsCacheConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            max_size: 1000,
            max_age_seconds: 120,
            message_use_limit: 200,
        }
    }
}

impl From<&MaterialsCacheSettings> for MaterialsCacheConfig {
    fn from(settings: &MaterialsCacheSettings) -> Self {
        Self {
            enabled: settings.enabled,
            max_size: settings.max_size,
            max_age_seconds: settings.max_age_seconds,
            message_use_limit: settings.message_use_limit,
        }
    }
}

struct CacheEntry {
    materials: EncryptionMaterials,
    created_at: DateTime<Utc>,
    last_used: DateTime<Utc>,
    use_count: u64,
}

impl CacheEntry {
    fn is_live(&self, now: DateTime<Utc>, config: &MaterialsCacheConfig) -> bool {
        if config.max_age_seconds > 0 {
            let age = now - self.created_at;
            if age > Duration::seconds(config.max_age_seconds as i64) {
                return false;
            }
        }
        if config.message_use_limit > 0 && self.use_count >= config.message_use_limit {
            return false;
        }
        true
    }
}

/// Key provider decorator that caches derived materials
///
/// Owns its entries exclusively; callers receive clones and cannot mutate
/// cached state. A failed computation is never stored.
pub struct CachingKeyProvider<P: KeyProvider> {
    inner: P,
    config: MaterialsCacheConfig,
    clock: Arc<dyn Clock>,
    metrics: Arc<dyn MetricsSink>,
    entries: RwLock<HashMap<String, CacheEntry>>,
}

impl<P: KeyProvider> CachingKeyProvider<P> {
    /// Creates a caching decorator with system time and no metrics
    /// reporting
    pub fn new(inner: P, config: MaterialsCacheConfig) -> Self {
        Self::with_collaborators(inner, config, Arc::new(SystemClock), Arc::new(NoopMetrics))
    }

    /// Creates a caching decorator with explicit time and metrics
    /// collaborators
    pub fn with_collaborators(
        inner: P,
        config: MaterialsCacheConfig,
        clock: Arc<dyn Clock>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            inner,
            config,
            clock,
            metrics,
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Number of entries currently cached
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    /// Whether the cache holds no entries
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }

    /// Looks up a live entry, bumping its use counter and recency
    async fn lookup(&self, fingerprint: &str) -> Option<EncryptionMaterials> {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;

        match entries.get_mut(fingerprint) {
            Some(entry) if entry.is_live(now, &self.config) => {
                entry.use_count += 1;
                entry.last_used = now;
                Some(entry.materials.clone())
            }
            Some(_) => {
                // Stale; drop lazily and treat as a miss
                entries.remove(fingerprint);
                None
            }
            None => None,
        }
    }

    /// Inserts freshly computed materials, evicting the LRU entry if at
    /// capacity
    async fn insert(&self, fingerprint: String, materials: &EncryptionMaterials) {
        let now = self.clock.now();
        let mut entries = self.entries.write().await;

        if self.config.max_size > 0
            && entries.len() >= self.config.max_size
            && !entries.contains_key(&fingerprint)
        {
            let lru = entries
                .iter()
                .min_by_key(|(_, entry)| entry.last_used)
                .map(|(fp, _)| fp.clone());
            if let Some(fp) = lru {
                debug!("evicting least-recently-used materials entry");
                entries.remove(&fp);
                self.metrics.cache_eviction();
            }
        }

        entries.insert(
            fingerprint,
            CacheEntry {
                materials: materials.clone(),
                created_at: now,
                last_used: now,
                use_count: 1,
            },
        );
    }
}

#[async_trait]
impl<P: KeyProvider> KeyProvider for CachingKeyProvider<P> {
    async fn derive_materials(
        &self,
        request: &MaterialsRequest,
    ) -> DomainResult<EncryptionMaterials> {
        if !self.config.enabled {
            // Degenerate cache of size zero
            self.metrics.cache_miss();
            return self.inner.derive_materials(request).await;
        }

        let fingerprint = request.fingerprint();

        if let Some(materials) = self.lookup(&fingerprint).await {
            self.metrics.cache_hit();
            return Ok(materials);
        }

        self.metrics.cache_miss();

        // Computed with no lock held; concurrent misses may race and the
        // last insert wins. A failure propagates uncached.
        let materials = self.inner.derive_materials(request).await?;
        self.insert(fingerprint, &materials).await;

        Ok(materials)
    }
}
