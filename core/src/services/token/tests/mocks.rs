//! Test doubles shared by the token service and sweeper tests

use chrono::{DateTime, Duration, TimeZone, Utc};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use uuid::Uuid;

use crate::services::metrics::{MetricsSink, TokenKind};
use crate::services::suppliers::{Clock, IdSource};

/// Clock that only moves when the test says so
pub struct ManualClock {
    now: Mutex<DateTime<Utc>>,
}

impl ManualClock {
    /// Starts at a fixed, whole-second instant
    pub fn new() -> Self {
        Self {
            now: Mutex::new(Utc.timestamp_opt(1_700_000_000, 0).unwrap()),
        }
    }

    pub fn advance(&self, delta: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += delta;
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

/// Id source that hands out a predictable sequence
pub struct SequentialIdSource {
    next: Mutex<u128>,
}

impl SequentialIdSource {
    pub fn new() -> Self {
        Self { next: Mutex::new(1) }
    }
}

impl IdSource for SequentialIdSource {
    fn next_id(&self) -> Uuid {
        let mut next = self.next.lock().unwrap();
        let id = Uuid::from_u128(*next);
        *next += 1;
        id
    }
}

/// Metrics sink that counts every event
#[derive(Default)]
pub struct CountingMetrics {
    pub issued: AtomicUsize,
    pub validated_ok: AtomicUsize,
    pub validated_rejected: AtomicUsize,
    pub revoked: AtomicUsize,
    pub hits: AtomicUsize,
    pub misses: AtomicUsize,
    pub evictions: AtomicUsize,
}

impl CountingMetrics {
    pub fn new() -> Self {
        Self::default()
    }
}

impl MetricsSink for CountingMetrics {
    fn token_issued(&self, _kind: TokenKind) {
        self.issued.fetch_add(1, Ordering::SeqCst);
    }

    fn token_validated(&self, valid: bool) {
        if valid {
            self.validated_ok.fetch_add(1, Ordering::SeqCst);
        } else {
            self.validated_rejected.fetch_add(1, Ordering::SeqCst);
        }
    }

    fn token_revoked(&self, _kind: TokenKind) {
        self.revoked.fetch_add(1, Ordering::SeqCst);
    }

    fn cache_hit(&self) {
        self.hits.fetch_add(1, Ordering::SeqCst);
    }

    fn cache_miss(&self) {
        self.misses.fetch_add(1, Ordering::SeqCst);
    }

    fn cache_eviction(&self) {
        self.evictions.fetch_add(1, Ordering::SeqCst);
    }
}
