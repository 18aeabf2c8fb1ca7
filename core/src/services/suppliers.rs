//! Injected time and identifier sources
//!
//! The token service never calls `Utc::now()` or `Uuid::new_v4()`
//! directly; it takes these suppliers so issuance and expiry checks are
//! deterministic under test.

use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Source of the current time
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> DateTime<Utc>;
}

/// Wall-clock implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Source of fresh token identifiers
pub trait IdSource: Send + Sync {
    /// Next unique identifier
    fn next_id(&self) -> Uuid;
}

/// Random UUID v4 implementation
#[derive(Debug, Default, Clone, Copy)]
pub struct UuidSource;

impl IdSource for UuidSource {
    fn next_id(&self) -> Uuid {
        Uuid::new_v4()
    }
}
