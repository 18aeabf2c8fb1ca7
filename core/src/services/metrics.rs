//! Metrics sink collaborator for token and cache events.
//!
//! Counters only; no token material, principal, or key bytes ever reach a
//! metric.

/// Which representation a token event concerns
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// Opaque session token
    Session,
    /// Self-describing signed token
    Jwt,
}

/// Counter-only metrics collaborator
///
/// Implementations must be cheap and non-blocking; these hooks sit on the
/// request path.
pub trait MetricsSink: Send + Sync {
    /// A token was issued
    fn token_issued(&self, kind: TokenKind);

    /// A token was presented for validation
    fn token_validated(&self, valid: bool);

    /// A token was revoked
    fn token_revoked(&self, kind: TokenKind);

    /// Materials cache lookup hit a live entry
    fn cache_hit(&self);

    /// Materials cache lookup missed (absent or stale)
    fn cache_miss(&self);

    /// A cache entry was evicted to make room
    fn cache_eviction(&self);
}

/// Metrics sink that discards everything
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopMetrics;

impl MetricsSink for NoopMetrics {
    fn token_issued(&self, _kind: TokenKind) {}
    fn token_validated(&self, _valid: bool) {}
    fn token_revoked(&self, _kind: TokenKind) {}
    fn cache_hit(&self) {}
    fn cache_miss(&self) {}
    fn cache_eviction(&self) {}
}
