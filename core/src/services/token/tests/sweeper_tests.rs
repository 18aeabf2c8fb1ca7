//! Unit tests for the expired-token sweeper

use chrono::Duration;
use std::sync::Arc;
use std::time::Duration as StdDuration;
use uuid::Uuid;

use crate::domain::entities::token::{PrincipalType, SessionTokenRecord};
use crate::repositories::{MockTokenStore, TokenStore};
use crate::services::suppliers::Clock;
use crate::services::token::{
    AcceptMode, AuthTokenService, ClaimsCodec, ExpiredTokenSweeper, IssueMode, JwtClaimsCodec,
    SweeperConfig, TokenServiceConfig,
};

use super::mocks::{CountingMetrics, ManualClock, SequentialIdSource};

struct Harness {
    service: Arc<AuthTokenService<MockTokenStore, JwtClaimsCodec>>,
    store: Arc<MockTokenStore>,
    codec: Arc<JwtClaimsCodec>,
    clock: Arc<ManualClock>,
}

fn harness() -> Harness {
    let store = Arc::new(MockTokenStore::new());
    let codec = Arc::new(JwtClaimsCodec::new("test-secret").unwrap());
    let clock = Arc::new(ManualClock::new());

    let service = Arc::new(AuthTokenService::with_collaborators(
        store.clone(),
        codec.clone(),
        TokenServiceConfig {
            issue_mode: IssueMode::Session,
            accept_mode: AcceptMode::All,
        },
        clock.clone(),
        Arc::new(SequentialIdSource::new()),
        Arc::new(CountingMetrics::new()),
    ));

    Harness {
        service,
        store,
        codec,
        clock,
    }
}

async fn seed(h: &Harness, expired: usize, live: usize) {
    let now = h.clock.now();
    for i in 0..expired {
        h.store
            .insert(record(&format!("expired-{}", i), now - Duration::minutes(5), now - Duration::minutes(1)))
            .await
            .unwrap();
    }
    for i in 0..live {
        h.store
            .insert(record(&format!("live-{}", i), now, now + Duration::minutes(60)))
            .await
            .unwrap();
    }
}

fn record(
    hash: &str,
    created: chrono::DateTime<chrono::Utc>,
    expires: chrono::DateTime<chrono::Utc>,
) -> SessionTokenRecord {
    SessionTokenRecord {
        id: Uuid::new_v4(),
        token_hash: hash.to_string(),
        created,
        expires,
        principal: "app/foo".to_string(),
        principal_type: PrincipalType::Machine,
        is_admin: false,
        groups: String::new(),
        refresh_count: 0,
    }
}

fn config(max_delete: usize, batch_size: usize) -> SweeperConfig {
    SweeperConfig {
        enabled: true,
        interval_seconds: 3600,
        max_delete,
        batch_size,
        batch_pause: StdDuration::from_millis(1),
    }
}

#[tokio::test]
async fn test_sweep_removes_exactly_the_expired_records() {
    // N expired, M live, max_delete = N + M: exactly N go, all M stay
    for batch_size in [1, 3, 100] {
        let h = harness();
        seed(&h, 7, 4).await;

        let deleted = h
            .service
            .sweep_expired(11, batch_size, StdDuration::from_millis(1))
            .await
            .unwrap();

        assert_eq!(deleted, 7, "batch_size={}", batch_size);
        assert_eq!(h.store.len().await, 4);

        // Live records are untouched
        for i in 0..4 {
            assert!(h
                .store
                .find_by_hash(&format!("live-{}", i))
                .await
                .unwrap()
                .is_some());
        }
    }
}

#[tokio::test]
async fn test_sweep_respects_max_delete() {
    let h = harness();
    seed(&h, 10, 0).await;

    let deleted = h
        .service
        .sweep_expired(4, 2, StdDuration::from_millis(1))
        .await
        .unwrap();

    assert_eq!(deleted, 4);
    assert_eq!(h.store.len().await, 6);

    // A later sweep converges on the rest
    let deleted = h
        .service
        .sweep_expired(100, 2, StdDuration::from_millis(1))
        .await
        .unwrap();
    assert_eq!(deleted, 6);
    assert!(h.store.is_empty().await);
}

#[tokio::test]
async fn test_sweep_on_empty_store_deletes_nothing() {
    let h = harness();
    let deleted = h
        .service
        .sweep_expired(100, 10, StdDuration::from_millis(1))
        .await
        .unwrap();
    assert_eq!(deleted, 0);
}

#[tokio::test]
async fn test_run_sweep_reports_tokens_and_revocations() {
    let h = harness();
    seed(&h, 3, 2).await;

    let now = h.clock.now();
    h.codec
        .record_revocation("stale", now - Duration::minutes(1))
        .await
        .unwrap();
    h.codec
        .record_revocation("current", now + Duration::minutes(30))
        .await
        .unwrap();

    let sweeper = ExpiredTokenSweeper::new(h.service.clone(), config(100, 2));
    let report = sweeper.run_sweep().await;

    assert!(report.is_success());
    assert_eq!(report.tokens_deleted, 3);
    assert_eq!(report.revocations_pruned, 1);
    assert_eq!(report.total_removed(), 4);
    assert_eq!(h.store.len().await, 2);
}

#[tokio::test]
async fn test_disabled_sweeper_does_nothing() {
    let h = harness();
    seed(&h, 5, 0).await;

    let mut cfg = config(100, 10);
    cfg.enabled = false;

    let sweeper = ExpiredTokenSweeper::new(h.service.clone(), cfg);
    let report = sweeper.run_sweep().await;

    assert_eq!(report.tokens_deleted, 0);
    assert_eq!(h.store.len().await, 5);
}

#[tokio::test]
async fn test_sweep_only_touches_records_expired_at_the_service_clock() {
    let h = harness();
    let now = h.clock.now();

    h.store
        .insert(record("soon", now, now + Duration::minutes(1)))
        .await
        .unwrap();

    // Not expired yet
    let deleted = h
        .service
        .sweep_expired(10, 10, StdDuration::from_millis(1))
        .await
        .unwrap();
    assert_eq!(deleted, 0);

    // Advance past the expiry and sweep again
    h.clock.advance(Duration::minutes(2));
    let deleted = h
        .service
        .sweep_expired(10, 10, StdDuration::from_millis(1))
        .await
        .unwrap();
    assert_eq!(deleted, 1);
}
