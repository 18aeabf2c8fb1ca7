//! Token service: issues, validates, revokes, and sweeps auth tokens
//!
//! The service is a stateless orchestrator over the token store and the
//! claims codec. Which representation it issues and which it accepts are
//! fixed at construction by [`TokenServiceConfig`].

use chrono::{DateTime, Duration, Utc};
use std::sync::Arc;
use std::time::Duration as StdDuration;
use tracing::{debug, info, warn};

use crate::domain::entities::token::{
    join_groups, AuthToken, PrincipalType, SessionTokenRecord, TokenClaims, TokenRepresentation,
};
use crate::errors::{DomainError, DomainResult};
use crate::repositories::TokenStore;
use crate::services::metrics::{MetricsSink, NoopMetrics, TokenKind};
use crate::services::suppliers::{Clock, IdSource, SystemClock, UuidSource};

use super::codec::ClaimsCodec;
use super::config::{AcceptMode, IssueMode, TokenServiceConfig};
use super::hasher::{SecureTokenGenerator, TokenHasher};

/// Service managing the auth-token lifecycle
///
/// Holds no mutable state of its own; all persistence lives behind the
/// store and codec collaborators, so a single instance is safely shared
/// across request handlers via `Arc`.
pub struct AuthTokenService<S: TokenStore, C: ClaimsCodec> {
    store: Arc<S>,
    codec: Arc<C>,
    clock: Arc<dyn Clock>,
    ids: Arc<dyn IdSource>,
    metrics: Arc<dyn MetricsSink>,
    config: TokenServiceConfig,
}

impl<S: TokenStore, C: ClaimsCodec> AuthTokenService<S, C> {
    /// Creates a new token service with system time, random ids, and no
    /// metrics reporting
    pub fn new(store: Arc<S>, codec: Arc<C>, config: TokenServiceConfig) -> Self {
        Self::with_collaborators(
            store,
            codec,
            config,
            Arc::new(SystemClock),
            Arc::new(UuidSource),
            Arc::new(NoopMetrics),
        )
    }

    /// Creates a new token service with explicit time, id, and metrics
    /// collaborators
    pub fn with_collaborators(
        store: Arc<S>,
        codec: Arc<C>,
        config: TokenServiceConfig,
        clock: Arc<dyn Clock>,
        ids: Arc<dyn IdSource>,
        metrics: Arc<dyn MetricsSink>,
    ) -> Self {
        Self {
            store,
            codec,
            clock,
            ids,
            metrics,
            config,
        }
    }

    /// Issues a new token for a principal
    ///
    /// # Arguments
    ///
    /// * `principal` - The authenticated identity; must not be blank
    /// * `principal_type` - Human or machine
    /// * `is_admin` - Administrator flag
    /// * `groups` - Group memberships
    /// * `ttl_minutes` - Token lifetime; must be positive
    /// * `refresh_count` - Carried refresh counter
    ///
    /// # Returns
    ///
    /// * `Ok(AuthToken)` - The issued token with its raw string filled in
    /// * `Err(DomainError)` - Invalid input or collaborator failure
    #[allow(clippy::too_many_arguments)]
    pub async fn generate(
        &self,
        principal: &str,
        principal_type: PrincipalType,
        is_admin: bool,
        groups: &[String],
        ttl_minutes: i64,
        refresh_count: u32,
    ) -> DomainResult<AuthToken> {
        if principal.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "the principal must be set and not empty".to_string(),
            });
        }
        if ttl_minutes <= 0 {
            return Err(DomainError::Validation {
                message: format!("token ttl must be positive, got {} minutes", ttl_minutes),
            });
        }

        let id = self.ids.next_id();
        let now = self.clock.now();
        let expires = now + Duration::minutes(ttl_minutes);

        let (token, representation) = match self.config.issue_mode {
            IssueMode::Jwt => {
                let claims = TokenClaims::new(
                    id,
                    principal.to_string(),
                    principal_type,
                    is_admin,
                    join_groups(groups),
                    now,
                    expires,
                    refresh_count,
                );
                let token = self.codec.sign(&claims).await?;
                self.metrics.token_issued(TokenKind::Jwt);
                (token, TokenRepresentation::Signed(claims))
            }
            IssueMode::Session => {
                let token = SecureTokenGenerator::generate();
                let record = SessionTokenRecord {
                    id,
                    token_hash: TokenHasher::hash(&token),
                    created: now,
                    expires,
                    principal: principal.to_string(),
                    principal_type,
                    is_admin,
                    groups: join_groups(groups),
                    refresh_count,
                };
                self.store.insert(record.clone()).await?;
                self.metrics.token_issued(TokenKind::Session);
                (token, TokenRepresentation::Session(record))
            }
        };

        debug!(token_id = %id, "issued token for principal");
        representation.into_auth_token(token)
    }

    /// Validates a raw token and returns its caller-facing view
    ///
    /// Returns `Ok(None)` when the token is unknown, malformed, revoked,
    /// or expired; callers cannot distinguish these cases, by design. The
    /// expiry check runs against the service clock regardless of which
    /// path resolved the token.
    pub async fn validate(&self, raw_token: &str) -> DomainResult<Option<AuthToken>> {
        let representation = match self.config.accept_mode {
            AcceptMode::Jwt => self.resolve_signed(raw_token).await?,
            AcceptMode::Session => self.resolve_session(raw_token).await?,
            AcceptMode::All => {
                if self.codec.looks_like_signed_token(raw_token) {
                    self.resolve_signed(raw_token).await?
                } else {
                    self.resolve_session(raw_token).await?
                }
            }
        };

        let Some(representation) = representation else {
            self.metrics.token_validated(false);
            return Ok(None);
        };

        let now = self.clock.now();
        let expires = representation.expires()?;
        if expires <= now {
            warn!(%expires, %now, "discarding expired token at validation");
            self.metrics.token_validated(false);
            return Ok(None);
        }

        let token = representation.into_auth_token(raw_token.to_string())?;
        self.metrics.token_validated(true);
        Ok(Some(token))
    }

    /// Revokes a token
    ///
    /// Session tokens are deleted from the store outright; signed tokens
    /// have their id recorded on the revocation list until `expires_hint`
    /// passes. A committed revoke makes the very next validation of the
    /// same token return absent. Revoking an already-invalid token is a
    /// no-op.
    pub async fn revoke(&self, raw_token: &str, expires_hint: DateTime<Utc>) -> DomainResult<()> {
        match self.config.accept_mode {
            AcceptMode::Jwt => self.revoke_signed(raw_token, expires_hint).await,
            AcceptMode::Session => self.revoke_session(raw_token).await,
            AcceptMode::All => {
                if self.codec.looks_like_signed_token(raw_token) {
                    self.revoke_signed(raw_token, expires_hint).await
                } else {
                    self.revoke_session(raw_token).await
                }
            }
        }
    }

    /// Deletes expired session-token records in bounded batches
    ///
    /// Applies only to the store-backed representation; signed tokens
    /// self-expire. Never raises on a partial batch: the count actually
    /// deleted is returned and the sweep converges over repeated
    /// invocations.
    pub async fn sweep_expired(
        &self,
        max_delete: usize,
        batch_size: usize,
        batch_pause: StdDuration,
    ) -> DomainResult<usize> {
        self.store
            .delete_expired(self.clock.now(), max_delete, batch_size, batch_pause)
            .await
    }

    /// Drops revocation-list entries whose expiration has passed
    pub async fn prune_revocations(&self) -> DomainResult<usize> {
        self.codec.prune_revocations(self.clock.now()).await
    }

    async fn resolve_session(&self, raw_token: &str) -> DomainResult<Option<TokenRepresentation>> {
        let hash = TokenHasher::hash(raw_token);
        Ok(self
            .store
            .find_by_hash(&hash)
            .await?
            .map(TokenRepresentation::Session))
    }

    async fn resolve_signed(&self, raw_token: &str) -> DomainResult<Option<TokenRepresentation>> {
        Ok(self
            .codec
            .verify_and_decode(raw_token)
            .await?
            .map(TokenRepresentation::Signed))
    }

    async fn revoke_session(&self, raw_token: &str) -> DomainResult<()> {
        let hash = TokenHasher::hash(raw_token);
        let deleted = self.store.delete_by_hash(&hash).await?;
        if deleted {
            self.metrics.token_revoked(TokenKind::Session);
        }
        Ok(())
    }

    async fn revoke_signed(
        &self,
        raw_token: &str,
        expires_hint: DateTime<Utc>,
    ) -> DomainResult<()> {
        let Some(claims) = self.codec.verify_and_decode(raw_token).await? else {
            // Already invalid; nothing to record
            return Ok(());
        };

        info!(token_id = %claims.jti, "revoking signed token");
        self.codec
            .record_revocation(&claims.jti, expires_hint)
            .await?;
        self.metrics.token_revoked(TokenKind::Jwt);
        Ok(())
    }
}
