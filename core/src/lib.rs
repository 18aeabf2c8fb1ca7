//! # Vaultcore Core
//!
//! Trust core of the Vaultcore secrets-management platform. This crate
//! contains the token lifecycle service (issue, validate, revoke, sweep),
//! the encryption-materials cache, and the collaborator traits they are
//! wired against.

pub mod domain;
pub mod errors;
pub mod repositories;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::entities::token::{
    AuthToken, PrincipalType, SessionTokenRecord, TokenClaims, TokenRepresentation,
};
pub use errors::{DomainError, DomainResult, TokenError};
pub use repositories::{MockTokenStore, TokenStore};
pub use services::{
    AcceptMode, AuthTokenService, CachingKeyProvider, ClaimsCodec, Clock, EncryptionMaterials,
    ExpiredTokenSweeper, IdSource, IssueMode, JwtClaimsCodec, KeyProvider, MaterialsCacheConfig,
    MaterialsRequest, MetricsSink, NoopMetrics, SweepReport, SweeperConfig, SystemClock, TokenKind,
    TokenServiceConfig, UuidSource,
};
