//! Business services containing the trust-core logic.

pub mod encryption;
pub mod metrics;
pub mod suppliers;
pub mod token;

// Re-export commonly used types
pub use encryption::{CachingKeyProvider, EncryptionMaterials, KeyProvider, MaterialsCacheConfig, MaterialsRequest};
pub use metrics::{MetricsSink, NoopMetrics, TokenKind};
pub use suppliers::{Clock, IdSource, SystemClock, UuidSource};
pub use token::{
    AcceptMode, AuthTokenService, ClaimsCodec, ExpiredTokenSweeper, IssueMode, JwtClaimsCodec,
    SweepReport, SweeperConfig, TokenServiceConfig,
};
