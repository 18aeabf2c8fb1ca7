//! Token lifecycle module
//!
//! This module handles all token-related operations including:
//! - Token issuance in either representation (opaque session or signed)
//! - Uniform validation with a single expiry rule
//! - Physical (session) and logical (signed) revocation
//! - Batched background sweeping of expired records

mod codec;
mod config;
mod hasher;
mod service;
mod sweeper;

#[cfg(test)]
mod tests;

pub use codec::{ClaimsCodec, JwtClaimsCodec};
pub use config::{AcceptMode, IssueMode, TokenServiceConfig};
pub use hasher::{SecureTokenGenerator, TokenHasher, SECRET_LENGTH};
pub use service::AuthTokenService;
pub use sweeper::{ExpiredTokenSweeper, SweepReport, SweeperConfig};
