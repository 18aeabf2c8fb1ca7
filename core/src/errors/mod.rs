//! Domain-specific error types for the trust core.
//!
//! Unknown and expired tokens are deliberately not errors: `validate`
//! surfaces both as an absent result so callers cannot distinguish them.
//! The variants here cover caller mistakes, wiring mistakes, and upstream
//! collaborator failures.

use thiserror::Error;

/// Token-related errors raised by the claims codec
#[derive(Error, Debug)]
pub enum TokenError {
    #[error("Invalid token format")]
    InvalidTokenFormat,

    #[error("Token signature verification failed")]
    InvalidSignature,

    #[error("Invalid token claims")]
    InvalidClaims,

    #[error("Token generation failed")]
    TokenGenerationFailed,

    #[error("Missing required claim: {claim}")]
    MissingClaim { claim: String },
}

/// Core domain errors (general purpose)
#[derive(Error, Debug)]
pub enum DomainError {
    /// Caller-supplied input rejected before any side effect
    #[error("Validation error: {message}")]
    Validation { message: String },

    /// Service wiring that cannot work; fatal, never silently defaulted
    #[error("Misconfiguration: {message}")]
    Misconfiguration { message: String },

    /// A backing collaborator (store, key provider) failed; propagated
    /// uncached and unretried by this layer
    #[error("Upstream failure: {message}")]
    Upstream { message: String },

    #[error("Internal error: {message}")]
    Internal { message: String },

    // Bridge to specific error types
    #[error(transparent)]
    Token(#[from] TokenError),
}

pub type DomainResult<T> = Result<T, DomainError>;
