//! Token entities: the caller-facing auth token and its two wire
//! representations.
//!
//! A token is either an opaque session secret whose hash is persisted in
//! the token store, or a self-describing signed claims bundle. Both
//! project onto the same [`AuthToken`] view so the service can treat them
//! uniformly after decoding.

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{DomainError, DomainResult, TokenError};

/// Issuer claim on signed tokens
pub const JWT_ISSUER: &str = "vaultcore";

/// Audience claim on signed tokens
pub const JWT_AUDIENCE: &str = "vaultcore-api";

/// The kind of identity a token represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PrincipalType {
    /// A human caller
    User,
    /// A machine caller (application, service)
    Machine,
}

impl PrincipalType {
    /// Canonical lowercase name
    pub fn as_str(&self) -> &'static str {
        match self {
            PrincipalType::User => "user",
            PrincipalType::Machine => "machine",
        }
    }

    /// Parse from a canonical name; unknown names are an error, never a
    /// default
    pub fn from_name(name: &str) -> DomainResult<Self> {
        match name {
            "user" => Ok(PrincipalType::User),
            "machine" => Ok(PrincipalType::Machine),
            other => Err(DomainError::Validation {
                message: format!("unknown principal type: {}", other),
            }),
        }
    }
}

/// The validated, caller-facing authentication token
///
/// The raw token string exists only at issuance and validation
/// boundaries; it is never persisted and cannot be reconstructed from a
/// stored hash.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthToken {
    /// Unique token identifier
    pub id: Uuid,

    /// Raw token string handed to the caller
    pub token: String,

    /// When the token was issued
    pub created: DateTime<Utc>,

    /// When the token expires
    pub expires: DateTime<Utc>,

    /// The authenticated identity
    pub principal: String,

    /// Whether the principal is a human or a machine
    pub principal_type: PrincipalType,

    /// Administrator flag
    pub is_admin: bool,

    /// Group memberships
    pub groups: Vec<String>,

    /// How many times this token has been refreshed
    pub refresh_count: u32,
}

impl AuthToken {
    /// Creates a new auth token, enforcing `expires > created`
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        token: String,
        created: DateTime<Utc>,
        expires: DateTime<Utc>,
        principal: String,
        principal_type: PrincipalType,
        is_admin: bool,
        groups: Vec<String>,
        refresh_count: u32,
    ) -> DomainResult<Self> {
        if expires <= created {
            return Err(DomainError::Internal {
                message: format!(
                    "token expiration {} is not after creation {}",
                    expires, created
                ),
            });
        }

        Ok(Self {
            id,
            token,
            created,
            expires,
            principal,
            principal_type,
            is_admin,
            groups,
            refresh_count,
        })
    }

    /// Checks whether the token is still valid at the given instant
    pub fn is_valid_at(&self, now: DateTime<Utc>) -> bool {
        now < self.expires
    }
}

/// Stored record for an opaque session token
///
/// Only the one-way hash of the secret is persisted. Groups are carried
/// as a comma-joined string in the record, matching the store schema, and
/// split on projection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionTokenRecord {
    /// Unique token identifier
    pub id: Uuid,

    /// One-way hash of the raw secret
    pub token_hash: String,

    /// When the token was issued
    pub created: DateTime<Utc>,

    /// When the token expires
    pub expires: DateTime<Utc>,

    /// The authenticated identity
    pub principal: String,

    /// Whether the principal is a human or a machine
    pub principal_type: PrincipalType,

    /// Administrator flag
    pub is_admin: bool,

    /// Comma-joined group memberships
    pub groups: String,

    /// How many times this token has been refreshed
    pub refresh_count: u32,
}

impl SessionTokenRecord {
    /// Checks whether the record has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires
    }
}

/// Claims carried inline by a self-describing signed token
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenClaims {
    /// JWT ID (unique token identifier)
    pub jti: String,

    /// Subject (the principal)
    pub sub: String,

    /// Issued-at timestamp (epoch seconds)
    pub iat: i64,

    /// Expiration timestamp (epoch seconds)
    pub exp: i64,

    /// Issuer
    pub iss: String,

    /// Audience
    pub aud: String,

    /// Whether the principal is a human or a machine
    pub principal_type: PrincipalType,

    /// Administrator flag
    pub is_admin: bool,

    /// Comma-joined group memberships
    pub groups: String,

    /// How many times this token has been refreshed
    pub refresh_count: u32,
}

impl TokenClaims {
    /// Creates claims for a new signed token
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        id: Uuid,
        principal: String,
        principal_type: PrincipalType,
        is_admin: bool,
        groups: String,
        created: DateTime<Utc>,
        expires: DateTime<Utc>,
        refresh_count: u32,
    ) -> Self {
        Self {
            jti: id.to_string(),
            sub: principal,
            iat: created.timestamp(),
            exp: expires.timestamp(),
            iss: JWT_ISSUER.to_string(),
            aud: JWT_AUDIENCE.to_string(),
            principal_type,
            is_admin,
            groups,
            refresh_count,
        }
    }

    /// Expiration as a UTC timestamp
    pub fn expires(&self) -> DomainResult<DateTime<Utc>> {
        Utc.timestamp_opt(self.exp, 0)
            .single()
            .ok_or(DomainError::Token(TokenError::InvalidClaims))
    }

    /// Issued-at as a UTC timestamp
    pub fn created(&self) -> DomainResult<DateTime<Utc>> {
        Utc.timestamp_opt(self.iat, 0)
            .single()
            .ok_or(DomainError::Token(TokenError::InvalidClaims))
    }
}

/// A decoded token in either representation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TokenRepresentation {
    /// Opaque session token resolved from the store
    Session(SessionTokenRecord),
    /// Self-describing signed token resolved from its claims
    Signed(TokenClaims),
}

impl TokenRepresentation {
    /// Expiration instant of either representation
    pub fn expires(&self) -> DomainResult<DateTime<Utc>> {
        match self {
            TokenRepresentation::Session(record) => Ok(record.expires),
            TokenRepresentation::Signed(claims) => claims.expires(),
        }
    }

    /// Projects either representation onto the uniform caller-facing view
    ///
    /// The raw token string is supplied by the caller because it is never
    /// part of a stored record.
    pub fn into_auth_token(self, raw_token: String) -> DomainResult<AuthToken> {
        match self {
            TokenRepresentation::Session(record) => AuthToken::new(
                record.id,
                raw_token,
                record.created,
                record.expires,
                record.principal,
                record.principal_type,
                record.is_admin,
                split_groups(&record.groups),
                record.refresh_count,
            ),
            TokenRepresentation::Signed(claims) => {
                let created = claims.created()?;
                let expires = claims.expires()?;
                let id = Uuid::parse_str(&claims.jti).map_err(|_| {
                    DomainError::Token(TokenError::MissingClaim {
                        claim: "jti".to_string(),
                    })
                })?;
                AuthToken::new(
                    id,
                    raw_token,
                    created,
                    expires,
                    claims.sub,
                    claims.principal_type,
                    claims.is_admin,
                    split_groups(&claims.groups),
                    claims.refresh_count,
                )
            }
        }
    }
}

/// Splits a comma-joined group string into memberships, dropping blanks
pub fn split_groups(groups: &str) -> Vec<String> {
    groups
        .split(',')
        .map(str::trim)
        .filter(|g| !g.is_empty())
        .map(str::to_string)
        .collect()
}

/// Joins group memberships into the comma-joined stored form
pub fn join_groups(groups: &[String]) -> String {
    groups.join(",")
}
