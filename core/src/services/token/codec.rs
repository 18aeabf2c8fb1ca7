//! Claims codec: signing, verification, and revocation of
//! self-describing tokens

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{decode, decode_header, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use std::collections::HashMap;
use tokio::sync::RwLock;
use tracing::debug;

use crate::domain::entities::token::{TokenClaims, JWT_AUDIENCE, JWT_ISSUER};
use crate::errors::{DomainError, DomainResult, TokenError};

/// Codec collaborator for self-describing signed tokens
///
/// Signed tokens are revoked logically: the token id is recorded until the
/// token's natural expiration, and verification treats a recorded id as
/// invalid.
#[async_trait]
pub trait ClaimsCodec: Send + Sync {
    /// Signs claims into a token string
    async fn sign(&self, claims: &TokenClaims) -> DomainResult<String>;

    /// Verifies a token and decodes its claims
    ///
    /// A malformed token, bad signature, or revoked id is `Ok(None)`;
    /// only infrastructure failure is `Err`. Expiry is NOT checked here;
    /// the service enforces it uniformly for both representations.
    async fn verify_and_decode(&self, token: &str) -> DomainResult<Option<TokenClaims>>;

    /// Structural probe: does this string look like a signed token?
    ///
    /// No verification is performed; this only routes a token in
    /// accept-all mode.
    fn looks_like_signed_token(&self, token: &str) -> bool;

    /// Records a logical revocation for a token id until its expiration
    async fn record_revocation(&self, id: &str, expires: DateTime<Utc>) -> DomainResult<()>;

    /// Drops revocation entries whose expiration has passed
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of entries pruned
    async fn prune_revocations(&self, now: DateTime<Utc>) -> DomainResult<usize>;
}

/// JWT implementation of the claims codec (HS256)
pub struct JwtClaimsCodec {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    validation: Validation,
    revocations: RwLock<HashMap<String, DateTime<Utc>>>,
}

impl JwtClaimsCodec {
    /// Creates a codec signing with the given secret
    ///
    /// An empty secret cannot issue verifiable tokens and fails with a
    /// misconfiguration error.
    pub fn new(secret: &str) -> DomainResult<Self> {
        if secret.is_empty() {
            return Err(DomainError::Misconfiguration {
                message: "JWT signing secret must not be empty".to_string(),
            });
        }

        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[JWT_ISSUER]);
        validation.set_audience(&[JWT_AUDIENCE]);
        // Expiry is enforced by the service against its injected clock so
        // both representations share one expiry rule.
        validation.validate_exp = false;
        validation.set_required_spec_claims(&["iss", "aud", "sub", "jti"]);

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            validation,
            revocations: RwLock::new(HashMap::new()),
        })
    }
}

#[async_trait]
impl ClaimsCodec for JwtClaimsCodec {
    async fn sign(&self, claims: &TokenClaims) -> DomainResult<String> {
        let header = Header::new(Algorithm::HS256);
        encode(&header, claims, &self.encoding_key)
            .map_err(|_| DomainError::Token(TokenError::TokenGenerationFailed))
    }

    async fn verify_and_decode(&self, token: &str) -> DomainResult<Option<TokenClaims>> {
        let token_data = match decode::<TokenClaims>(token, &self.decoding_key, &self.validation) {
            Ok(data) => data,
            Err(e) => {
                debug!("rejecting signed token: {}", e);
                return Ok(None);
            }
        };

        let revocations = self.revocations.read().await;
        if revocations.contains_key(&token_data.claims.jti) {
            debug!("rejecting revoked token id: {}", token_data.claims.jti);
            return Ok(None);
        }

        Ok(Some(token_data.claims))
    }

    fn looks_like_signed_token(&self, token: &str) -> bool {
        decode_header(token).is_ok()
    }

    async fn record_revocation(&self, id: &str, expires: DateTime<Utc>) -> DomainResult<()> {
        let mut revocations = self.revocations.write().await;
        revocations.insert(id.to_string(), expires);
        Ok(())
    }

    async fn prune_revocations(&self, now: DateTime<Utc>) -> DomainResult<usize> {
        let mut revocations = self.revocations.write().await;
        let before = revocations.len();
        revocations.retain(|_, expires| *expires > now);
        Ok(before - revocations.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::entities::token::PrincipalType;
    use chrono::Duration;
    use uuid::Uuid;

    fn codec() -> JwtClaimsCodec {
        JwtClaimsCodec::new("test-secret").unwrap()
    }

    fn claims() -> TokenClaims {
        let now = Utc::now();
        TokenClaims::new(
            Uuid::new_v4(),
            "user@example.com".to_string(),
            PrincipalType::User,
            false,
            "group1".to_string(),
            now,
            now + Duration::minutes(60),
            0,
        )
    }

    #[test]
    fn test_empty_secret_is_misconfiguration() {
        let result = JwtClaimsCodec::new("");
        assert!(matches!(
            result,
            Err(DomainError::Misconfiguration { .. })
        ));
    }

    #[tokio::test]
    async fn test_sign_and_verify_round_trip() {
        let codec = codec();
        let claims = claims();

        let token = codec.sign(&claims).await.unwrap();
        let decoded = codec.verify_and_decode(&token).await.unwrap().unwrap();

        assert_eq!(decoded, claims);
    }

    #[tokio::test]
    async fn test_tampered_token_is_rejected() {
        let codec = codec();
        let token = codec.sign(&claims()).await.unwrap();

        // Flip the last signature character
        let mut tampered = token.clone();
        let last = tampered.pop().unwrap();
        tampered.push(if last == 'A' { 'B' } else { 'A' });

        assert!(codec.verify_and_decode(&tampered).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_wrong_secret_is_rejected() {
        let signer = JwtClaimsCodec::new("secret-one").unwrap();
        let verifier = JwtClaimsCodec::new("secret-two").unwrap();

        let token = signer.sign(&claims()).await.unwrap();
        assert!(verifier.verify_and_decode(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_garbage_is_not_a_signed_token() {
        let codec = codec();
        assert!(codec.verify_and_decode("not-a-jwt").await.unwrap().is_none());
        assert!(!codec.looks_like_signed_token("not-a-jwt"));
        assert!(!codec.looks_like_signed_token("aB3dE6fG9hJ2kL5m"));
    }

    #[tokio::test]
    async fn test_signed_token_format_probe() {
        let codec = codec();
        let token = codec.sign(&claims()).await.unwrap();
        assert!(codec.looks_like_signed_token(&token));
    }

    #[tokio::test]
    async fn test_revocation_hides_token() {
        let codec = codec();
        let claims = claims();
        let token = codec.sign(&claims).await.unwrap();

        let expires = claims.expires().unwrap();
        codec.record_revocation(&claims.jti, expires).await.unwrap();

        assert!(codec.verify_and_decode(&token).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_prune_drops_only_passed_revocations() {
        let codec = codec();
        let now = Utc::now();

        codec
            .record_revocation("old", now - Duration::minutes(1))
            .await
            .unwrap();
        codec
            .record_revocation("live", now + Duration::minutes(10))
            .await
            .unwrap();

        let pruned = codec.prune_revocations(now).await.unwrap();
        assert_eq!(pruned, 1);

        // The live revocation still applies
        let pruned = codec.prune_revocations(now).await.unwrap();
        assert_eq!(pruned, 0);
    }
}
