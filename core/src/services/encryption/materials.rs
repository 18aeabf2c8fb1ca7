//! Encryption-materials value types and request fingerprinting

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::fmt;

use crate::errors::{DomainError, DomainResult};

/// A request for envelope-encryption materials
///
/// The fingerprint derived from a request is the cache key: two requests
/// naming the same key ids (in any order) and algorithm are fungible and
/// share materials.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MaterialsRequest {
    key_ids: Vec<String>,
    algorithm: String,
}

impl MaterialsRequest {
    /// Creates a validated request
    ///
    /// Rejected before any side effect: an empty key-id list, a blank key
    /// id, or a blank algorithm.
    pub fn new(key_ids: Vec<String>, algorithm: impl Into<String>) -> DomainResult<Self> {
        let algorithm = algorithm.into();

        if key_ids.is_empty() {
            return Err(DomainError::Validation {
                message: "materials request must name at least one key id".to_string(),
            });
        }
        if key_ids.iter().any(|id| id.trim().is_empty()) {
            return Err(DomainError::Validation {
                message: "materials request key ids must not be blank".to_string(),
            });
        }
        if algorithm.trim().is_empty() {
            return Err(DomainError::Validation {
                message: "materials request algorithm must not be blank".to_string(),
            });
        }

        Ok(Self { key_ids, algorithm })
    }

    /// Target key identifiers
    pub fn key_ids(&self) -> &[String] {
        &self.key_ids
    }

    /// Algorithm parameters
    pub fn algorithm(&self) -> &str {
        &self.algorithm
    }

    /// Deterministic fingerprint used as the cache key
    ///
    /// SHA-256 over the canonical form: key ids sorted, each one
    /// length-prefixed, then the algorithm. The length prefix keeps id
    /// boundaries unambiguous, so no id content can mimic a different id
    /// list. Order of key ids does not affect the fingerprint.
    pub fn fingerprint(&self) -> String {
        let mut sorted = self.key_ids.clone();
        sorted.sort();

        let mut hasher = Sha256::new();
        for id in &sorted {
            hasher.update((id.len() as u64).to_be_bytes());
            hasher.update(id.as_bytes());
        }
        hasher.update(self.algorithm.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Opaque envelope-encryption materials returned by the key provider
///
/// Carries the locally usable plaintext key and its remotely wrapped
/// form. Debug output redacts key bytes.
#[derive(Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncryptionMaterials {
    /// Plaintext data key used for local envelope operations
    pub plaintext_key: Vec<u8>,

    /// The same key wrapped by the remote key-management service
    pub encrypted_key: Vec<u8>,

    /// Algorithm the materials are valid for
    pub algorithm: String,
}

impl fmt::Debug for EncryptionMaterials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EncryptionMaterials")
            .field("plaintext_key", &"<redacted>")
            .field("encrypted_key", &format!("{} bytes", self.encrypted_key.len()))
            .field("algorithm", &self.algorithm)
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(ids: &[&str], alg: &str) -> MaterialsRequest {
        MaterialsRequest::new(ids.iter().map(|s| s.to_string()).collect(), alg).unwrap()
    }

    #[test]
    fn test_request_validation() {
        assert!(MaterialsRequest::new(vec![], "AES_256").is_err());
        assert!(MaterialsRequest::new(vec!["  ".to_string()], "AES_256").is_err());
        assert!(MaterialsRequest::new(vec!["key-1".to_string()], "").is_err());
        assert!(MaterialsRequest::new(vec!["key-1".to_string()], "AES_256").is_ok());
    }

    #[test]
    fn test_fingerprint_is_order_insensitive() {
        let a = request(&["key-1", "key-2"], "AES_256");
        let b = request(&["key-2", "key-1"], "AES_256");
        assert_eq!(a.fingerprint(), b.fingerprint());
    }

    #[test]
    fn test_fingerprint_distinguishes_requests() {
        let a = request(&["key-1"], "AES_256");
        let b = request(&["key-2"], "AES_256");
        let c = request(&["key-1"], "AES_128");
        assert_ne!(a.fingerprint(), b.fingerprint());
        assert_ne!(a.fingerprint(), c.fingerprint());
    }

    #[test]
    fn test_fingerprint_keeps_id_boundaries() {
        // An id containing separator-like content must not collide with
        // the same bytes split across two ids
        let joined = request(&["key-1\nkey-2"], "AES_256");
        let split = request(&["key-1", "key-2"], "AES_256");
        assert_ne!(joined.fingerprint(), split.fingerprint());
    }

    #[test]
    fn test_fingerprint_shape() {
        let fp = request(&["key-1"], "AES_256").fingerprint();
        assert_eq!(fp.len(), 64);
        assert!(fp.chars().all(|c| c.is_ascii_hexdigit()));
    }

    #[test]
    fn test_debug_redacts_key_bytes() {
        let materials = EncryptionMaterials {
            plaintext_key: vec![1, 2, 3],
            encrypted_key: vec![4, 5, 6, 7],
            algorithm: "AES_256".to_string(),
        };
        let debug = format!("{:?}", materials);
        assert!(debug.contains("<redacted>"));
        assert!(!debug.contains("[1, 2, 3]"));
    }
}
