//! One-way token hashing and opaque-secret generation

use rand::Rng;
use sha2::{Digest, Sha256};

/// Length of a generated opaque session secret
pub const SECRET_LENGTH: usize = 64;

/// One-way transform from a raw token string to its storable hash
#[derive(Debug, Default, Clone, Copy)]
pub struct TokenHasher;

impl TokenHasher {
    /// Hashes a raw token for storage or lookup
    ///
    /// SHA-256, lowercase hex. Deterministic so the same raw token always
    /// resolves to the same stored record.
    pub fn hash(token: &str) -> String {
        let mut hasher = Sha256::new();
        hasher.update(token.as_bytes());
        hex::encode(hasher.finalize())
    }
}

/// Generator for cryptographically random opaque session secrets
#[derive(Debug, Default, Clone, Copy)]
pub struct SecureTokenGenerator;

impl SecureTokenGenerator {
    /// Generates a new random alphanumeric secret
    pub fn generate() -> String {
        let mut rng = rand::thread_rng();
        (0..SECRET_LENGTH)
            .map(|_| {
                let idx = rng.gen_range(0..62);
                match idx {
                    0..10 => (b'0' + idx) as char,
                    10..36 => (b'a' + idx - 10) as char,
                    36..62 => (b'A' + idx - 36) as char,
                    _ => unreachable!(),
                }
            })
            .collect()
    }
}
