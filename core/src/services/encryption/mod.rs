//! Envelope-encryption materials: key-provider abstraction and cache
//!
//! Encryption operations ask a [`KeyProvider`] for materials; the
//! [`CachingKeyProvider`] decorator answers most requests locally so the
//! remote key-management service is not hit on every operation.

mod cache;
mod key_provider;
mod materials;

#[cfg(test)]
mod tests;

pub use cache::{CachingKeyProvider, MaterialsCacheConfig};
pub use key_provider::KeyProvider;
pub use materials::{EncryptionMaterials, MaterialsRequest};
