//! Key provider trait wrapping the remote key-management service

use async_trait::async_trait;

use crate::errors::DomainResult;

use super::materials::{EncryptionMaterials, MaterialsRequest};

/// Collaborator that derives envelope-encryption materials
///
/// Implementations talk to the remote key-management service. Failures
/// (including timeouts and cancellation) surface as `Upstream` errors and
/// are propagated unretried; retry policy belongs to the implementation.
#[async_trait]
pub trait KeyProvider: Send + Sync {
    /// Derive materials for the given request
    ///
    /// # Returns
    /// * `Ok(EncryptionMaterials)` - Fresh materials for the request
    /// * `Err(DomainError)` - Provider unavailable or rejected the request
    async fn derive_materials(
        &self,
        request: &MaterialsRequest,
    ) -> DomainResult<EncryptionMaterials>;
}
