use async_trait::async_trait;
use bytes::Bytes;

use crate::domain::{errors::DomainError, KeyPage};

/// Bucket-addressed object storage.
///
/// Implementations hold no per-request state and are shared across
/// concurrent requests. `get` reports a missing key as `DomainError::NotFound`.
#[async_trait]
pub trait ObjectStoreClient: Send + Sync {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), DomainError>;
    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, DomainError>;
    async fn list(
        &self,
        bucket: &str,
        continuation_token: Option<&str>,
        max_keys: usize,
    ) -> Result<KeyPage, DomainError>;
}
