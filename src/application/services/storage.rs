use std::sync::Arc;

use bytes::Bytes;
use tracing::instrument;

use crate::domain::{ports::ObjectStoreClient, DomainError, FetchOutcome, KeyPage};

/// Uniform access to the object store for the rest of the application.
pub struct StorageService {
    store: Arc<dyn ObjectStoreClient>,
}

impl StorageService {
    pub fn new(store: Arc<dyn ObjectStoreClient>) -> Self {
        Self { store }
    }

    /// Writes `content` at `bucket/key`, replacing any existing object.
    ///
    /// Failures are logged and reported as `false`; this never returns an error.
    #[instrument(skip(self, content), fields(bytes = content.len()))]
    pub async fn upload(&self, bucket: &str, key: &str, content: &str, content_type: &str) -> bool {
        if bucket.trim().is_empty() {
            tracing::warn!(key, "upload rejected: bucket name is empty");
            return false;
        }

        let body = Bytes::copy_from_slice(content.as_bytes());
        match self.store.put(bucket, key, body, content_type).await {
            Ok(()) => {
                tracing::info!(bucket, key, "uploaded object");
                true
            }
            Err(e) => {
                tracing::error!(bucket, key, error = %e, "failed to upload object");
                false
            }
        }
    }

    /// Reads `bucket/key` as UTF-8 text.
    #[instrument(skip(self))]
    pub async fn fetch_content(&self, bucket: &str, key: &str) -> FetchOutcome {
        let body = match self.store.get(bucket, key).await {
            Ok(body) => body,
            Err(DomainError::NotFound(_)) => {
                tracing::warn!(bucket, key, "object not found");
                return FetchOutcome::NotFound;
            }
            Err(e) => {
                tracing::error!(bucket, key, error = %e, "failed to fetch object");
                return FetchOutcome::Failed(e);
            }
        };

        match String::from_utf8(body.to_vec()) {
            Ok(content) => {
                tracing::info!(bucket, key, "fetched object");
                FetchOutcome::Found(content)
            }
            Err(e) => {
                tracing::error!(bucket, key, error = %e, "object is not valid UTF-8");
                FetchOutcome::Failed(DomainError::internal(format!(
                    "{key} is not valid UTF-8 text"
                )))
            }
        }
    }

    /// Returns one page of keys exactly as the store reported it.
    #[instrument(skip(self))]
    pub async fn list_keys(
        &self,
        bucket: &str,
        continuation_token: Option<&str>,
        page_size: usize,
    ) -> Result<KeyPage, DomainError> {
        let page = self
            .store
            .list(bucket, continuation_token, page_size)
            .await
            .inspect_err(|e| tracing::error!(bucket, error = %e, "failed to list objects"))?;

        tracing::info!(bucket, count = page.keys.len(), "listed objects");
        Ok(page)
    }
}


#[cfg(test)]
mod tests {
    use super::test_support::FailingStore;
    use super::*;
    use crate::domain::{JSON_CONTENT_TYPE, VECTOR_CONFIG_KEY};
    use crate::infrastructure::ObjectStoreBackend;

    fn memory_service() -> StorageService {
        StorageService::new(Arc::new(ObjectStoreBackend::in_memory()))
    }

    #[tokio::test]
    async fn test_upload_then_fetch_round_trips() {
        let service = memory_service();
        assert!(
            service
                .upload("b1", VECTOR_CONFIG_KEY, "{\"a\":1}", JSON_CONTENT_TYPE)
                .await
        );

        let content = service.fetch_content("b1", VECTOR_CONFIG_KEY).await.found();
        assert_eq!(content.as_deref(), Some("{\"a\":1}"));
    }

    #[tokio::test]
    async fn test_fetch_never_written_is_not_found() {
        let service = memory_service();
        assert!(matches!(
            service.fetch_content("b1", "nothing.json").await,
            FetchOutcome::NotFound
        ));
    }

    #[tokio::test]
    async fn test_second_upload_overwrites() {
        let service = memory_service();
        assert!(service.upload("b1", VECTOR_CONFIG_KEY, "first", JSON_CONTENT_TYPE).await);
        assert!(service.upload("b1", VECTOR_CONFIG_KEY, "second", JSON_CONTENT_TYPE).await);

        let page = service.list_keys("b1", None, 10).await.unwrap();
        assert_eq!(page.keys, vec![VECTOR_CONFIG_KEY]);
        assert_eq!(
            service.fetch_content("b1", VECTOR_CONFIG_KEY).await.found().as_deref(),
            Some("second")
        );
    }

    #[tokio::test]
    async fn test_colliding_key_does_not_overwrite() {
        let service = memory_service();
        assert!(service.upload("b1", "a/b.json", "first", JSON_CONTENT_TYPE).await);
        assert!(!service.upload("b1", "a//b.json", "second", JSON_CONTENT_TYPE).await);

        assert_eq!(
            service.fetch_content("b1", "a/b.json").await.found().as_deref(),
            Some("first")
        );
        assert!(matches!(
            service.fetch_content("b1", "a//b.json").await,
            FetchOutcome::Failed(DomainError::Validation(_))
        ));
    }

    #[tokio::test]
    async fn test_listed_keys_fetch_back() {
        let service = memory_service();
        assert!(service.upload("b1", "50%.json", "{}", JSON_CONTENT_TYPE).await);

        let page = service.list_keys("b1", None, 10).await.unwrap();
        assert_eq!(page.keys, vec!["50%.json"]);
        assert_eq!(
            service.fetch_content("b1", &page.keys[0]).await.found().as_deref(),
            Some("{}")
        );
    }

    #[tokio::test]
    async fn test_upload_to_blank_bucket_fails() {
        let service = memory_service();
        assert!(!service.upload("  ", "k.json", "{}", JSON_CONTENT_TYPE).await);
    }

    #[tokio::test]
    async fn test_store_failure_is_not_not_found() {
        let service = StorageService::new(Arc::new(FailingStore));

        assert!(!service.upload("b1", "k.json", "{}", JSON_CONTENT_TYPE).await);
        assert!(matches!(
            service.fetch_content("b1", "k.json").await,
            FetchOutcome::Failed(DomainError::ExternalService(_))
        ));
        assert!(service.list_keys("b1", None, 10).await.is_err());
    }

    #[tokio::test]
    async fn test_non_utf8_content_fails() {
        let store = Arc::new(ObjectStoreBackend::in_memory());
        store
            .put("b1", "blob.bin", Bytes::from_static(&[0xff, 0xfe, 0x00]), "application/octet-stream")
            .await
            .unwrap();

        let service = StorageService::new(store);
        assert!(matches!(
            service.fetch_content("b1", "blob.bin").await,
            FetchOutcome::Failed(_)
        ));
    }
}
