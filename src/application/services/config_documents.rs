use std::sync::Arc;

use tracing::instrument;

use crate::application::services::StorageService;
use crate::domain::{
    build_llm_config_document, build_vector_config_document, DomainError, FetchOutcome,
    JSON_CONTENT_TYPE, LLM_CONFIG_KEY, VECTOR_CONFIG_KEY,
};

/// Writes and reads the two fixed-key configuration documents of a bucket.
pub struct ConfigDocumentService {
    storage: Arc<StorageService>,
}

impl ConfigDocumentService {
    pub fn new(storage: Arc<StorageService>) -> Self {
        Self { storage }
    }

    /// Stores `fields` verbatim as `vector_config.json`, replacing any previous version.
    #[instrument(skip(self, fields))]
    pub async fn upload_vector_config(
        &self,
        bucket: &str,
        fields: &serde_json::Value,
    ) -> Result<bool, DomainError> {
        let document = build_vector_config_document(fields)?;
        Ok(self
            .storage
            .upload(bucket, VECTOR_CONFIG_KEY, &document, JSON_CONTENT_TYPE)
            .await)
    }

    #[instrument(skip(self))]
    pub async fn upload_llm_config(&self, bucket: &str) -> bool {
        let document = build_llm_config_document();
        self.storage
            .upload(bucket, LLM_CONFIG_KEY, &document, JSON_CONTENT_TYPE)
            .await
    }

    pub async fn fetch_vector_config(&self, bucket: &str) -> FetchOutcome {
        self.storage.fetch_content(bucket, VECTOR_CONFIG_KEY).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::application::services::storage::test_support::FailingStore;
    use crate::infrastructure::ObjectStoreBackend;
    use serde_json::json;

    fn service() -> (ConfigDocumentService, Arc<StorageService>) {
        let storage = Arc::new(StorageService::new(Arc::new(
            ObjectStoreBackend::in_memory(),
        )));
        (ConfigDocumentService::new(storage.clone()), storage)
    }

    #[tokio::test]
    async fn test_vector_config_reupload_keeps_latest() {
        let (service, storage) = service();

        assert!(service
            .upload_vector_config("b1", &json!({"application_name": "v1"}))
            .await
            .unwrap());
        assert!(service
            .upload_vector_config("b1", &json!({"application_name": "v2"}))
            .await
            .unwrap());

        let page = storage.list_keys("b1", None, 10).await.unwrap();
        assert_eq!(page.keys, vec![VECTOR_CONFIG_KEY]);

        let stored = service.fetch_vector_config("b1").await.found().unwrap();
        assert_eq!(stored, r#"{"application_name":"v2"}"#);
    }

    #[tokio::test]
    async fn test_missing_vector_config_is_not_found() {
        let (service, _) = service();
        assert!(matches!(
            service.fetch_vector_config("b1").await,
            FetchOutcome::NotFound
        ));
    }

    #[tokio::test]
    async fn test_llm_config_written_identically() {
        let (service, storage) = service();

        assert!(service.upload_llm_config("b1").await);
        let first = storage.fetch_content("b1", LLM_CONFIG_KEY).await.found().unwrap();
        assert!(service.upload_llm_config("b1").await);
        let second = storage.fetch_content("b1", LLM_CONFIG_KEY).await.found().unwrap();

        assert_eq!(first, second);
        assert_eq!(first, build_llm_config_document());
    }

    #[tokio::test]
    async fn test_store_failure_reports_false() {
        let storage = Arc::new(StorageService::new(Arc::new(FailingStore)));
        let service = ConfigDocumentService::new(storage);

        assert!(!service.upload_llm_config("b1").await);
        assert!(!service
            .upload_vector_config("b1", &json!({}))
            .await
            .unwrap());
        assert!(matches!(
            service.fetch_vector_config("b1").await,
            FetchOutcome::Failed(_)
        ));
    }
}
