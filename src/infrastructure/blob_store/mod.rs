mod s3;

use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;
use bytes::Bytes;
use futures::TryStreamExt;
use object_store::{
    memory::InMemory, path::Path, Attribute, AttributeValue, Attributes, ObjectStore, PutOptions,
    PutPayload,
};

use crate::domain::{
    ports::ObjectStoreClient, validate_object_key, DomainError, KeyPage, MAX_PAGE_SIZE,
};
use crate::infrastructure::config::StorageBackend;

pub use s3::S3Settings;

enum Backend {
    /// A fresh client per call; nothing is kept between requests.
    S3(S3Settings),
    /// The map is the bucket namespace itself.
    InMemory(RwLock<HashMap<String, Arc<dyn ObjectStore>>>),
}

/// [`ObjectStoreClient`] over the `object_store` crate.
pub struct ObjectStoreBackend {
    backend: Backend,
}

impl ObjectStoreBackend {
    pub fn s3(settings: S3Settings) -> Self {
        Self {
            backend: Backend::S3(settings),
        }
    }

    /// Process-local buckets, created empty on first use.
    pub fn in_memory() -> Self {
        Self {
            backend: Backend::InMemory(RwLock::new(HashMap::new())),
        }
    }

    pub fn kind(&self) -> StorageBackend {
        match self.backend {
            Backend::S3(_) => StorageBackend::S3,
            Backend::InMemory(_) => StorageBackend::Memory,
        }
    }

    fn bucket(&self, bucket: &str) -> Result<Arc<dyn ObjectStore>, DomainError> {
        if bucket.trim().is_empty() {
            return Err(DomainError::validation("bucket name is required"));
        }

        match &self.backend {
            Backend::S3(settings) => Ok(Arc::new(s3::build_bucket_client(settings, bucket)?)),
            Backend::InMemory(buckets) => {
                {
                    let buckets = buckets
                        .read()
                        .map_err(|e| DomainError::internal(e.to_string()))?;
                    if let Some(store) = buckets.get(bucket) {
                        return Ok(store.clone());
                    }
                }

                let mut buckets = buckets
                    .write()
                    .map_err(|e| DomainError::internal(e.to_string()))?;
                let store = buckets
                    .entry(bucket.to_string())
                    .or_insert_with(|| Arc::new(InMemory::new()))
                    .clone();
                Ok(store)
            }
        }
    }
}

/// Maps a key to a store path that renders back as exactly the same string.
///
/// `Path::from` would collapse empty segments and percent-encode some
/// characters, so listed keys would no longer match the keys written.
fn object_path(key: &str) -> Result<Path, DomainError> {
    validate_object_key(key)?;
    let path = Path::parse(key)
        .map_err(|e| DomainError::validation(format!("invalid object key {key:?}: {e}")))?;
    if path.as_ref() != key {
        return Err(DomainError::validation(format!(
            "invalid object key {key:?}: not stored verbatim"
        )));
    }
    Ok(path)
}

fn map_store_error(bucket: &str, key: &str, err: object_store::Error) -> DomainError {
    match err {
        object_store::Error::NotFound { .. } => DomainError::not_found(format!("{bucket}/{key}")),
        other => DomainError::external(other.to_string()),
    }
}

#[async_trait]
impl ObjectStoreClient for ObjectStoreBackend {
    async fn put(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> Result<(), DomainError> {
        let store = self.bucket(bucket)?;
        let path = object_path(key)?;

        let mut attributes = Attributes::new();
        attributes.insert(
            Attribute::ContentType,
            AttributeValue::from(content_type.to_string()),
        );
        let opts = PutOptions {
            attributes,
            ..Default::default()
        };

        store
            .put_opts(&path, PutPayload::from(body), opts)
            .await
            .map_err(|e| map_store_error(bucket, key, e))?;
        Ok(())
    }

    async fn get(&self, bucket: &str, key: &str) -> Result<Bytes, DomainError> {
        let store = self.bucket(bucket)?;
        let path = object_path(key)?;
        let result = store
            .get(&path)
            .await
            .map_err(|e| map_store_error(bucket, key, e))?;
        result
            .bytes()
            .await
            .map_err(|e| map_store_error(bucket, key, e))
    }

    async fn list(
        &self,
        bucket: &str,
        continuation_token: Option<&str>,
        max_keys: usize,
    ) -> Result<KeyPage, DomainError> {
        let store = self.bucket(bucket)?;
        let max_keys = max_keys.clamp(1, MAX_PAGE_SIZE);

        // The token is the last key of the previous page; listing resumes after it.
        let mut stream = match continuation_token {
            Some(token) => {
                let offset = object_path(token).map_err(|e| {
                    DomainError::validation(format!("invalid continuation token: {e}"))
                })?;
                store.list_with_offset(None, &offset)
            }
            None => store.list(None),
        };

        let mut page = KeyPage::default();
        while let Some(meta) = stream
            .try_next()
            .await
            .map_err(|e| map_store_error(bucket, "", e))?
        {
            if page.keys.len() == max_keys {
                page.truncated = true;
                break;
            }
            page.keys.push(meta.location.to_string());
        }

        if page.truncated {
            page.next_token = page.keys.last().cloned();
        }
        Ok(page)
    }
}
