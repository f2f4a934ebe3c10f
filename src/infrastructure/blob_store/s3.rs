use object_store::aws::{AmazonS3, AmazonS3Builder};

use crate::domain::DomainError;

/// Connection settings shared by every bucket client.
///
/// Credentials are never stored here; they come from the standard `AWS_*`
/// environment variables or instance metadata.
#[derive(Debug, Clone, Default)]
pub struct S3Settings {
    pub region: Option<String>,
    pub endpoint: Option<String>,
}

pub(crate) fn build_bucket_client(
    settings: &S3Settings,
    bucket: &str,
) -> Result<AmazonS3, DomainError> {
    let mut builder = AmazonS3Builder::from_env().with_bucket_name(bucket);
    if let Some(region) = &settings.region {
        builder = builder.with_region(region);
    }

    // localstack / minio
    if let Some(endpoint) = &settings.endpoint {
        builder = builder.with_endpoint(endpoint);
        if endpoint.starts_with("http://") {
            builder = builder.with_allow_http(true);
        }
    }

    builder
        .build()
        .map_err(|e| DomainError::external(format!("cannot configure bucket {bucket}: {e}")))
}
