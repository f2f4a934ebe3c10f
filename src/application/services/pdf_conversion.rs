use std::sync::Arc;

use bytes::Bytes;
use tracing::instrument;

use crate::application::services::StorageService;
use crate::domain::{
    converted_object_key, ports::TextExtractor, validate_metadata, ConvertedDocument,
    DomainError, MetadataMap, JSON_CONTENT_TYPE,
};

pub const PDF_CONTENT_TYPE: &str = "application/pdf";

pub const EMPTY_FILE_MESSAGE: &str = "File is empty or not provided.";
pub const NOT_PDF_MESSAGE: &str = "Only PDF files are allowed.";
pub const CONVERSION_FAILED_MESSAGE: &str = "An error occurred during conversion.";
pub const STORE_FAILED_MESSAGE: &str = "Failed to store converted document.";

/// A file received from a multipart upload.
#[derive(Debug, Clone)]
pub struct UploadedFile {
    pub file_name: String,
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl UploadedFile {
    pub fn new(file_name: impl Into<String>, content_type: Option<&str>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.map(String::from),
            bytes: bytes.into(),
        }
    }

    fn is_pdf(&self) -> bool {
        self.file_name.to_ascii_lowercase().ends_with(".pdf")
            && self.content_type.as_deref() == Some(PDF_CONTENT_TYPE)
    }
}

/// What happened to one file of a batch.
#[derive(Debug, Clone, PartialEq)]
pub enum FileOutcome {
    Converted {
        file_name: String,
        json: String,
        stored_key: Option<String>,
    },
    Rejected {
        file_name: String,
        message: String,
    },
}

impl FileOutcome {
    fn rejected(file_name: &str, message: &str) -> Self {
        Self::Rejected {
            file_name: file_name.to_string(),
            message: message.to_string(),
        }
    }

    pub fn file_name(&self) -> &str {
        match self {
            Self::Converted { file_name, .. } | Self::Rejected { file_name, .. } => file_name,
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Converted { .. })
    }
}

/// Turns uploaded PDFs into JSON documents, optionally storing them in a bucket.
pub struct PdfConversionService {
    extractor: Arc<dyn TextExtractor>,
    storage: Arc<StorageService>,
}

impl PdfConversionService {
    pub fn new(extractor: Arc<dyn TextExtractor>, storage: Arc<StorageService>) -> Self {
        Self { extractor, storage }
    }

    /// Extracts all page text from `bytes` on the blocking pool.
    pub async fn convert(&self, bytes: Bytes) -> Result<ConvertedDocument, DomainError> {
        let extractor = self.extractor.clone();
        let pages = tokio::task::spawn_blocking(move || extractor.extract_pages(&bytes))
            .await
            .map_err(|e| DomainError::internal(format!("extraction task failed: {e}")))??;
        Ok(ConvertedDocument::from_pages(pages))
    }

    /// Converts every file independently; one bad file never fails the others.
    ///
    /// `metadata` is validated once up front and an invalid map rejects the
    /// whole batch. When `bucket` is given each converted document is also
    /// written there as `<stem>.json`.
    #[instrument(skip(self, files, metadata), fields(files = files.len()))]
    pub async fn convert_batch(
        &self,
        files: Vec<UploadedFile>,
        metadata: &MetadataMap,
        bucket: Option<&str>,
    ) -> Result<Vec<FileOutcome>, DomainError> {
        validate_metadata(metadata)?;

        let mut outcomes = Vec::with_capacity(files.len());
        for file in files {
            let outcome = self.convert_one(file, metadata, bucket).await;
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }

    async fn convert_one(
        &self,
        file: UploadedFile,
        metadata: &MetadataMap,
        bucket: Option<&str>,
    ) -> FileOutcome {
        if file.bytes.is_empty() {
            return FileOutcome::rejected(&file.file_name, EMPTY_FILE_MESSAGE);
        }
        if !file.is_pdf() {
            tracing::warn!(
                file_name = %file.file_name,
                content_type = ?file.content_type,
                "rejected non-PDF upload"
            );
            return FileOutcome::rejected(&file.file_name, NOT_PDF_MESSAGE);
        }

        let json = match self
            .convert(file.bytes)
            .await
            .and_then(|doc| {
                doc.with_metadata(metadata)
                    .to_json()
                    .map_err(|e| DomainError::internal(e.to_string()))
            }) {
            Ok(json) => json,
            Err(e) => {
                tracing::error!(file_name = %file.file_name, error = %e, "PDF conversion failed");
                return FileOutcome::rejected(&file.file_name, CONVERSION_FAILED_MESSAGE);
            }
        };

        let stored_key = match bucket {
            Some(bucket) => {
                let key = converted_object_key(&file.file_name);
                if !self
                    .storage
                    .upload(bucket, &key, &json, JSON_CONTENT_TYPE)
                    .await
                {
                    return FileOutcome::rejected(&file.file_name, STORE_FAILED_MESSAGE);
                }
                Some(key)
            }
            None => None,
        };

        tracing::info!(file_name = %file.file_name, stored_key = ?stored_key, "converted PDF");
        FileOutcome::Converted {
            file_name: file.file_name,
            json,
            stored_key,
        }
    }
}
