use axum::{
    extract::{Multipart, State},
    Json,
};
use serde::Serialize;

use crate::api::error::ApiError;
use crate::api::state::AppState;
use crate::application::{services::FileOutcome, services::UploadedFile};
use crate::domain::MetadataMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UploadStatus {
    Success,
    Failed,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PdfUploadResult {
    pub file_name: String,
    pub status: UploadStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub json_content: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stored_key: Option<String>,
}

impl From<FileOutcome> for PdfUploadResult {
    fn from(outcome: FileOutcome) -> Self {
        match outcome {
            FileOutcome::Converted {
                file_name,
                json,
                stored_key,
            } => Self {
                file_name,
                status: UploadStatus::Success,
                json_content: Some(json),
                message: None,
                stored_key,
            },
            FileOutcome::Rejected { file_name, message } => Self {
                file_name,
                status: UploadStatus::Failed,
                json_content: None,
                message: Some(message),
                stored_key: None,
            },
        }
    }
}

/// Converts every uploaded file independently.
///
/// Besides file parts the form may carry `metadata` (a JSON object of
/// strings added to each document) and `bucket` (store each result as
/// `<stem>.json`). Per-file failures are reported in the body; the status is
/// 200 unless the request as a whole is unusable.
pub async fn upload_pdfs(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<Json<Vec<PdfUploadResult>>, ApiError> {
    let mut files = Vec::new();
    let mut metadata = MetadataMap::new();
    let mut bucket = None;

    while let Some(field) = multipart.next_field().await? {
        let name = field.name().unwrap_or_default().to_string();

        if let Some(file_name) = field.file_name().map(str::to_string) {
            let content_type = field.content_type().map(str::to_string);
            let bytes = field.bytes().await?;
            files.push(UploadedFile {
                file_name,
                content_type,
                bytes,
            });
            continue;
        }

        let text = field.text().await?;
        match name.as_str() {
            "metadata" if !text.trim().is_empty() => {
                metadata = serde_json::from_str(&text).map_err(|e| {
                    ApiError::bad_request(format!(
                        "metadata must be a JSON object of string values: {e}"
                    ))
                })?;
            }
            "bucket" | "bucketName" if !text.trim().is_empty() => {
                bucket = Some(text.trim().to_string());
            }
            _ => tracing::debug!(field = %name, "ignoring form field"),
        }
    }

    if files.is_empty() {
        tracing::warn!("PDF upload without files");
        return Err(ApiError::bad_request("No files uploaded."));
    }

    let outcomes = state
        .pdf_conversion
        .convert_batch(files, &metadata, bucket.as_deref())
        .await
        .inspect_err(|e| tracing::warn!(error = %e, "PDF upload rejected"))?;

    Ok(Json(outcomes.into_iter().map(PdfUploadResult::from).collect()))
}
