use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use serde::Deserialize;

use crate::api::error::{ApiError, MessageResponse};
use crate::api::state::AppState;
use crate::domain::{FetchOutcome, JSON_CONTENT_TYPE, VECTOR_CONFIG_KEY};

#[derive(Debug, Deserialize)]
pub struct BucketQuery {
    #[serde(alias = "bucketName")]
    pub bucket: Option<String>,
}

impl BucketQuery {
    fn require(&self) -> Result<&str, ApiError> {
        match self.bucket.as_deref().map(str::trim) {
            Some(bucket) if !bucket.is_empty() => Ok(bucket),
            _ => {
                tracing::warn!("bucket name is required");
                Err(ApiError::bad_request("Bucket name is required."))
            }
        }
    }
}

pub async fn upload_vector_config(
    State(state): State<AppState>,
    Query(query): Query<BucketQuery>,
    body: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<Json<MessageResponse>, ApiError> {
    let bucket = query.require()?;
    let Json(fields) = body.map_err(|rejection| {
        tracing::warn!(bucket, error = %rejection, "invalid vector config body");
        ApiError::bad_request(rejection.body_text())
    })?;

    let uploaded = state
        .config_documents
        .upload_vector_config(bucket, &fields)
        .await
        .map_err(|e| {
            tracing::error!(bucket, error = %e, "Failed to upload vector config");
            ApiError::internal(format!("Internal server error: {e}"))
        })?;

    if uploaded {
        Ok(Json(MessageResponse::new("Vector config uploaded successfully.")))
    } else {
        Err(ApiError::internal("Failed to upload vector config to S3."))
    }
}

/// Writes the fixed LLM config. Nothing in the request besides the bucket affects it.
pub async fn upload_llm_config(
    State(state): State<AppState>,
    Query(query): Query<BucketQuery>,
) -> Result<Json<MessageResponse>, ApiError> {
    let bucket = query.require()?;

    if state.config_documents.upload_llm_config(bucket).await {
        Ok(Json(MessageResponse::new("LLM config uploaded successfully.")))
    } else {
        Err(ApiError::internal("Failed to upload LLM config to S3."))
    }
}

pub async fn get_vector_config(
    State(state): State<AppState>,
    Query(query): Query<BucketQuery>,
) -> Result<Response, ApiError> {
    let bucket = query.require()?;

    match state.config_documents.fetch_vector_config(bucket).await {
        FetchOutcome::Found(content) => {
            Ok(([(header::CONTENT_TYPE, JSON_CONTENT_TYPE)], content).into_response())
        }
        FetchOutcome::NotFound => Err(ApiError::not_found(format!(
            "{VECTOR_CONFIG_KEY} file not found in the specified bucket."
        ))),
        FetchOutcome::Failed(_) => Err(ApiError::internal(
            "An error occurred while fetching the file.",
        )),
    }
}
