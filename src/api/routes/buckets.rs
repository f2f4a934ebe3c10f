use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, MessageResponse};
use crate::api::state::AppState;
use crate::domain::{
    validate_object_key, FetchOutcome, KeyPage, JSON_CONTENT_TYPE, MAX_PAGE_SIZE,
};

const DEFAULT_PAGE_SIZE: usize = 10;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesQuery {
    /// Continuation token returned as `nextPageIndex` by the previous page.
    pub page_index: Option<String>,
    pub page_size: Option<usize>,
}

impl ListFilesQuery {
    fn continuation_token(&self) -> Option<&str> {
        self.page_index
            .as_deref()
            .map(str::trim)
            .filter(|token| !token.is_empty() && *token != "0")
    }

    fn page_size(&self) -> usize {
        self.page_size
            .unwrap_or(DEFAULT_PAGE_SIZE)
            .clamp(1, MAX_PAGE_SIZE)
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListFilesResponse {
    pub files: Vec<String>,
    pub is_truncated: bool,
    pub next_page_index: Option<String>,
}

impl From<KeyPage> for ListFilesResponse {
    fn from(page: KeyPage) -> Self {
        Self {
            files: page.keys,
            is_truncated: page.truncated,
            next_page_index: page.next_token,
        }
    }
}

pub async fn list_files(
    State(state): State<AppState>,
    Path(bucket): Path<String>,
    Query(query): Query<ListFilesQuery>,
) -> Result<Json<ListFilesResponse>, ApiError> {
    let page = state
        .storage
        .list_keys(&bucket, query.continuation_token(), query.page_size())
        .await?;
    Ok(Json(ListFilesResponse::from(page)))
}

/// Returns the object as text. A missing key is reported as a server error on this route.
pub async fn get_file(
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
) -> Result<String, ApiError> {
    validate_object_key(&key)?;

    match state.storage.fetch_content(&bucket, &key).await {
        FetchOutcome::Found(content) => Ok(content),
        FetchOutcome::NotFound => Err(ApiError::internal(format!(
            "Internal server error: {key} does not exist in bucket {bucket}"
        ))),
        FetchOutcome::Failed(e) => Err(ApiError::internal(format!("Internal server error: {e}"))),
    }
}

pub async fn put_file(
    State(state): State<AppState>,
    Path((bucket, key)): Path<(String, String)>,
    body: String,
) -> Result<Json<MessageResponse>, ApiError> {
    validate_object_key(&key)?;
    if body.trim().is_empty() {
        return Err(ApiError::bad_request(
            "JSON content cannot be null or empty.",
        ));
    }

    if state
        .storage
        .upload(&bucket, &key, &body, JSON_CONTENT_TYPE)
        .await
    {
        Ok(Json(MessageResponse::new(format!(
            "Successfully uploaded {key} to bucket {bucket}."
        ))))
    } else {
        Err(ApiError::internal(format!(
            "Failed to upload {key} to bucket {bucket}."
        )))
    }
}
