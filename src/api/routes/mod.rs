pub mod buckets;
pub mod config;
pub mod health;
pub mod pdf;

use axum::extract::DefaultBodyLimit;
use axum::http::{header, Method};
use axum::{middleware, routing::get, routing::post, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::api::middleware::request_logger;
use crate::api::state::AppState;

pub fn create_router(state: AppState) -> Router {
    let cors = build_cors(&state.config.cors.allowed_origins);
    let body_limit = DefaultBodyLimit::max(state.config.upload.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api", api_routes())
        .layer(body_limit)
        .layer(middleware::from_fn(request_logger))
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

fn build_cors(origins: &[String]) -> CorsLayer {
    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION]);

    if origins.is_empty() || origins.iter().any(|o| o == "*") {
        cors.allow_origin(Any)
    } else {
        let origins: Vec<_> = origins.iter().filter_map(|o| o.parse().ok()).collect();
        cors.allow_origin(origins)
    }
}

fn api_routes() -> Router<AppState> {
    Router::new()
        .route(
            "/config/vector",
            post(config::upload_vector_config).get(config::get_vector_config),
        )
        .route("/config/llm", get(config::upload_llm_config))
        .route("/bucket/{bucket}/files", get(buckets::list_files))
        .route(
            "/bucket/{bucket}/files/{*key}",
            get(buckets::get_file).put(buckets::put_file),
        )
        .route("/pdf/upload", post(pdf::upload_pdfs))
}


#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::test_support::{app, app_with_config, get, send};
    use crate::infrastructure::{AppConfig, ObjectStoreBackend, StorageBackend};
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_health() {
        let (status, body) = send(&app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);

        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["storage"], "s3");
    }

    #[tokio::test]
    async fn test_health_reports_memory_backend() {
        let mut config = AppConfig::default();
        config.storage.backend = StorageBackend::Memory;
        let app = app_with_config(Arc::new(ObjectStoreBackend::in_memory()), config);

        let (_, body) = send(&app, get("/health")).await;
        let body: serde_json::Value = serde_json::from_str(&body).unwrap();
        assert_eq!(body["storage"], "memory");
    }

    #[tokio::test]
    async fn test_unknown_route() {
        let (status, _) = send(&app(), get("/api/nope")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}
