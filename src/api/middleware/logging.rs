use axum::{extract::Request, middleware::Next, response::Response};
use std::time::Instant;

/// Logs one line per completed request; server errors at `error`, client errors at `warn`.
pub async fn request_logger(request: Request, next: Next) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_string();
    let start = Instant::now();

    let response = next.run(request).await;

    let duration_ms = start.elapsed().as_millis() as u64;
    let status = response.status();

    if status.is_server_error() {
        tracing::error!(%method, %path, status = status.as_u16(), duration_ms, "Request failed");
    } else if status.is_client_error() {
        tracing::warn!(%method, %path, status = status.as_u16(), duration_ms, "Request rejected");
    } else if path != "/health" {
        tracing::info!(%method, %path, status = status.as_u16(), duration_ms, "Request completed");
    }

    response
}
