use std::net::SocketAddr;
use std::sync::Arc;

use docstore_admin::api::{create_router, AppState};
use docstore_admin::domain::ports::ObjectStoreClient;
use docstore_admin::infrastructure::{
    AppConfig, LogFormat, LopdfExtractor, ObjectStoreBackend, StorageBackend,
};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn init_tracing(format: LogFormat) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "api=debug,docstore_admin=debug,tower_http=debug".into());
    let registry = tracing_subscriber::registry().with(filter);

    match format {
        LogFormat::Json => registry.with(tracing_subscriber::fmt::layer().json()).init(),
        LogFormat::Pretty => registry.with(tracing_subscriber::fmt::layer()).init(),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    let config = AppConfig::from_env()?;
    init_tracing(config.log_format);

    let backend = match config.storage.backend {
        StorageBackend::S3 => ObjectStoreBackend::s3(config.storage.s3.clone()),
        StorageBackend::Memory => ObjectStoreBackend::in_memory(),
    };
    info!(backend = backend.kind().as_str(), "object store initialized");
    let store: Arc<dyn ObjectStoreClient> = Arc::new(backend);

    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    let state = AppState::new(store, Arc::new(LopdfExtractor::new()), config);
    let app = create_router(state);

    info!("API server listening on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
