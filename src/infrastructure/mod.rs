pub mod config;
pub mod blob_store;
pub mod pdf;

pub use config::{AppConfig, LogFormat, StorageBackend};
pub use blob_store::{ObjectStoreBackend, S3Settings};
pub use pdf::LopdfExtractor;
