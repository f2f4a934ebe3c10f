//! Application layer - Use cases and orchestration.
//!
//! Services here depend on domain ports (traits) rather than concrete
//! storage or extraction backends, so the same code runs against S3 or
//! the in-memory store.

pub mod services;

pub use services::{ConfigDocumentService, PdfConversionService, StorageService};
