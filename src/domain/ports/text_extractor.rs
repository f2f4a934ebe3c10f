use crate::domain::errors::DomainError;

/// Pulls plain text out of a document, one entry per page in page order.
pub trait TextExtractor: Send + Sync {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, DomainError>;
}
