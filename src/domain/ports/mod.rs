mod storage;
mod text_extractor;

pub use storage::ObjectStoreClient;
pub use text_extractor::TextExtractor;
