mod config_document;
mod document;
mod metadata;
mod object;

pub use config_document::{build_llm_config_document, build_vector_config_document, LlmConfig};
pub use document::{converted_object_key, ConvertedDocument, UPLOADED_FILE_NAME};
pub use metadata::{validate_metadata, MetadataMap, MAX_METADATA_LENGTH};
pub use object::{
    validate_object_key, FetchOutcome, KeyPage, JSON_CONTENT_TYPE, LLM_CONFIG_KEY, MAX_PAGE_SIZE,
    VECTOR_CONFIG_KEY,
};
