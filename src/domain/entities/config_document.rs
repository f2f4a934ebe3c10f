use serde::Serialize;

use crate::domain::DomainError;

const CONTEXT_PROMPT: &str = "Context information is below.\n---------------------\n{context_str}\n---------------------\nGiven the context information and not prior knowledge, answer the question\n";
const QUERY_PROMPT: &str = "Context information is below.\n---------------------\n{context_str}\n---------------------\nGiven the context information and not prior knowledge, answer the question: {query_str}\n";

/// Server-defined LLM settings. There is no way to override them per request.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LlmConfig {
    pub application: &'static str,
    pub chat_mode: &'static str,
    pub chat_context_qa_prompt_str: &'static str,
    pub query_context_qa_prompt_str: &'static str,
    pub enable_chat: bool,
    pub openai_qa_prompt_str: &'static str,
    pub similarity_cutoff: f64,
    pub temperature: f64,
    pub top_n_results: u32,
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            application: "generic",
            chat_mode: "context",
            chat_context_qa_prompt_str: CONTEXT_PROMPT,
            query_context_qa_prompt_str: QUERY_PROMPT,
            enable_chat: false,
            openai_qa_prompt_str: QUERY_PROMPT,
            similarity_cutoff: 0.5,
            temperature: 0.8,
            top_n_results: 10,
        }
    }
}

/// Serializes a caller-supplied vector config exactly as given.
pub fn build_vector_config_document(fields: &serde_json::Value) -> Result<String, DomainError> {
    serde_json::to_string(fields).map_err(|e| DomainError::internal(e.to_string()))
}

pub fn build_llm_config_document() -> String {
    // Only static strings, bools and finite numbers: serialization cannot fail.
    serde_json::to_string(&LlmConfig::default()).unwrap_or_default()
}
