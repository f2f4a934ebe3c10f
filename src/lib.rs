//! Administrative backend for bucket-stored JSON documents.
//!
//! Uploaded PDFs are turned into JSON documents, bucket contents can be
//! listed, read and replaced, and each bucket carries two fixed-key
//! configuration documents (`vector_config.json`, `llm_config.json`).

pub mod api;
pub mod application;
pub mod domain;
pub mod infrastructure;
