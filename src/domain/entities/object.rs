use serde::Serialize;

use crate::domain::DomainError;

pub const JSON_CONTENT_TYPE: &str = "application/json";

/// Fixed key of the caller-supplied vector configuration document.
pub const VECTOR_CONFIG_KEY: &str = "vector_config.json";

/// Fixed key of the server-defined LLM configuration document.
pub const LLM_CONFIG_KEY: &str = "llm_config.json";

/// Largest page a single listing call returns.
pub const MAX_PAGE_SIZE: usize = 1000;

/// Checks that `key` names exactly one object and lists back unchanged.
///
/// Rejects empty keys, leading or trailing `/`, empty `//` segments,
/// `.` and `..` segments and control characters.
pub fn validate_object_key(key: &str) -> Result<(), DomainError> {
    if key.is_empty() {
        return Err(DomainError::validation("object key is required"));
    }
    if key.starts_with('/') || key.ends_with('/') {
        return Err(DomainError::validation(format!(
            "object key {key:?} must not start or end with '/'"
        )));
    }
    if let Some(segment) = key
        .split('/')
        .find(|segment| segment.is_empty() || *segment == "." || *segment == "..")
    {
        return Err(DomainError::validation(format!(
            "object key {key:?} contains an invalid segment {segment:?}"
        )));
    }
    if key.chars().any(|c| c.is_control()) {
        return Err(DomainError::validation(format!(
            "object key {key:?} contains control characters"
        )));
    }
    Ok(())
}

/// One page of a bucket listing, exactly as the store returned it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct KeyPage {
    pub keys: Vec<String>,
    pub next_token: Option<String>,
    pub truncated: bool,
}

/// Result of reading an object back as text.
///
/// `NotFound` is an expected outcome (the caller may prompt for an upload);
/// every other store failure is carried in `Failed` and must not be treated
/// as a missing object.
#[derive(Debug)]
pub enum FetchOutcome {
    Found(String),
    NotFound,
    Failed(DomainError),
}

impl FetchOutcome {
    pub fn found(self) -> Option<String> {
        match self {
            Self::Found(content) => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_keys() {
        for key in ["a.json", "a/b.json", "50%.json", "q#1 [draft]~.json", "dir/über.json"] {
            assert!(validate_object_key(key).is_ok(), "{key:?}");
        }
    }

    #[test]
    fn test_invalid_keys() {
        for key in ["", "/a.json", "a/", "a//b.json", "./a.json", "a/../b.json", "a\nb"] {
            assert!(
                matches!(validate_object_key(key), Err(DomainError::Validation(_))),
                "{key:?}"
            );
        }
    }
}
