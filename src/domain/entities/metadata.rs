use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;

use crate::domain::DomainError;

pub const MAX_METADATA_LENGTH: usize = 255;

static VALID_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("metadata key pattern is valid"));

/// Metadata attached to an uploaded document. Ordered so validation is deterministic.
pub type MetadataMap = BTreeMap<String, String>;

/// Validates every entry of `metadata`, stopping at the first violation.
///
/// Per entry the key format and length are checked first, then the value
/// length, then that the value is not blank.
pub fn validate_metadata(metadata: &MetadataMap) -> Result<(), DomainError> {
    for (key, value) in metadata {
        if !VALID_KEY.is_match(key) || key.chars().count() > MAX_METADATA_LENGTH {
            return Err(DomainError::validation(format!(
                "Invalid key: {key}. Keys must be alphanumeric or underscore and cannot exceed {MAX_METADATA_LENGTH} characters."
            )));
        }

        if value.chars().count() > MAX_METADATA_LENGTH {
            return Err(DomainError::validation(format!(
                "Value for key {key} exceeds maximum length of {MAX_METADATA_LENGTH} characters."
            )));
        }

        if value.trim().is_empty() {
            return Err(DomainError::validation(format!(
                "Value for key {key} cannot be empty or whitespace."
            )));
        }
    }

    Ok(())
}
