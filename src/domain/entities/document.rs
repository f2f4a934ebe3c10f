use serde::{Deserialize, Serialize};

use super::metadata::MetadataMap;

/// Name recorded for every converted upload under `document_metadata.File_Name`.
pub const UPLOADED_FILE_NAME: &str = "Uploaded_File";

/// JSON shape produced from an uploaded PDF.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConvertedDocument {
    pub document_metadata: MetadataMap,
    pub document_text: String,
}

impl ConvertedDocument {
    /// Concatenates page texts in order, without separators.
    pub fn from_pages<I, S>(pages: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut document_text = String::new();
        for page in pages {
            document_text.push_str(page.as_ref());
        }

        let mut document_metadata = MetadataMap::new();
        document_metadata.insert("File_Name".to_string(), UPLOADED_FILE_NAME.to_string());

        Self {
            document_metadata,
            document_text,
        }
    }

    /// Adds caller metadata. `File_Name` is kept as set by `from_pages`.
    pub fn with_metadata(mut self, metadata: &MetadataMap) -> Self {
        for (key, value) in metadata {
            self.document_metadata
                .entry(key.clone())
                .or_insert_with(|| value.clone());
        }
        self
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }
}

/// Object key under which a converted upload is stored: `report.pdf` becomes `report.json`.
pub fn converted_object_key(file_name: &str) -> String {
    let base = file_name.rsplit(['/', '\\']).next().unwrap_or(file_name);
    let stem = match base.rfind('.') {
        Some(idx) if idx > 0 => &base[..idx],
        _ => base,
    };
    format!("{stem}.json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pages_concatenated_in_order() {
        let doc = ConvertedDocument::from_pages(["first page\n", "second page\n"]);
        assert_eq!(doc.document_text, "first page\nsecond page\n");
        assert_eq!(doc.document_metadata["File_Name"], UPLOADED_FILE_NAME);
    }

    #[test]
    fn test_json_shape() {
        let doc = ConvertedDocument::from_pages(["hello"]);
        assert_eq!(
            doc.to_json().unwrap(),
            r#"{"document_metadata":{"File_Name":"Uploaded_File"},"document_text":"hello"}"#
        );
    }

    #[test]
    fn test_metadata_does_not_override_file_name() {
        let mut metadata = MetadataMap::new();
        metadata.insert("File_Name".into(), "spoofed".into());
        metadata.insert("author".into(), "Jane".into());

        let doc = ConvertedDocument::from_pages(["x"]).with_metadata(&metadata);
        assert_eq!(doc.document_metadata["File_Name"], UPLOADED_FILE_NAME);
        assert_eq!(doc.document_metadata["author"], "Jane");
    }

    #[test]
    fn test_converted_object_key() {
        assert_eq!(converted_object_key("report.pdf"), "report.json");
        assert_eq!(converted_object_key("archive.v2.PDF"), "archive.v2.json");
        assert_eq!(converted_object_key("C:\\scans\\memo.pdf"), "memo.json");
        assert_eq!(converted_object_key(".pdf"), ".pdf.json");
    }
}
