use lopdf::Document;

use crate::domain::{ports::TextExtractor, DomainError};

/// [`TextExtractor`] backed by `lopdf`.
#[derive(Debug, Default, Clone, Copy)]
pub struct LopdfExtractor;

impl LopdfExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for LopdfExtractor {
    fn extract_pages(&self, bytes: &[u8]) -> Result<Vec<String>, DomainError> {
        let doc = Document::load_mem(bytes).map_err(|e| DomainError::extraction(e.to_string()))?;
        if doc.is_encrypted() {
            return Err(DomainError::extraction("document is encrypted"));
        }

        // get_pages is keyed by page number, so iteration is already in page order
        let page_numbers: Vec<u32> = doc.get_pages().keys().copied().collect();
        let mut pages = Vec::with_capacity(page_numbers.len());
        for page in page_numbers {
            let text = doc
                .extract_text(&[page])
                .map_err(|e| DomainError::extraction(format!("page {page}: {e}")))?;
            pages.push(text);
        }
        Ok(pages)
    }
}

#[cfg(test)]
pub(crate) mod test_support {
    use lopdf::content::{Content, Operation};
    use lopdf::{dictionary, Object, Stream};

    /// Builds a minimal PDF with one page per entry of `lines`.
    pub fn pdf_with_pages(lines: &[&str]) -> Vec<u8> {
        let mut doc = lopdf::Document::with_version("1.5");
        let pages_id = doc.new_object_id();
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Courier",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                "F1" => font_id,
            },
        });

        let mut kids: Vec<Object> = Vec::new();
        for line in lines {
            let content = Content {
                operations: vec![
                    Operation::new("BT", vec![]),
                    Operation::new("Tf", vec!["F1".into(), 24.into()]),
                    Operation::new("Td", vec![100.into(), 600.into()]),
                    Operation::new("Tj", vec![Object::string_literal(*line)]),
                    Operation::new("ET", vec![]),
                ],
            };
            let content_id =
                doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
            let page_id = doc.add_object(dictionary! {
                "Type" => "Page",
                "Parent" => pages_id,
                "Contents" => content_id,
                "Resources" => resources_id,
            });
            kids.push(page_id.into());
        }

        let pages = dictionary! {
            "Type" => "Pages",
            "Count" => kids.len() as i64,
            "Kids" => kids,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 595.into(), 842.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));
        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);

        let mut buf = Vec::new();
        doc.save_to(&mut buf).unwrap();
        buf
    }
}
