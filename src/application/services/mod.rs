pub mod config_documents;
pub mod pdf_conversion;
pub mod storage;

pub use config_documents::ConfigDocumentService;
pub use pdf_conversion::{FileOutcome, PdfConversionService, UploadedFile};
pub use storage::StorageService;
