use std::sync::Arc;

use crate::application::{ConfigDocumentService, PdfConversionService, StorageService};
use crate::domain::ports::{ObjectStoreClient, TextExtractor};
use crate::infrastructure::AppConfig;

#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<StorageService>,
    pub config_documents: Arc<ConfigDocumentService>,
    pub pdf_conversion: Arc<PdfConversionService>,
    pub config: Arc<AppConfig>,
}

impl AppState {
    pub fn new(
        store: Arc<dyn ObjectStoreClient>,
        extractor: Arc<dyn TextExtractor>,
        config: AppConfig,
    ) -> Self {
        let storage = Arc::new(StorageService::new(store));
        Self {
            config_documents: Arc::new(ConfigDocumentService::new(storage.clone())),
            pdf_conversion: Arc::new(PdfConversionService::new(extractor, storage.clone())),
            storage,
            config: Arc::new(config),
        }
    }
}
