//! Local mirror of the documents known to the analysis service.

use crate::error::ApiError;
use crate::service::AnalysisService;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

/// Ordered document names as last reported by the service.
///
/// The list is replaced wholesale on every successful refresh and left as-is
/// when a refresh fails.
pub struct CorpusStore {
    service: Arc<dyn AnalysisService>,
    documents: RwLock<Vec<String>>,
}

impl CorpusStore {
    pub fn new(service: Arc<dyn AnalysisService>) -> Self {
        Self {
            service,
            documents: RwLock::new(Vec::new()),
        }
    }

    /// Fetch the full document list and replace local state with it.
    pub async fn refresh(&self) -> Result<Vec<String>, ApiError> {
        match self.service.list_files().await {
            Ok(files) => {
                debug!(count = files.len(), "Corpus refreshed");
                *self.documents.write() = files.clone();
                Ok(files)
            }
            Err(e) => {
                warn!(error = %e, "Failed to refresh corpus; keeping previous list");
                Err(e)
            }
        }
    }

    /// Snapshot of the current list.
    pub fn documents(&self) -> Vec<String> {
        self.documents.read().clone()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.documents.read().iter().any(|d| d == name)
    }

    pub fn len(&self) -> usize {
        self.documents.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.read().is_empty()
    }
}
