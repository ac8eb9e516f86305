//! Document deletion: submit the name, then refresh the corpus.

use crate::corpus::CorpusStore;
use crate::error::ApiError;
use crate::notify::{Notification, NotificationSink};
use crate::service::{AnalysisService, DeleteAck};
use std::sync::Arc;
use tracing::{info, warn};

pub const NAME_REQUIRED: &str = "Document name is required.";

/// Removes documents from the service.
///
/// The selection is deliberately not consulted: a deleted document that was
/// selected stays selected until the user toggles it off.
pub struct DeletionPipeline {
    service: Arc<dyn AnalysisService>,
    sink: Arc<dyn NotificationSink>,
}

impl DeletionPipeline {
    pub fn new(service: Arc<dyn AnalysisService>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { service, sink }
    }

    pub async fn submit(&self, corpus: &CorpusStore, name: &str) -> Result<DeleteAck, ApiError> {
        if name.is_empty() {
            let err = ApiError::Validation(NAME_REQUIRED.to_string());
            self.sink.notify(Notification::failure(err.to_string()));
            return Err(err);
        }

        match self.service.delete_file(name).await {
            Ok(ack) => {
                info!(
                    file = %name,
                    message = ack.message.as_deref().unwrap_or(""),
                    "Document deleted"
                );
                if let Err(e) = corpus.refresh().await {
                    warn!(error = %e, "Corpus refresh after delete failed");
                }
                self.sink.notify(Notification::success(format!(
                    "Document {} deleted successfully.",
                    name
                )));
                Ok(ack)
            }
            Err(e) => {
                warn!(file = %name, error = %e, "Delete failed");
                self.sink.notify(Notification::failure(format!(
                    "Failed to delete document: {}",
                    e
                )));
                Err(e)
            }
        }
    }
}
