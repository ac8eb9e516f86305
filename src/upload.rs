//! Document upload: validate, submit, then refresh the corpus.

use crate::corpus::CorpusStore;
use crate::error::ApiError;
use crate::notify::{Notification, NotificationSink};
use crate::service::AnalysisService;
use crate::types::{UploadFile, UploadReceipt};
use std::sync::Arc;
use tracing::{info, warn};

pub const NAMESPACE_REQUIRED: &str = "Namespace is required.";
pub const FILE_REQUIRED: &str = "File is required.";

pub struct UploadPipeline {
    service: Arc<dyn AnalysisService>,
    sink: Arc<dyn NotificationSink>,
}

impl UploadPipeline {
    pub fn new(service: Arc<dyn AnalysisService>, sink: Arc<dyn NotificationSink>) -> Self {
        Self { service, sink }
    }

    /// Upload `file` into `namespace`.
    ///
    /// The namespace is checked before the file; either failing reports a
    /// validation error and sends nothing. On success the corpus is refreshed
    /// before the success event is reported.
    pub async fn submit(
        &self,
        corpus: &CorpusStore,
        namespace: &str,
        file: Option<&UploadFile>,
    ) -> Result<UploadReceipt, ApiError> {
        let file = match validate(namespace, file) {
            Ok(file) => file,
            Err(e) => {
                self.sink.notify(Notification::failure(e.to_string()));
                return Err(e);
            }
        };

        if file.is_empty() {
            warn!(file = %file.name, "Uploading an empty file");
        }

        match self.service.upload(namespace, file).await {
            Ok(receipt) => {
                info!(
                    filename = %receipt.filename,
                    namespace = %receipt.namespace,
                    "Document uploaded"
                );
                if let Err(e) = corpus.refresh().await {
                    warn!(error = %e, "Corpus refresh after upload failed");
                }
                self.sink
                    .notify(Notification::success("Document uploaded successfully."));
                Ok(receipt)
            }
            Err(e) => {
                warn!(file = %file.name, error = %e, "Upload failed");
                self.sink.notify(Notification::failure(format!(
                    "Failed to upload document: {}",
                    e
                )));
                Err(e)
            }
        }
    }
}

fn validate<'a>(namespace: &str, file: Option<&'a UploadFile>) -> Result<&'a UploadFile, ApiError> {
    if namespace.is_empty() {
        return Err(ApiError::Validation(NAMESPACE_REQUIRED.to_string()));
    }
    file.ok_or_else(|| ApiError::Validation(FILE_REQUIRED.to_string()))
}
