//! Knowledge-graph construction over the selected documents.

use crate::error::ApiError;
use crate::notify::{Notification, NotificationSink};
use crate::service::{AnalysisService, CreateGraphRequest};
use crate::types::GraphArtifact;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

pub const SELECTION_REQUIRED: &str = "Please select at least one document to create a graph.";

/// Submits graph builds and holds the latest artifact.
///
/// A build never touches the last query answer.
pub struct GraphBuilder {
    service: Arc<dyn AnalysisService>,
    sink: Arc<dyn NotificationSink>,
    artifact: RwLock<Option<GraphArtifact>>,
}

impl GraphBuilder {
    pub fn new(service: Arc<dyn AnalysisService>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            service,
            sink,
            artifact: RwLock::new(None),
        }
    }

    /// Build a graph for `namespace` from `selection`.
    ///
    /// An empty selection is rejected without a request. The namespace is
    /// forwarded as given. The service's raw extracted graph is dropped.
    pub async fn build(
        &self,
        namespace: &str,
        selection: &[String],
        use_raw_text: bool,
    ) -> Result<GraphArtifact, ApiError> {
        if selection.is_empty() {
            let err = ApiError::Validation(SELECTION_REQUIRED.to_string());
            self.sink.notify(Notification::failure(err.to_string()));
            return Err(err);
        }

        let request = CreateGraphRequest {
            namespace: namespace.to_string(),
            files: selection.to_vec(),
            use_raw_text,
        };

        match self.service.create_graph(&request).await {
            Ok(response) => {
                let artifact = GraphArtifact {
                    phrase_groups: response.important_phrases.unwrap_or_default(),
                    questions: response.questions.unwrap_or_default(),
                };
                info!(
                    namespace = %namespace,
                    phrase_groups = artifact.phrase_groups.len(),
                    questions = artifact.questions.len(),
                    "Graph created"
                );
                *self.artifact.write() = Some(artifact.clone());
                self.sink
                    .notify(Notification::success("Graph created successfully."));
                Ok(artifact)
            }
            Err(e) => {
                warn!(namespace = %namespace, error = %e, "Graph creation failed");
                self.sink.notify(Notification::failure(format!(
                    "Failed to create graph: {}",
                    e
                )));
                Err(e)
            }
        }
    }

    /// Artifact from the last successful build, if any.
    pub fn artifact(&self) -> Option<GraphArtifact> {
        self.artifact.read().clone()
    }
}
