//! Session context: the namespace plus every component, owned together.
//!
//! A `Session` is the single place user actions enter. Each action awaits its
//! own round trip and reports one notification. State lives behind short-held
//! locks, so actions may overlap; whichever response lands last wins.

use crate::corpus::CorpusStore;
use crate::deletion::DeletionPipeline;
use crate::error::ApiError;
use crate::graph::GraphBuilder;
use crate::notify::{Notification, NotificationSink};
use crate::query::QueryEngine;
use crate::selection::{SelectionSet, ToggleOutcome};
use crate::service::{AnalysisService, DeleteAck};
use crate::types::{Answer, GraphArtifact, UploadFile, UploadReceipt};
use crate::upload::UploadPipeline;
use parking_lot::RwLock;
use serde::Serialize;
use std::sync::Arc;

pub struct Session {
    namespace: RwLock<String>,
    corpus: CorpusStore,
    selection: SelectionSet,
    upload: UploadPipeline,
    deletion: DeletionPipeline,
    graph: GraphBuilder,
    query: QueryEngine,
    sink: Arc<dyn NotificationSink>,
    origin: String,
}

/// Point-in-time view of session state.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub origin: String,
    pub namespace: String,
    pub documents: Vec<String>,
    pub selection: Vec<String>,
    pub artifact: Option<GraphArtifact>,
    pub answer: Option<Answer>,
}

impl Session {
    pub fn new(
        namespace: impl Into<String>,
        service: Arc<dyn AnalysisService>,
        sink: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            namespace: RwLock::new(namespace.into()),
            corpus: CorpusStore::new(Arc::clone(&service)),
            selection: SelectionSet::new(),
            upload: UploadPipeline::new(Arc::clone(&service), Arc::clone(&sink)),
            deletion: DeletionPipeline::new(Arc::clone(&service), Arc::clone(&sink)),
            graph: GraphBuilder::new(Arc::clone(&service), Arc::clone(&sink)),
            query: QueryEngine::new(Arc::clone(&service), Arc::clone(&sink)),
            origin: service.origin().to_string(),
            sink,
        }
    }

    pub fn namespace(&self) -> String {
        self.namespace.read().clone()
    }

    pub fn set_namespace(&self, namespace: impl Into<String>) {
        *self.namespace.write() = namespace.into();
    }

    /// User-initiated corpus refresh.
    pub async fn refresh(&self) -> Result<Vec<String>, ApiError> {
        match self.corpus.refresh().await {
            Ok(files) => {
                self.sink
                    .notify(Notification::success("Document list refreshed."));
                Ok(files)
            }
            Err(e) => {
                self.sink.notify(Notification::failure(format!(
                    "Failed to fetch documents: {}",
                    e
                )));
                Err(e)
            }
        }
    }

    pub async fn upload(&self, file: Option<&UploadFile>) -> Result<UploadReceipt, ApiError> {
        let namespace = self.namespace();
        self.upload.submit(&self.corpus, &namespace, file).await
    }

    /// Delete a document. A selected document stays selected.
    pub async fn delete(&self, name: &str) -> Result<DeleteAck, ApiError> {
        self.deletion.submit(&self.corpus, name).await
    }

    pub fn toggle(&self, name: &str) -> ToggleOutcome {
        self.selection.toggle(name)
    }

    pub fn is_selected(&self, name: &str) -> bool {
        self.selection.contains(name)
    }

    pub fn clear_selection(&self) {
        self.selection.clear();
    }

    pub async fn build(&self, use_raw_text: bool) -> Result<GraphArtifact, ApiError> {
        let namespace = self.namespace();
        let selection = self.selection.names();
        self.graph.build(&namespace, &selection, use_raw_text).await
    }

    pub async fn ask(&self, question: &str) -> Result<Answer, ApiError> {
        let namespace = self.namespace();
        self.query.ask(&namespace, question).await
    }

    pub fn corpus(&self) -> &CorpusStore {
        &self.corpus
    }

    pub fn selection(&self) -> &SelectionSet {
        &self.selection
    }

    pub fn artifact(&self) -> Option<GraphArtifact> {
        self.graph.artifact()
    }

    pub fn answer(&self) -> Option<Answer> {
        self.query.answer()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            origin: self.origin.clone(),
            namespace: self.namespace(),
            documents: self.corpus.documents(),
            selection: self.selection.names(),
            artifact: self.artifact(),
            answer: self.answer(),
        }
    }
}
