//! Free-text questions against the namespace graph.

use crate::error::ApiError;
use crate::notify::{Notification, NotificationSink};
use crate::service::{AnalysisService, QueryRequest};
use crate::types::Answer;
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{info, warn};

/// Submits questions and holds the latest answer.
///
/// Unlike the other pipelines, a failed query overwrites the stored answer
/// with an error text instead of leaving it alone.
pub struct QueryEngine {
    service: Arc<dyn AnalysisService>,
    sink: Arc<dyn NotificationSink>,
    answer: RwLock<Option<Answer>>,
}

impl QueryEngine {
    pub fn new(service: Arc<dyn AnalysisService>, sink: Arc<dyn NotificationSink>) -> Self {
        Self {
            service,
            sink,
            answer: RwLock::new(None),
        }
    }

    /// Ask `question` in `namespace`. Neither argument is validated.
    pub async fn ask(&self, namespace: &str, question: &str) -> Result<Answer, ApiError> {
        let request = QueryRequest {
            namespace: namespace.to_string(),
            question: question.to_string(),
        };

        match self.service.query(&request).await {
            Ok(text) => {
                info!(namespace = %namespace, "Query answered");
                let answer = Answer(text);
                *self.answer.write() = Some(answer.clone());
                self.sink.notify(Notification::success("Query successful."));
                Ok(answer)
            }
            Err(e) => {
                warn!(namespace = %namespace, error = %e, "Query failed");
                *self.answer.write() = Some(Answer::from_failure(&e.to_string()));
                self.sink.notify(Notification::failure(format!(
                    "Failed to query graph: {}",
                    e
                )));
                Err(e)
            }
        }
    }

    pub fn answer(&self) -> Option<Answer> {
        self.answer.read().clone()
    }
}
