//! Science Copilot: session controller for a document corpus and its knowledge graph.
//!
//! A session holds the namespace, the stored document list, a selection of at
//! most three documents, the last graph artifact and the last answer. Each user
//! action is a single request to the remote analysis service; every outcome is
//! reported to a notification sink.

pub mod cli;
pub mod config;
pub mod corpus;
pub mod deletion;
pub mod error;
pub mod graph;
pub mod logging;
pub mod notify;
pub mod query;
pub mod selection;
pub mod service;
pub mod session;
pub mod types;
pub mod upload;

pub use error::ApiError;
pub use notify::{Notification, NotificationSink, Outcome, RecordingSink, TracingSink};
pub use selection::{ToggleOutcome, MAX_SELECTION};
pub use service::{AnalysisService, HttpAnalysisClient};
pub use session::{Session, SessionSnapshot};
pub use types::{Answer, GraphArtifact, UploadFile, UploadReceipt};
