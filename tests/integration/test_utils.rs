//! Shared test utilities for integration tests
//!
//! `FakeService` is an in-memory analysis service: uploads add to the stored
//! list, deletes remove from it, and any operation can be switched to fail.

use async_trait::async_trait;
use parking_lot::Mutex;
use scicopilot::error::ApiError;
use scicopilot::service::{
    AnalysisService, CreateGraphRequest, CreateGraphResponse, DeleteAck, QueryRequest,
};
use scicopilot::types::{UploadFile, UploadReceipt};
use std::collections::{HashMap, HashSet};
use std::sync::Mutex as StdMutex;
use tempfile::TempDir;

#[derive(Default)]
struct FakeState {
    files: Vec<String>,
    graph: CreateGraphResponse,
    answer: Option<String>,
    failing: HashMap<&'static str, String>,
    calls: Vec<&'static str>,
    graph_requests: Vec<CreateGraphRequest>,
    queries: Vec<QueryRequest>,
}

#[derive(Default)]
pub struct FakeService {
    state: Mutex<FakeState>,
}

impl FakeService {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_files(files: &[&str]) -> Self {
        let service = Self::new();
        service.state.lock().files = files.iter().map(|f| f.to_string()).collect();
        service
    }

    pub fn set_graph(&self, phrases: Vec<Vec<&str>>, questions: Vec<&str>) {
        self.state.lock().graph = CreateGraphResponse {
            important_phrases: Some(
                phrases
                    .into_iter()
                    .map(|g| g.into_iter().map(String::from).collect())
                    .collect(),
            ),
            questions: Some(questions.into_iter().map(String::from).collect()),
            extracted_graph: None,
        };
    }

    pub fn set_answer(&self, answer: &str) {
        self.state.lock().answer = Some(answer.to_string());
    }

    /// Make `op` fail with a service error carrying `detail`.
    pub fn fail(&self, op: &'static str, detail: &str) {
        self.state.lock().failing.insert(op, detail.to_string());
    }

    pub fn recover(&self, op: &'static str) {
        self.state.lock().failing.remove(op);
    }

    pub fn calls(&self, op: &str) -> usize {
        self.state.lock().calls.iter().filter(|c| **c == op).count()
    }

    pub fn stored(&self) -> Vec<String> {
        self.state.lock().files.clone()
    }

    pub fn graph_requests(&self) -> Vec<CreateGraphRequest> {
        self.state.lock().graph_requests.clone()
    }

    pub fn queries(&self) -> Vec<QueryRequest> {
        self.state.lock().queries.clone()
    }

    fn enter(&self, op: &'static str) -> Result<(), ApiError> {
        let mut state = self.state.lock();
        state.calls.push(op);
        match state.failing.get(op) {
            Some(detail) => Err(ApiError::Service(detail.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl AnalysisService for FakeService {
    async fn list_files(&self) -> Result<Vec<String>, ApiError> {
        self.enter("list_files")?;
        Ok(self.state.lock().files.clone())
    }

    async fn upload(&self, namespace: &str, file: &UploadFile) -> Result<UploadReceipt, ApiError> {
        self.enter("upload")?;
        let mut state = self.state.lock();
        if !state.files.contains(&file.name) {
            state.files.push(file.name.clone());
        }
        Ok(UploadReceipt {
            filename: file.name.clone(),
            namespace: namespace.to_string(),
        })
    }

    async fn delete_file(&self, file_name: &str) -> Result<DeleteAck, ApiError> {
        self.enter("delete_file")?;
        let mut state = self.state.lock();
        let before = state.files.len();
        state.files.retain(|f| f != file_name);
        if state.files.len() == before {
            return Err(ApiError::Service(format!("File {} not found", file_name)));
        }
        Ok(DeleteAck {
            message: Some(format!("File {} deleted successfully", file_name)),
        })
    }

    async fn create_graph(
        &self,
        request: &CreateGraphRequest,
    ) -> Result<CreateGraphResponse, ApiError> {
        self.enter("create_graph")?;
        let mut state = self.state.lock();
        state.graph_requests.push(request.clone());
        Ok(state.graph.clone())
    }

    async fn query(&self, request: &QueryRequest) -> Result<String, ApiError> {
        self.enter("query")?;
        let mut state = self.state.lock();
        state.queries.push(request.clone());
        state
            .answer
            .clone()
            .ok_or_else(|| ApiError::Service("Response is missing response.answer".to_string()))
    }

    fn origin(&self) -> &str {
        "fake://analysis"
    }
}

/// Names of distinct values, for set-style assertions.
pub fn name_set(names: &[String]) -> HashSet<&str> {
    names.iter().map(String::as_str).collect()
}

/// Serializes tests that touch process environment variables.
static ENV_MUTEX: StdMutex<()> = StdMutex::new(());

/// Run `f` with XDG_CONFIG_HOME pointing at a fresh temp dir, restoring the
/// previous value afterwards.
pub fn with_config_home<F, R>(f: F) -> R
where
    F: FnOnce(&TempDir) -> R,
{
    let _guard = ENV_MUTEX.lock().unwrap_or_else(|e| e.into_inner());
    let original = std::env::var("XDG_CONFIG_HOME").ok();
    let home = TempDir::new().unwrap();
    std::env::set_var("XDG_CONFIG_HOME", home.path());

    let result = f(&home);

    match original {
        Some(value) => std::env::set_var("XDG_CONFIG_HOME", value),
        None => std::env::remove_var("XDG_CONFIG_HOME"),
    }
    result
}
