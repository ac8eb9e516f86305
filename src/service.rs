//! Analysis Service Client
//!
//! Async interface to the remote document-analysis service: listing, uploading
//! and deleting documents, building a knowledge graph over a document
//! selection, and querying that graph. `HttpAnalysisClient` speaks the
//! service's HTTP API; the session components only see `AnalysisService`.

use crate::error::ApiError;
use crate::types::{UploadFile, UploadReceipt};
use async_trait::async_trait;
use reqwest::multipart::{Form, Part};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const LIST_FILES_PATH: &str = "/list_files";
pub const UPLOAD_PATH: &str = "/upload";
pub const DELETE_FILE_PATH: &str = "/delete_file";
pub const CREATE_GRAPH_PATH: &str = "/create_graph";
pub const QUERY_PATH: &str = "/query";

/// Body of `POST /create_graph`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateGraphRequest {
    pub namespace: String,
    pub files: Vec<String>,
    pub use_raw_text: bool,
}

/// Consumed fields of the `/create_graph` response.
///
/// `extracted_graph` is carried through deserialization but nothing reads it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CreateGraphResponse {
    #[serde(default)]
    pub important_phrases: Option<Vec<Vec<String>>>,
    #[serde(default)]
    pub questions: Option<Vec<String>>,
    #[serde(default)]
    pub extracted_graph: Option<serde_json::Value>,
}

/// Body of `POST /query`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryRequest {
    pub namespace: String,
    pub question: String,
}

/// Acknowledgement returned by `/delete_file`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct DeleteAck {
    #[serde(default)]
    pub message: Option<String>,
}

#[derive(Deserialize)]
struct ListFilesResponse {
    #[serde(default)]
    files: Option<Vec<String>>,
}

#[derive(Deserialize)]
struct QueryResponse {
    response: Option<QueryPayload>,
}

#[derive(Deserialize)]
struct QueryPayload {
    answer: Option<String>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    detail: serde_json::Value,
}

/// Remote analysis service.
#[async_trait]
pub trait AnalysisService: Send + Sync {
    /// Names of all documents currently stored by the service.
    async fn list_files(&self) -> Result<Vec<String>, ApiError>;

    /// Store a document under `namespace`.
    async fn upload(&self, namespace: &str, file: &UploadFile) -> Result<UploadReceipt, ApiError>;

    /// Remove a document by name.
    async fn delete_file(&self, file_name: &str) -> Result<DeleteAck, ApiError>;

    /// Build the namespace graph from the named documents.
    async fn create_graph(
        &self,
        request: &CreateGraphRequest,
    ) -> Result<CreateGraphResponse, ApiError>;

    /// Ask a free-text question; returns the answer text.
    async fn query(&self, request: &QueryRequest) -> Result<String, ApiError>;

    /// Origin the client talks to, for diagnostics.
    fn origin(&self) -> &str;
}

// Map reqwest failures that happen before a response arrives.
fn map_http_error(error: reqwest::Error) -> ApiError {
    if error.is_timeout() {
        ApiError::Transport(format!("Request timeout: {}", error))
    } else if error.is_connect() {
        ApiError::Transport(format!("Connection error: {}", error))
    } else if error.is_decode() {
        ApiError::Service(format!("Failed to parse response: {}", error))
    } else if error.is_status() {
        let status = error
            .status()
            .map(|s| s.to_string())
            .unwrap_or_else(|| "unknown".to_string());
        ApiError::Service(format!("Request failed with status {}: {}", status, error))
    } else {
        ApiError::Transport(format!("HTTP error: {}", error))
    }
}

/// Extract a human-readable message from an error body.
///
/// The service reports failures as `{"detail": ...}`; anything else is passed
/// through as raw text.
pub fn error_detail(body: &str) -> String {
    match serde_json::from_str::<ErrorDetail>(body) {
        Ok(ErrorDetail {
            detail: serde_json::Value::String(s),
        }) => s,
        Ok(ErrorDetail { detail }) => detail.to_string(),
        Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
        Err(_) => body.trim().to_string(),
    }
}

async fn ensure_success(response: Response) -> Result<Response, ApiError> {
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    Err(ApiError::Service(format!(
        "Request failed with status {}: {}",
        status,
        error_detail(&body)
    )))
}

pub const DEFAULT_SERVICE_URL: &str = "http://localhost:8000";
pub const DEFAULT_CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

fn build_http_client(
    connect_timeout: Duration,
    request_timeout: Option<Duration>,
) -> Result<Client, ApiError> {
    let mut builder = Client::builder().connect_timeout(connect_timeout);
    if let Some(timeout) = request_timeout {
        builder = builder.timeout(timeout);
    }
    builder
        .build()
        .map_err(|e| ApiError::Config(format!("Failed to create HTTP client: {}", e)))
}

/// HTTP client for the analysis service.
pub struct HttpAnalysisClient {
    client: Client,
    base_url: String,
}

impl HttpAnalysisClient {
    /// Client without a request timeout.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        Self::with_timeouts(base_url, DEFAULT_CONNECT_TIMEOUT, None)
    }

    pub fn with_timeouts(
        base_url: impl Into<String>,
        connect_timeout: Duration,
        request_timeout: Option<Duration>,
    ) -> Result<Self, ApiError> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(ApiError::Config("Service URL cannot be empty".to_string()));
        }
        Ok(Self {
            client: build_http_client(connect_timeout, request_timeout)?,
            base_url,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl AnalysisService for HttpAnalysisClient {
    async fn list_files(&self) -> Result<Vec<String>, ApiError> {
        let url = self.url(LIST_FILES_PATH);
        debug!(url = %url, "Listing documents");
        let response = self.client.get(&url).send().await.map_err(map_http_error)?;
        let listing: ListFilesResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(map_http_error)?;
        Ok(listing.files.unwrap_or_default())
    }

    async fn upload(&self, namespace: &str, file: &UploadFile) -> Result<UploadReceipt, ApiError> {
        let url = self.url(UPLOAD_PATH);
        debug!(url = %url, file = %file.name, bytes = file.len(), "Uploading document");
        let part = Part::bytes(file.bytes.clone())
            .file_name(file.name.clone())
            .mime_str(&file.mime_type())
            .map_err(map_http_error)?;
        let form = Form::new()
            .part("file", part)
            .text("namespace", namespace.to_string());
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(map_http_error)?;
        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(map_http_error)
    }

    async fn delete_file(&self, file_name: &str) -> Result<DeleteAck, ApiError> {
        let url = self.url(DELETE_FILE_PATH);
        debug!(url = %url, file = %file_name, "Deleting document");
        let form = Form::new().text("file_name", file_name.to_string());
        let response = self
            .client
            .post(&url)
            .multipart(form)
            .send()
            .await
            .map_err(map_http_error)?;
        let response = ensure_success(response).await?;
        // Acknowledgement fields are informational; tolerate any body.
        let body = response.text().await.map_err(map_http_error)?;
        Ok(serde_json::from_str(&body).unwrap_or_default())
    }

    async fn create_graph(
        &self,
        request: &CreateGraphRequest,
    ) -> Result<CreateGraphResponse, ApiError> {
        let url = self.url(CREATE_GRAPH_PATH);
        debug!(
            url = %url,
            namespace = %request.namespace,
            files = ?request.files,
            use_raw_text = request.use_raw_text,
            "Requesting graph construction"
        );
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_http_error)?;
        ensure_success(response)
            .await?
            .json()
            .await
            .map_err(map_http_error)
    }

    async fn query(&self, request: &QueryRequest) -> Result<String, ApiError> {
        let url = self.url(QUERY_PATH);
        debug!(url = %url, namespace = %request.namespace, "Querying graph");
        let response = self
            .client
            .post(&url)
            .json(request)
            .send()
            .await
            .map_err(map_http_error)?;
        let body: QueryResponse = ensure_success(response)
            .await?
            .json()
            .await
            .map_err(map_http_error)?;
        body.response
            .and_then(|r| r.answer)
            .ok_or_else(|| ApiError::Service("Response is missing response.answer".to_string()))
    }

    fn origin(&self) -> &str {
        &self.base_url
    }
}

// Mock service for unit tests
#[cfg(test)]
pub use mock::MockService;
