//! Core value types shared by the session components.

use crate::error::ApiError;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A loaded binary payload with the name it will be uploaded under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadFile {
    pub name: String,
    pub bytes: Vec<u8>,
}

impl UploadFile {
    pub fn new(name: impl Into<String>, bytes: impl Into<Vec<u8>>) -> Self {
        Self {
            name: name.into(),
            bytes: bytes.into(),
        }
    }

    /// Read a file from disk. The upload name is the path's final component.
    pub fn from_path(path: &Path) -> Result<Self, ApiError> {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .ok_or_else(|| {
                ApiError::Validation(format!("Not a file path: {}", path.display()))
            })?;
        let bytes = std::fs::read(path)?;
        Ok(Self { name, bytes })
    }

    /// MIME type guessed from the file name, falling back to octet-stream.
    pub fn mime_type(&self) -> String {
        mime_guess::from_path(&self.name)
            .first_or_octet_stream()
            .essence_str()
            .to_string()
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }
}

/// Service confirmation of an accepted upload.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadReceipt {
    pub filename: String,
    pub namespace: String,
}

/// Phrase clusters and generated questions from a successful graph build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphArtifact {
    pub phrase_groups: Vec<Vec<String>>,
    pub questions: Vec<String>,
}

impl GraphArtifact {
    pub fn is_empty(&self) -> bool {
        self.phrase_groups.is_empty() && self.questions.is_empty()
    }
}

/// The text shown for the most recent query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Answer(pub String);

impl Answer {
    /// Answer text synthesized when a query fails.
    pub fn from_failure(message: &str) -> Self {
        Answer(format!("An error occurred: {}", message))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for Answer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
