//! Wire types for the arkscript server endpoints.
//!
//! Every endpoint answers with a JSON object. The server reports failures in
//! the body (`error: true` plus a human-readable `output`) rather than through
//! HTTP status codes, so these types carry both outcomes.

use serde::{Deserialize, Serialize};

/// Response of `POST /upload`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadResponse {
    pub error: bool,
    pub output: String,
    /// Input files held by the server after the upload. Omitted on error.
    #[serde(default)]
    pub current_files: Vec<String>,
}

/// Response of `POST /execute`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecuteResponse {
    pub error: bool,
    /// Captured program output, or the compile/runtime error message.
    pub output: String,
    /// Artifacts written by the script, downloadable by name.
    #[serde(default)]
    pub output_files: Vec<String>,
}

/// Response of `GET /get_input_files`.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct FileListResponse {
    #[serde(default)]
    pub current_files: Vec<String>,
}
