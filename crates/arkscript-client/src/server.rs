use std::path::PathBuf;

use arkscript_common::{ExecuteResponse, FileListResponse, UploadResponse};

use crate::error::Result;

/// Operations offered by an arkscript server.
pub trait ScriptServer {
    /// Upload input files. Files with a disallowed extension are skipped;
    /// if none remain, fails with `ClientError::NothingToUpload`.
    fn upload(&self, paths: &[PathBuf]) -> Result<UploadResponse>;

    /// Run a script against the uploaded inputs.
    fn execute(&self, source: &str) -> Result<ExecuteResponse>;

    /// Input files currently held by the server.
    fn list_files(&self) -> Result<FileListResponse>;

    /// Fetch an output artifact by name.
    fn download(&self, name: &str) -> Result<Vec<u8>>;
}
