use std::path::PathBuf;

use arkscript_common::{ExecuteResponse, UploadResponse};

use crate::error::{ClientError, Result};
use crate::files::merge_output_files;
use crate::server::ScriptServer;

/// Client-side view of a working session with a server.
///
/// Mirrors the server's input file list and accumulates the output files of
/// every run, so artifacts from earlier runs stay listed.
pub struct Session<S: ScriptServer> {
    server: S,
    input_files: Vec<String>,
    output_files: Vec<String>,
}

impl<S: ScriptServer> Session<S> {
    pub fn new(server: S) -> Self {
        Session {
            server,
            input_files: Vec::new(),
            output_files: Vec::new(),
        }
    }

    pub fn input_files(&self) -> &[String] {
        &self.input_files
    }

    pub fn output_files(&self) -> &[String] {
        &self.output_files
    }

    /// Refresh the input file list from the server.
    pub fn sync(&mut self) -> Result<&[String]> {
        let listing = self.server.list_files()?;
        self.input_files = listing.current_files;
        Ok(&self.input_files)
    }

    /// Upload files; on success the input list becomes the server's list.
    pub fn upload(&mut self, paths: &[PathBuf]) -> Result<UploadResponse> {
        let resp = self.server.upload(paths)?;
        if !resp.error {
            self.input_files = resp.current_files.clone();
        }
        Ok(resp)
    }

    /// Run a script. Refuses to run while no input file is known.
    pub fn run(&mut self, source: &str) -> Result<ExecuteResponse> {
        if self.input_files.is_empty() {
            return Err(ClientError::NoInputFiles);
        }
        let resp = self.server.execute(source)?;
        self.output_files = merge_output_files(&self.output_files, &resp.output_files);
        tracing::debug!(
            error = resp.error,
            new_outputs = resp.output_files.len(),
            total_outputs = self.output_files.len(),
            "script finished"
        );
        Ok(resp)
    }

    pub fn download(&self, name: &str) -> Result<Vec<u8>> {
        self.server.download(name)
    }
}
