use std::path::PathBuf;
use std::time::Duration;

use reqwest::blocking::{multipart, Client, Response};
use reqwest::{StatusCode, Url};
use serde::de::DeserializeOwned;

use arkscript_common::{Config, ExecuteResponse, FileListResponse, UploadResponse};

use crate::error::{ClientError, Result};
use crate::files;
use crate::server::ScriptServer;

/// Blocking HTTP client for an arkscript server.
pub struct HttpServer {
    client: Client,
    base_url: Url,
    allowed_extensions: Vec<String>,
}

impl HttpServer {
    pub fn new(
        base_url: &str,
        timeout: Duration,
        allowed_extensions: Vec<String>,
    ) -> Result<Self> {
        let base_url =
            Url::parse(base_url).map_err(|_| ClientError::InvalidUrl(base_url.to_string()))?;
        if base_url.cannot_be_a_base() {
            return Err(ClientError::InvalidUrl(base_url.to_string()));
        }
        let client = Client::builder().timeout(timeout).build()?;
        Ok(HttpServer {
            client,
            base_url,
            allowed_extensions,
        })
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Self::new(
            &config.server.base_url,
            Duration::from_secs(config.server.timeout_secs),
            config.upload.allowed_extensions.clone(),
        )
    }

    /// Build `base_url/segment/...`, percent-encoding each segment.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| ClientError::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn read_json<T: DeserializeOwned>(resp: Response) -> Result<T> {
        let resp = check_status(resp)?;
        let body = resp.text()?;
        Ok(serde_json::from_str(&body)?)
    }
}

fn check_status(resp: Response) -> Result<Response> {
    let status = resp.status();
    if status.is_success() {
        return Ok(resp);
    }
    let body = resp.text().unwrap_or_default();
    Err(ClientError::Status {
        status: status.as_u16(),
        body,
    })
}

impl ScriptServer for HttpServer {
    fn upload(&self, paths: &[PathBuf]) -> Result<UploadResponse> {
        let (accepted, rejected) = files::partition_uploads(paths, &self.allowed_extensions);
        for path in &rejected {
            tracing::warn!(file = %path.display(), "skipping file with disallowed extension");
        }
        if accepted.is_empty() {
            return Err(ClientError::NothingToUpload(
                self.allowed_extensions.join(", "),
            ));
        }

        let mut form = multipart::Form::new();
        for path in &accepted {
            form = form.file("files", path)?;
        }

        let url = self.endpoint(&["upload"])?;
        tracing::debug!(%url, files = accepted.len(), "uploading input files");
        let resp = self.client.post(url).multipart(form).send()?;
        Self::read_json(resp)
    }

    fn execute(&self, source: &str) -> Result<ExecuteResponse> {
        if source.trim().is_empty() {
            return Err(ClientError::EmptySource);
        }
        let url = self.endpoint(&["execute"])?;
        tracing::debug!(%url, bytes = source.len(), "executing script");
        let resp = self.client.post(url).form(&[("code", source)]).send()?;
        Self::read_json(resp)
    }

    fn list_files(&self) -> Result<FileListResponse> {
        let url = self.endpoint(&["get_input_files"])?;
        tracing::debug!(%url, "listing input files");
        let resp = self.client.get(url).send()?;
        Self::read_json(resp)
    }

    fn download(&self, name: &str) -> Result<Vec<u8>> {
        let url = self.endpoint(&["download", name])?;
        tracing::debug!(%url, "downloading output file");
        let resp = self.client.get(url).send()?;
        if resp.status() == StatusCode::NOT_FOUND {
            return Err(ClientError::NotFound(name.to_string()));
        }
        let resp = check_status(resp)?;
        Ok(resp.bytes()?.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn server(base: &str) -> HttpServer {
        HttpServer::new(base, Duration::from_secs(1), vec![".txt".to_string()]).unwrap()
    }

    #[test]
    fn endpoint_joins_segments() {
        let s = server("http://127.0.0.1:5000");
        assert_eq!(
            s.endpoint(&["upload"]).unwrap().as_str(),
            "http://127.0.0.1:5000/upload"
        );
    }

    #[test]
    fn endpoint_keeps_base_path() {
        let s = server("http://host/ark/");
        assert_eq!(
            s.endpoint(&["get_input_files"]).unwrap().as_str(),
            "http://host/ark/get_input_files"
        );
    }

    #[test]
    fn download_name_is_encoded() {
        let s = server("http://host");
        assert_eq!(
            s.endpoint(&["download", "mi resultado/1.txt"]).unwrap().as_str(),
            "http://host/download/mi%20resultado%2F1.txt"
        );
    }

    #[test]
    fn rejects_invalid_url() {
        let err = HttpServer::new("not a url", Duration::from_secs(1), vec![]).err();
        assert!(matches!(err, Some(ClientError::InvalidUrl(_))));
    }

    #[test]
    fn upload_without_allowed_files_sends_nothing() {
        // Port 1 refuses connections; reaching the network would yield Http.
        let s = server("http://localhost:1");
        let err = s.upload(&[PathBuf::from("foto.png")]).unwrap_err();
        assert!(matches!(err, ClientError::NothingToUpload(ref exts) if exts == ".txt"));
    }

    #[test]
    fn empty_source_is_rejected_locally() {
        let s = server("http://localhost:1");
        assert!(matches!(s.execute("  \n"), Err(ClientError::EmptySource)));
    }

    #[test]
    fn connection_refused_is_http_error() {
        let s = server("http://localhost:1");
        assert!(matches!(s.list_files(), Err(ClientError::Http(_))));
    }

    #[test]
    fn missing_local_file_is_io_error() {
        let s = server("http://localhost:1");
        let err = s.upload(&[PathBuf::from("/nonexistent/dir/datos.txt")]).unwrap_err();
        assert!(matches!(err, ClientError::Io(_)));
    }
}
