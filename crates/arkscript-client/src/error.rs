use thiserror::Error;

/// Errors raised while talking to the arkscript server.
///
/// A script that fails to compile or run is *not* an error here: the server
/// reports it inside a successful response (`ExecuteResponse::error`).
#[derive(Error, Debug)]
pub enum ClientError {
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("invalid server url '{0}'")]
    InvalidUrl(String),

    #[error("server answered {status}: {body}")]
    Status { status: u16, body: String },

    #[error("file not found on server: {0}")]
    NotFound(String),

    #[error("no file to upload (allowed extensions: {0})")]
    NothingToUpload(String),

    #[error("no input files uploaded to the server")]
    NoInputFiles,

    #[error("script source is empty")]
    EmptySource,

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, ClientError>;
