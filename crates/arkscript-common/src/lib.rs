pub mod api;
pub mod config;
pub mod errors;
pub mod span;

pub use api::{ExecuteResponse, FileListResponse, UploadResponse};
pub use config::{Config, ConfigError};
pub use errors::{Diagnostic, DiagnosticBag, Severity};
pub use span::{saturating_u32, Position, Span};
