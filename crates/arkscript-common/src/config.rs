use std::path::{Path, PathBuf};

use serde::Deserialize;

pub const CONFIG_FILE_NAME: &str = "Arkscript.toml";

/// The parsed Arkscript.toml configuration.
#[derive(Debug, Clone, Default)]
pub struct Config {
    pub server: ServerSection,
    pub upload: UploadSection,
    pub highlight: HighlightSection,
    /// The directory containing the Arkscript.toml file, if one was found.
    pub root_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerSection {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for ServerSection {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: default_timeout(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct UploadSection {
    #[serde(default = "default_allowed_extensions")]
    pub allowed_extensions: Vec<String>,
}

impl Default for UploadSection {
    fn default() -> Self {
        Self {
            allowed_extensions: default_allowed_extensions(),
        }
    }
}

/// Per-kind palette overrides (256-colour indices) for terminal highlighting.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct HighlightSection {
    #[serde(default)]
    pub keyword: Option<u8>,
    #[serde(default)]
    pub builtin: Option<u8>,
    #[serde(default)]
    pub comment: Option<u8>,
    #[serde(default)]
    pub string: Option<u8>,
    #[serde(default)]
    pub number: Option<u8>,
    #[serde(default)]
    pub variable: Option<u8>,
}

fn default_base_url() -> String {
    "http://127.0.0.1:5000".to_string()
}
fn default_timeout() -> u64 {
    30
}
fn default_allowed_extensions() -> Vec<String> {
    vec![".txt".to_string(), ".pdf".to_string()]
}

/// Raw TOML structure for deserialization.
#[derive(Deserialize)]
struct RawConfig {
    #[serde(default)]
    server: ServerSection,
    #[serde(default)]
    upload: UploadSection,
    #[serde(default)]
    highlight: HighlightSection,
}

/// Errors that can occur when loading a configuration file.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read Arkscript.toml: {0}")]
    ReadError(#[from] std::io::Error),
    #[error("invalid Arkscript.toml: {0}")]
    ParseError(String),
    #[error("invalid Arkscript.toml: [server] base_url must not be empty")]
    EmptyBaseUrl,
    #[error("invalid Arkscript.toml: [server] base_url '{0}' must start with http:// or https://")]
    UnsupportedScheme(String),
    #[error("invalid Arkscript.toml: [upload] extension '{0}' must start with '.'")]
    InvalidExtension(String),
}

/// Walk up from `start_dir` looking for `Arkscript.toml`.
pub fn find_config(start_dir: &Path) -> Option<PathBuf> {
    let mut current = start_dir.to_path_buf();
    loop {
        let candidate = current.join(CONFIG_FILE_NAME);
        if candidate.is_file() {
            return Some(candidate);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Load and validate a configuration file.
pub fn load_config(path: &Path) -> Result<Config, ConfigError> {
    let content = std::fs::read_to_string(path)?;
    let root_dir = path
        .parent()
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();
    parse_config(&content, Some(root_dir))
}

/// Parse and validate configuration from a string.
pub fn parse_config(content: &str, root_dir: Option<PathBuf>) -> Result<Config, ConfigError> {
    let raw: RawConfig =
        toml::from_str(content).map_err(|e| ConfigError::ParseError(e.to_string()))?;

    validate_server(&raw.server)?;
    validate_upload(&raw.upload)?;

    Ok(Config {
        server: raw.server,
        upload: raw.upload,
        highlight: raw.highlight,
        root_dir,
    })
}

/// Find and load the configuration starting from `start_dir`.
/// A missing file yields the defaults.
pub fn find_and_load_config(start_dir: &Path) -> Result<Config, ConfigError> {
    match find_config(start_dir) {
        Some(path) => load_config(&path),
        None => Ok(Config::default()),
    }
}

fn validate_server(server: &ServerSection) -> Result<(), ConfigError> {
    let url = server.base_url.trim();
    if url.is_empty() {
        return Err(ConfigError::EmptyBaseUrl);
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ConfigError::UnsupportedScheme(url.to_string()));
    }
    Ok(())
}

fn validate_upload(upload: &UploadSection) -> Result<(), ConfigError> {
    if let Some(bad) = upload
        .allowed_extensions
        .iter()
        .find(|ext| !ext.starts_with('.'))
    {
        return Err(ConfigError::InvalidExtension(bad.clone()));
    }
    Ok(())
}
