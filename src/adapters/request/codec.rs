//! Request file decoding (JSON or YAML).

use std::path::Path;
use tokio::fs;

use super::dto::ComputationRequest;

/// Errors that can occur while reading a request
#[derive(Debug, thiserror::Error)]
pub enum RequestError {
    #[error("Unsupported request format: {0}")]
    UnsupportedFormat(String),

    #[error("Failed to decode request: {0}")]
    DecodeFailed(String),

    #[error("IO error: {0}")]
    IoError(String),
}

/// Serialization format of a request document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RequestFormat {
    Json,
    Yaml,
}

impl RequestFormat {
    /// Picks the format from the file extension.
    pub fn from_path(path: &Path) -> Result<Self, RequestError> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase)
            .unwrap_or_default();
        match ext.as_str() {
            "json" => Ok(RequestFormat::Json),
            "yaml" | "yml" => Ok(RequestFormat::Yaml),
            _ => Err(RequestError::UnsupportedFormat(path.display().to_string())),
        }
    }
}

/// Decodes a request document.
pub fn decode_request(text: &str, format: RequestFormat) -> Result<ComputationRequest, RequestError> {
    match format {
        RequestFormat::Json => {
            serde_json::from_str(text).map_err(|e| RequestError::DecodeFailed(e.to_string()))
        }
        RequestFormat::Yaml => {
            serde_yaml::from_str(text).map_err(|e| RequestError::DecodeFailed(e.to_string()))
        }
    }
}

/// Reads and decodes a request file, choosing the format by extension.
pub async fn load_request(path: impl AsRef<Path>) -> Result<ComputationRequest, RequestError> {
    let path = path.as_ref();
    let format = RequestFormat::from_path(path)?;
    let text = fs::read_to_string(path)
        .await
        .map_err(|e| RequestError::IoError(e.to_string()))?;
    decode_request(&text, format)
}
