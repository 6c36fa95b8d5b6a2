// Error types for sitewiki.
// Covers transport, cache store, configuration and export failures.

use reqwest::StatusCode;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum WikiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Resource not found: {0}")]
    NotFound(String),

    #[error("HTTP {status} from {url}")]
    Status { status: StatusCode, url: String },

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("{0}")]
    Other(String),
}

pub type Result<T> = std::result::Result<T, WikiError>;
