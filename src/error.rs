use std::path::PathBuf;

use thiserror::Error;

/// Failures talking to the chat completions API.
#[derive(Debug, Error)]
pub enum ExternalServiceError {
    #[error("completion request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("completion API error ({status}): {body}")]
    Status { status: u16, body: String },

    #[error("malformed completion response: {0}")]
    MalformedResponse(String),
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store I/O error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("store file {path} is not a valid JSON array: {source}")]
    Corrupted {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode store contents: {0}")]
    Encode(#[source] serde_json::Error),
}

/// Request-level error, mapped onto an HTTP status in `server`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0}")]
    Validation(String),

    #[error(transparent)]
    External(#[from] ExternalServiceError),

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("failed to render dashboard: {0}")]
    Render(#[from] tera::Error),
}
