use reqwest::StatusCode;
use thiserror::Error;

/// Failure of a backend call, displayed to the user as-is.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Non-success HTTP status. `message` is already the extracted detail.
    #[error("{message}")]
    Status { status: StatusCode, message: String },

    #[error("{0}")]
    Transport(#[from] reqwest::Error),

    #[error("Unexpected response body: {0}")]
    Decode(#[from] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ApiError::Status { status, .. } => Some(*status),
            ApiError::Transport(e) => e.status(),
            ApiError::Decode(_) => None,
        }
    }
}
