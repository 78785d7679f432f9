//! Client error type.

use risk_types::{StorageError, ValidationError};

/// Errors from any client call.
///
/// Every verb reports a non-2xx answer the same way: [`ClientError::Status`] with the
/// status code and the parsed JSON error body (`{}` when the body is empty or not JSON).
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("HTTP error: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("API error {status}: {body}")]
    Status {
        status: u16,
        body: serde_json::Value,
    },
    #[error("decode error: {0}")]
    Decode(String),
    #[error("storage: {0}")]
    Storage(#[from] StorageError),
    #[error("invalid request: {0}")]
    InvalidRequest(String),
    #[error("validation: {0}")]
    Validation(#[from] ValidationError),
}

impl ClientError {
    /// HTTP status of a failed call, if the server answered.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Status { status, .. } => Some(*status),
            ClientError::Transport(e) => e.status().map(|s| s.as_u16()),
            _ => None,
        }
    }

    /// Parsed error body of a failed call.
    pub fn body(&self) -> Option<&serde_json::Value> {
        match self {
            ClientError::Status { body, .. } => Some(body),
            _ => None,
        }
    }

    /// The API's `detail` message, when it sent one.
    pub fn detail(&self) -> Option<&str> {
        self.body()
            .and_then(|b| b.get("detail"))
            .and_then(|d| d.as_str())
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(401)
    }
}
