//! CLI error type.

use risk_client::ClientError;

#[derive(Debug, thiserror::Error)]
pub enum CliError {
    #[error("{0}")]
    Client(#[from] ClientError),
    #[error("io: {0}")]
    Io(#[from] std::io::Error),
    #[error("json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("not signed in; run `riskctl login`")]
    NotSignedIn,
    #[error("missing permission: {0}")]
    PermissionDenied(String),
    #[error("{0}")]
    Usage(String),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::NotSignedIn | CliError::PermissionDenied(_) => 3,
            CliError::Usage(_) => 2,
            CliError::Client(e) if e.is_unauthorized() => 3,
            _ => 1,
        }
    }

    /// One-line message for the terminal, preferring the API's `detail`.
    pub fn message(&self) -> String {
        match self {
            CliError::Client(e) => match (e.status(), e.detail()) {
                (Some(status), Some(detail)) => format!("API error {}: {}", status, detail),
                (Some(401), None) => "session expired; run `riskctl login`".to_string(),
                _ => e.to_string(),
            },
            other => other.to_string(),
        }
    }
}
