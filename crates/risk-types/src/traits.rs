//! Platform capabilities injected into the client and stores, and shared errors.

use crate::{ActionType, IncidentStatus};

/// Persistent key under which the bearer token is kept.
pub const TOKEN_KEY: &str = "access_token";

/// Persistent key under which the theme preference is kept.
pub const THEME_KEY: &str = "theme";

/// Root-element class toggled for dark mode.
pub const DARK_CLASS: &str = "dark";

/// Persistent string key/value storage (browser local storage or an equivalent).
pub trait Storage: Send + Sync {
    /// Read a value; `Ok(None)` when the key is absent.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write a value, replacing any previous one.
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Remove a key. Removing an absent key is not an error.
    fn remove(&self, key: &str) -> Result<(), StorageError>;
}

/// Host surface the client runs in: navigation, root-element classes, colour scheme.
///
/// Implementations outside a browser treat every call as a no-op and report no dark
/// preference.
pub trait Shell: Send + Sync {
    /// Full-page navigation to `path`.
    fn navigate(&self, path: &str);

    /// Add (`enabled`) or remove a class on the root element.
    fn set_root_class(&self, class: &str, enabled: bool);

    /// Whether the OS asks for a dark colour scheme.
    fn prefers_dark(&self) -> bool;
}

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("storage format error: {0}")]
    Format(String),
    #[error("storage error: {0}")]
    Other(String),
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("incident {id}: resolved_at does not match status {status}")]
    ResolvedAtMismatch { id: String, status: IncidentStatus },
    #[error("{0} request requires a target incident id")]
    MissingTarget(ActionType),
    #[error("create request must not target an existing incident (got {0})")]
    UnexpectedTarget(String),
}
