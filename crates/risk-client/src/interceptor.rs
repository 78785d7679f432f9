//! Response interceptors: cross-cutting reactions to responses, registered by the
//! application shell rather than built into the transport.

use async_trait::async_trait;
use reqwest::{Method, StatusCode};
use risk_types::{Shell, Storage, TOKEN_KEY};
use std::sync::Arc;

/// What an interceptor gets to see about a completed request.
#[derive(Debug, Clone)]
pub struct ResponseMeta {
    pub method: Method,
    /// Relative path as given by the caller.
    pub path: String,
    pub status: StatusCode,
}

/// Hook run after every response, before it is handed back to the caller.
#[async_trait]
pub trait ResponseInterceptor: Send + Sync {
    async fn on_response(&self, meta: &ResponseMeta);
}

/// Session-expiry policy: any 401, from any endpoint, ends the session.
///
/// Removes the stored bearer token and navigates the shell to the root path. The
/// response itself still goes back to the caller unchanged.
pub struct SessionExpiry {
    storage: Arc<dyn Storage>,
    shell: Arc<dyn Shell>,
    redirect_to: String,
}

impl SessionExpiry {
    pub fn new(storage: Arc<dyn Storage>, shell: Arc<dyn Shell>) -> Self {
        Self {
            storage,
            shell,
            redirect_to: "/".to_string(),
        }
    }

    pub fn redirect_to(mut self, path: impl Into<String>) -> Self {
        self.redirect_to = path.into();
        self
    }
}

#[async_trait]
impl ResponseInterceptor for SessionExpiry {
    async fn on_response(&self, meta: &ResponseMeta) {
        if meta.status != StatusCode::UNAUTHORIZED {
            return;
        }
        tracing::warn!(
            method = %meta.method,
            path = %meta.path,
            "session expired; clearing token"
        );
        if let Err(e) = self.storage.remove(TOKEN_KEY) {
            tracing::warn!(error = %e, "failed to clear access token");
        }
        self.shell.navigate(&self.redirect_to);
    }
}
