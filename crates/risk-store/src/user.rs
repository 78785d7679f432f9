//! Current-user store.

use crate::observable::{Observable, SubscriptionId};
use risk_client::ApiClient;
use risk_types::{has_permission, Shell, UserProfile};
use std::sync::Arc;

/// Holds the signed-in user's profile, or `None` when there is no session.
#[derive(Clone)]
pub struct UserStore {
    api: ApiClient,
    shell: Arc<dyn Shell>,
    value: Observable<Option<UserProfile>>,
}

impl UserStore {
    pub fn new(api: ApiClient, shell: Arc<dyn Shell>) -> Self {
        Self {
            api,
            shell,
            value: Observable::new(None),
        }
    }

    pub fn get(&self) -> Option<UserProfile> {
        self.value.get()
    }

    pub fn set(&self, user: Option<UserProfile>) {
        self.value.set(user);
    }

    pub fn subscribe<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&Option<UserProfile>) + Send + Sync + 'static,
    {
        self.value.subscribe(f)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.value.unsubscribe(id)
    }

    /// Load `/users/me`. Any failure clears the store; nothing is returned to the caller.
    pub async fn fetch(&self) {
        match self.api.get::<UserProfile>("/users/me").await {
            Ok(user) => {
                tracing::debug!(username = %user.username, role = %user.role, "profile loaded");
                self.value.set(Some(user));
            }
            Err(e) => {
                tracing::error!(error = %e, status = ?e.status(), "failed to fetch profile");
                self.value.set(None);
            }
        }
    }

    /// Drop the stored token, forget the user and go back to the root page.
    pub fn logout(&self) {
        if let Err(e) = self.api.transport().clear_token() {
            tracing::warn!(error = %e, "failed to clear access token");
        }
        self.value.set(None);
        self.shell.navigate("/");
    }

    /// Permission check against the current user.
    pub fn can(&self, permission: &str) -> bool {
        has_permission(self.value.get().as_ref(), permission)
    }
}

impl std::fmt::Debug for UserStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UserStore")
            .field("user", &self.value.get().map(|u| u.username))
            .finish()
    }
}
