//! Theme preference store.

use crate::observable::{Observable, SubscriptionId};
use risk_types::{Shell, Storage, Theme, DARK_CLASS, THEME_KEY};
use std::sync::Arc;

/// Light/dark/system preference, persisted under `theme` and mirrored onto the root element.
///
/// Every change persists first, then updates the `dark` root class, then the observable.
/// A storage failure is logged and the remaining steps still run.
#[derive(Clone)]
pub struct ThemeStore {
    storage: Arc<dyn Storage>,
    shell: Arc<dyn Shell>,
    value: Observable<Theme>,
}

impl ThemeStore {
    pub fn new(storage: Arc<dyn Storage>, shell: Arc<dyn Shell>) -> Self {
        Self {
            storage,
            shell,
            value: Observable::new(Theme::System),
        }
    }

    pub fn get(&self) -> Theme {
        self.value.get()
    }

    pub fn subscribe<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&Theme) + Send + Sync + 'static,
    {
        self.value.subscribe(f)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.value.unsubscribe(id)
    }

    pub fn set(&self, theme: Theme) {
        if let Err(e) = self.storage.set(THEME_KEY, theme.as_str()) {
            tracing::warn!(error = %e, theme = %theme, "failed to persist theme");
        }
        self.apply(theme);
        self.value.set(theme);
    }

    /// Flip between light and dark. From `system` the result is light.
    pub fn toggle(&self) -> Theme {
        let next = self.value.get().toggled();
        self.set(next);
        next
    }

    /// Restore the persisted preference (default `system`) and apply it. Nothing is written back.
    pub fn init(&self) -> Theme {
        let stored = match self.storage.get(THEME_KEY) {
            Ok(v) => v,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme");
                None
            }
        };
        let theme = stored.as_deref().and_then(Theme::parse).unwrap_or_default();
        self.apply(theme);
        self.value.set(theme);
        theme
    }

    /// Whether the current preference renders dark right now.
    pub fn is_dark(&self) -> bool {
        self.value.get().is_dark(self.shell.prefers_dark())
    }

    fn apply(&self, theme: Theme) {
        let dark = theme.is_dark(self.shell.prefers_dark());
        self.shell.set_root_class(DARK_CLASS, dark);
        tracing::debug!(theme = %theme, dark, "theme applied");
    }
}

impl std::fmt::Debug for ThemeStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ThemeStore")
            .field("theme", &self.value.get())
            .finish()
    }
}
