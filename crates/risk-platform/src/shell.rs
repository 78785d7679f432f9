//! Shells for running outside a browser.

use risk_types::Shell;
use std::collections::BTreeSet;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

/// No-op shell for CLIs and servers. Calls are logged at debug level.
#[derive(Debug, Clone, Default)]
pub struct HeadlessShell {
    prefers_dark: bool,
}

impl HeadlessShell {
    pub fn new() -> Self {
        Self::default()
    }

    /// Headless shell reporting the given OS colour preference.
    pub fn with_dark_preference(prefers_dark: bool) -> Self {
        Self { prefers_dark }
    }
}

impl Shell for HeadlessShell {
    fn navigate(&self, path: &str) {
        tracing::debug!(path, "navigate ignored (headless)");
    }

    fn set_root_class(&self, class: &str, enabled: bool) {
        tracing::debug!(class, enabled, "root class ignored (headless)");
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark
    }
}

#[derive(Default)]
struct Recorded {
    navigations: Vec<String>,
    classes: BTreeSet<String>,
}

/// Shell that records navigations and root classes. Clones share the record.
#[derive(Clone, Default)]
pub struct RecordingShell {
    recorded: Arc<Mutex<Recorded>>,
    prefers_dark: Arc<AtomicBool>,
}

impl RecordingShell {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_prefers_dark(&self, dark: bool) {
        self.prefers_dark.store(dark, Ordering::SeqCst);
    }

    /// Every path navigated to, oldest first.
    pub fn navigations(&self) -> Vec<String> {
        self.lock().navigations.clone()
    }

    pub fn last_navigation(&self) -> Option<String> {
        self.lock().navigations.last().cloned()
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.lock().classes.contains(class)
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Recorded> {
        self.recorded.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Shell for RecordingShell {
    fn navigate(&self, path: &str) {
        self.lock().navigations.push(path.to_string());
    }

    fn set_root_class(&self, class: &str, enabled: bool) {
        let mut guard = self.lock();
        if enabled {
            guard.classes.insert(class.to_string());
        } else {
            guard.classes.remove(class);
        }
    }

    fn prefers_dark(&self) -> bool {
        self.prefers_dark.load(Ordering::SeqCst)
    }
}
