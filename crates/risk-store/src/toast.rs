//! Toast notification store.

use crate::observable::{Observable, SubscriptionId};
use risk_types::{Toast, ToastKind};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

/// Auto-dismiss delay used by the convenience wrappers.
pub const DEFAULT_TOAST_DURATION: u64 = 3000;

/// Ordered list of visible toasts; insertion order is display order.
#[derive(Clone, Default)]
pub struct ToastStore {
    value: Observable<Vec<Toast>>,
    last_id: Arc<AtomicU64>,
}

impl ToastStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self) -> Vec<Toast> {
        self.value.get()
    }

    pub fn subscribe<F>(&self, f: F) -> SubscriptionId
    where
        F: Fn(&Vec<Toast>) + Send + Sync + 'static,
    {
        self.value.subscribe(f)
    }

    pub fn unsubscribe(&self, id: SubscriptionId) -> bool {
        self.value.unsubscribe(id)
    }

    /// Append a toast and return its id.
    ///
    /// A non-zero `duration_ms` schedules removal on the current tokio runtime. Outside a
    /// runtime the toast stays until dismissed.
    pub fn add(&self, message: impl Into<String>, kind: ToastKind, duration_ms: u64) -> u64 {
        let toast = Toast {
            id: self.next_id(),
            message: message.into(),
            kind,
            duration_ms,
        };
        let id = toast.id;
        self.value.update(|list| {
            let mut next = list.clone();
            next.push(toast);
            next
        });

        if duration_ms > 0 {
            match tokio::runtime::Handle::try_current() {
                Ok(handle) => {
                    let store = self.clone();
                    handle.spawn(async move {
                        tokio::time::sleep(Duration::from_millis(duration_ms)).await;
                        store.dismiss(id);
                    });
                }
                Err(_) => {
                    tracing::warn!(id, duration_ms, "no async runtime; toast will not auto-dismiss");
                }
            }
        }
        id
    }

    pub fn add_with_default(&self, message: impl Into<String>, kind: ToastKind) -> u64 {
        self.add(message, kind, DEFAULT_TOAST_DURATION)
    }

    /// Remove a toast. Unknown ids are ignored.
    pub fn dismiss(&self, id: u64) {
        self.value.update(|list| list.iter().filter(|t| t.id != id).cloned().collect());
    }

    /// `duration_ms` of `None` means [`DEFAULT_TOAST_DURATION`]; `Some(0)` keeps the toast.
    pub fn success(
        &self,
        message: impl Into<String>,
        duration_ms: impl Into<Option<u64>>,
    ) -> u64 {
        self.add_or_default(message, ToastKind::Success, duration_ms.into())
    }

    pub fn error(&self, message: impl Into<String>, duration_ms: impl Into<Option<u64>>) -> u64 {
        self.add_or_default(message, ToastKind::Error, duration_ms.into())
    }

    pub fn info(&self, message: impl Into<String>, duration_ms: impl Into<Option<u64>>) -> u64 {
        self.add_or_default(message, ToastKind::Info, duration_ms.into())
    }

    pub fn warning(
        &self,
        message: impl Into<String>,
        duration_ms: impl Into<Option<u64>>,
    ) -> u64 {
        self.add_or_default(message, ToastKind::Warning, duration_ms.into())
    }

    fn add_or_default(
        &self,
        message: impl Into<String>,
        kind: ToastKind,
        duration_ms: Option<u64>,
    ) -> u64 {
        self.add(message, kind, duration_ms.unwrap_or(DEFAULT_TOAST_DURATION))
    }

    // Millisecond timestamp, bumped past the previous id when the clock hasn't moved.
    fn next_id(&self) -> u64 {
        let now = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis() as u64)
            .unwrap_or(0);
        let mut prev = self.last_id.load(Ordering::SeqCst);
        loop {
            let candidate = now.max(prev + 1);
            match self
                .last_id
                .compare_exchange(prev, candidate, Ordering::SeqCst, Ordering::SeqCst)
            {
                Ok(_) => return candidate,
                Err(actual) => prev = actual,
            }
        }
    }
}

impl std::fmt::Debug for ToastStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ToastStore")
            .field("toasts", &self.value.get().len())
            .finish()
    }
}
