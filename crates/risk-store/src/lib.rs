//! Observable client state.
//!
//! Each store wraps an [`Observable`] and mutates it only through its own methods;
//! subscribers are notified synchronously on the caller's turn.

mod observable;
mod theme;
mod toast;
mod user;

pub use observable::{Observable, SubscriptionId};
pub use theme::ThemeStore;
pub use toast::{ToastStore, DEFAULT_TOAST_DURATION};
pub use user::UserStore;
