//! Platform implementations: key/value storage and host shells.
//!
//! `MemoryStorage` and `HeadlessShell` are the defaults outside a browser;
//! `JsonFileStorage` persists across processes; `RecordingShell` captures side effects
//! for assertions.

mod file;
mod memory;
mod shell;

pub use file::JsonFileStorage;
pub use memory::MemoryStorage;
pub use risk_types::{Shell, Storage, StorageError};
pub use shell::{HeadlessShell, RecordingShell};
