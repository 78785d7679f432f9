//! Core types and traits for the operational risk incident client.
//!
//! Wire types match the `/api/v1` REST API; platform traits abstract the browser
//! globals (local storage, navigation, document classes) so the client and stores can
//! run and be tested anywhere.

mod dto;
mod incident;
pub mod permissions;
mod traits;
mod ui;
mod user;

pub use dto::*;
pub use incident::*;
pub use permissions::has_permission;
pub use traits::*;
pub use ui::*;
pub use user::*;
