//! `riskctl`: operator CLI over the risk client, stores and fixtures.

pub mod app;
pub mod cli;
mod error;
mod render;

pub use app::App;
pub use cli::{default_state_path, Cli, Command, ThemeAction};
pub use error::CliError;
