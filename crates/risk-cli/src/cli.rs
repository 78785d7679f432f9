//! Command-line definitions.

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use risk_types::Theme;
use std::path::PathBuf;

#[derive(Debug, Parser)]
#[command(
    name = "riskctl",
    about = "Command-line client for the operational risk API",
    version,
    long_about = None
)]
pub struct Cli {
    /// API root, e.g. `http://localhost:8000/api/v1`. Overrides `RISK_API_BASE_URL`.
    #[arg(long, global = true)]
    pub base_url: Option<String>,

    /// State file holding the access token and theme.
    ///
    /// Defaults to `$RISKCTL_STATE`, then `$HOME/.riskctl/state.json`.
    #[arg(long, global = true)]
    pub state: Option<PathBuf>,

    /// Print JSON instead of text.
    #[arg(long, global = true)]
    pub json: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in and store the access token.
    Login {
        #[arg(short, long)]
        username: String,
        /// Falls back to `RISKCTL_PASSWORD`.
        #[arg(short, long)]
        password: Option<String>,
        /// One-time code when two-factor auth is enabled.
        #[arg(long)]
        otp: Option<String>,
    },

    /// Forget the stored access token.
    Logout,

    /// Show the signed-in user.
    Whoami,

    /// List risk events.
    Incidents {
        #[arg(long)]
        status: Option<String>,
        #[arg(long)]
        severity: Option<String>,
        /// Substring of the maker's name.
        #[arg(long)]
        maker: Option<String>,
        /// Inclusive start date, `YYYY-MM-DD`.
        #[arg(long = "from")]
        date_from: Option<NaiveDate>,
        /// Inclusive end date, `YYYY-MM-DD`.
        #[arg(long = "to")]
        date_to: Option<NaiveDate>,
        #[arg(long)]
        page: Option<u32>,
        #[arg(long)]
        limit: Option<u32>,
    },

    /// Requests waiting for a checker.
    Pending,

    /// Requests I submitted.
    Mine,

    /// Submit a change request read from a JSON file.
    Submit {
        file: PathBuf,
    },

    /// Approve a pending request.
    Approve {
        id: String,
    },

    /// Reject a pending request.
    Reject {
        id: String,
    },

    /// Check whether the signed-in user holds a permission.
    Can {
        permission: String,
    },

    /// List login sessions.
    Sessions,

    /// Revoke a login session.
    RevokeSession {
        id: String,
    },

    /// Show or change the colour theme.
    Theme {
        #[command(subcommand)]
        action: Option<ThemeAction>,
    },

    /// Print the mock incident set.
    Mock {
        /// Date the generated records count back from (default: today).
        #[arg(long)]
        anchor: Option<NaiveDate>,
    },
}

#[derive(Debug, Subcommand)]
pub enum ThemeAction {
    /// light, dark or system.
    Set { theme: Theme },
    /// Switch between light and dark.
    Toggle,
}

/// State file location when `--state` is not given.
pub fn default_state_path() -> PathBuf {
    if let Ok(path) = std::env::var("RISKCTL_STATE") {
        if !path.is_empty() {
            return PathBuf::from(path);
        }
    }
    let home = std::env::var("HOME").unwrap_or_else(|_| ".".to_string());
    PathBuf::from(home).join(".riskctl").join("state.json")
}
