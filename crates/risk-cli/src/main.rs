//! riskctl: command-line client for the operational risk API.

use clap::Parser;
use risk_cli::{App, Cli};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "warn".into()),
        ))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();
    let code = match App::from_cli(&cli) {
        Ok(app) => {
            let mut stdout = std::io::stdout().lock();
            let result = app.run(cli.command, &mut stdout).await;
            for toast in app.toasts().get() {
                eprintln!("[{}] {}", toast.kind, toast.message);
            }
            match result {
                Ok(()) => 0,
                Err(e) => {
                    tracing::debug!(error = ?e, "command failed");
                    eprintln!("error: {}", e.message());
                    e.exit_code()
                }
            }
        }
        Err(e) => {
            eprintln!("error: {}", e.message());
            e.exit_code()
        }
    };
    std::process::exit(code);
}
