mod answers;
mod binding;
mod catalog;
mod config;
mod session;
mod submit;
mod tui;

use std::time::Duration;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::session::FormSession;
use crate::submit::SubmitClient;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Structured logging goes to stderr so the alternate screen stays clean.
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Starting apply v{}", env!("CARGO_PKG_VERSION"));

    let catalog = catalog::load_catalog()?;
    info!("Field catalog loaded ({} fields)", catalog.len());

    let client = SubmitClient::new(Duration::from_secs(config.submit_timeout_secs));
    let mut session = FormSession::new(catalog);

    tui::run(&mut session, client).await
}
