//! `trellis` demo server.
//!
//! ```text
//! CLI args → config (file or defaults) → logging → user table
//!     → sample handler tree → HttpServer → serve until SIGINT/SIGTERM
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;

use trellis::config::{load_config, AppConfig};
use trellis::demo::sample_tree;
use trellis::lifecycle::{wait_for_signal, Shutdown};
use trellis::observability;
use trellis::security::StaticUsers;
use trellis::HttpServer;

#[derive(Debug, Parser)]
#[command(name = "trellis", version, about = "Serve the sample handler tree")]
struct Cli {
    /// Path to a TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => AppConfig::default(),
    };

    observability::init(&config.observability)?;

    tracing::info!(
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        max_body_size = config.limits.max_body_size,
        "Configuration loaded"
    );

    let users = if config.auth.users.is_empty() {
        tracing::warn!("No users configured, accepting the demo user Bond");
        StaticUsers::new().with_user("Bond", "007", Vec::new())
    } else {
        StaticUsers::from_config(&config.auth.users)
    };
    tracing::info!(users = users.len(), "User table ready");

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let signalled = shutdown.signalled();
    tokio::spawn({
        let shutdown = shutdown.clone();
        async move {
            wait_for_signal().await;
            shutdown.trigger();
        }
    });

    let server = HttpServer::new(config, sample_tree(users));
    server.run(listener, signalled).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
