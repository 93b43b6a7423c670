// crates/server/src/main.rs
//! Outreach stats server binary.

use anyhow::Result;
use clap::Parser;
use outreach_stats_db::Database;
use outreach_stats_server::config::Cli;
use outreach_stats_server::{create_app, init_metrics};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("warn,outreach_stats_server=info")),
        )
        .compact()
        .init();

    let cli = Cli::parse();

    init_metrics();

    let db = match &cli.db {
        Some(path) => Database::new(path).await?,
        None => Database::open_default().await?,
    };

    let app = create_app(db);

    let addr = cli.addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!(%addr, "Outreach stats API listening");
    eprintln!("\n  outreach-stats v{}", env!("CARGO_PKG_VERSION"));
    eprintln!("  \u{2192} http://{}\n", addr);

    axum::serve(listener, app).await?;
    Ok(())
}
