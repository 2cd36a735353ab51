//! Plateshop server
//!
//! Serves the public product catalog and the token-gated admin API.

#![forbid(unsafe_code)]

use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use plateshop_api::ServerConfig;

/// Plateshop - VIP number plate catalog server
#[derive(Parser, Debug)]
#[command(name = "plateshop")]
#[command(version, about, long_about = None)]
struct Args {
    /// Configuration file path (TOML)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port to listen on (overrides config and PORT)
    #[arg(short, long)]
    port: Option<u16>,

    /// Product CSV file
    #[arg(long)]
    data_file: Option<PathBuf>,

    /// Directory of storefront assets
    #[arg(long, conflicts_with = "no_static")]
    static_dir: Option<PathBuf>,

    /// Do not serve static assets
    #[arg(long)]
    no_static: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,plateshop=debug,tower_http=info".into()),
        )
        .init();

    let mut config = ServerConfig::load(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.port = port;
    }
    if let Some(data_file) = args.data_file {
        config.data_file = data_file;
    }
    if let Some(static_dir) = args.static_dir {
        config.static_dir = Some(static_dir);
    }
    if args.no_static {
        config.static_dir = None;
    }

    tracing::info!(
        mode = ?config.auth.mode,
        "Starting plateshop v{}",
        env!("CARGO_PKG_VERSION")
    );

    if let Err(e) = plateshop_api::serve(config).await {
        tracing::error!("Server failed: {e}");
        return Err(e.into());
    }
    Ok(())
}
