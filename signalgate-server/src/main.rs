//! SignalGate webhook server.
//!
//! Accepts candle windows on `POST /webhook/listing`, scores them, and sends
//! the rendered decision to Telegram unless an identical decision was sent
//! within the dedup window.

use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;

use signalgate_server::{build_state, serve, ServerConfig};

#[derive(Parser)]
#[command(
    name = "signalgate-server",
    about = "SignalGate — listing webhook scoring and Telegram alerts"
)]
struct Cli {
    /// Path to a TOML config file. Environment variables override it.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Bind address, overrides config and SIGNALGATE_BIND.
    #[arg(long)]
    bind: Option<String>,

    /// Log messages instead of sending them to Telegram.
    #[arg(long, default_value_t = false)]
    dry_run: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();
    let mut config = ServerConfig::load(cli.config.as_deref())?;
    if let Some(bind) = cli.bind {
        config.bind = bind;
    }

    let state = build_state(&config, cli.dry_run)?;
    serve(state, &config.bind, shutdown_signal()).await
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("failed to listen for ctrl-c: {e}");
        std::future::pending::<()>().await;
    }
    log::info!("received ctrl-c, shutting down");
}
