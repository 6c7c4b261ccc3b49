//! SignalGate Server: the webhook boundary around `signalgate-core`.
//!
//! - `config`: layered defaults / TOML / environment configuration
//! - `dedup`: file-backed suppression of repeat notifications
//! - `notifier`: Telegram delivery and the dry-run log notifier
//! - `routes`: axum router for `/health` and `/webhook/listing`

pub mod config;
pub mod dedup;
pub mod error;
pub mod notifier;
pub mod routes;
pub mod state;

pub use config::{ConfigError, DedupConfig, ServerConfig, TelegramConfig};
pub use dedup::{DedupError, DedupGate};
pub use error::ApiError;
pub use notifier::{LogNotifier, Notifier, NotifyError, TelegramNotifier};
pub use routes::create_router;
pub use state::AppState;

use anyhow::{Context, Result};
use signalgate_core::DecisionEngine;
use std::future::Future;
use std::sync::Arc;
use tokio::net::TcpListener;

/// Wire the engine, dedup store and notifier from `config`.
///
/// With `dry_run` set, messages go to the log and Telegram credentials are
/// not required.
pub fn build_state(config: &ServerConfig, dry_run: bool) -> Result<Arc<AppState>> {
    let notifier: Arc<dyn Notifier> = if dry_run {
        Arc::new(LogNotifier)
    } else {
        config.require_telegram()?;
        Arc::new(TelegramNotifier::new(&config.telegram)?)
    };
    let dedup = DedupGate::open(&config.dedup.state_path, config.dedup.window_secs)
        .context("opening dedup state")?;

    log::info!(
        "dedup window {}s at {}, notifier {}",
        config.dedup.window_secs,
        config.dedup.state_path.display(),
        notifier.name()
    );

    Ok(Arc::new(AppState::new(
        DecisionEngine::new(config.risk),
        dedup,
        notifier,
    )))
}

/// Bind `addr` and serve until `shutdown` resolves.
pub async fn serve(
    state: Arc<AppState>,
    addr: &str,
    shutdown: impl Future<Output = ()> + Send + 'static,
) -> Result<()> {
    let listener = TcpListener::bind(addr)
        .await
        .with_context(|| format!("failed to bind {addr}"))?;
    log::info!("listening on http://{}", listener.local_addr()?);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown)
        .await
        .context("server error")?;

    log::info!("server stopped");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[allow(dead_code)]
    fn assert_send_sync() {
        fn require_send<T: Send>() {}
        fn require_sync<T: Sync>() {}

        require_send::<AppState>();
        require_sync::<AppState>();
        require_send::<DedupGate>();
        require_sync::<DedupGate>();
        require_send::<Arc<dyn Notifier>>();
        require_sync::<Arc<dyn Notifier>>();
    }

    #[test]
    fn live_mode_requires_credentials() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServerConfig::default();
        config.dedup.state_path = dir.path().join("state.json");
        assert!(build_state(&config, false).is_err());
    }

    #[test]
    fn dry_run_uses_log_notifier() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = ServerConfig::default();
        config.dedup.state_path = dir.path().join("state.json");
        let state = build_state(&config, true).unwrap();
        assert_eq!(state.notifier.name(), "log");
        assert_eq!(state.dedup.window_secs(), 900);
    }
}
