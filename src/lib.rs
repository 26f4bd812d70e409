#![forbid(unsafe_code)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::todo)]
#![warn(clippy::panic)]
#![warn(clippy::dbg_macro)]
#![warn(clippy::print_stdout)]
#![warn(clippy::print_stderr)]
#![warn(clippy::clone_on_ref_ptr)]
#![warn(unreachable_pub)]
#![warn(missing_debug_implementations)]
#![warn(unused_qualifications)]
#![deny(unused_must_use)]

pub mod api;
pub mod client;
pub mod config;
pub mod domain;
pub mod error;
pub mod services;
pub mod storage;
pub mod telemetry;

use crate::config::Config;
use crate::services::Services;
use crate::storage::InMemoryStore;
use time::OffsetDateTime;
use tokio::sync::watch;

/// Builds the store the server runs against, seeded when configured.
#[must_use]
pub fn build_store(config: &Config) -> InMemoryStore {
    if config.seed_demo_data {
        tracing::info!(user_id = %config.user_id, "Loading demo data");
        InMemoryStore::seeded(&config.user_id, OffsetDateTime::now_utc())
    } else {
        InMemoryStore::new()
    }
}

/// Builds the router over `store` with every service wired in.
#[must_use]
pub fn build_router(config: Config, store: &InMemoryStore) -> axum::Router {
    let services = Services::new(store, &config);
    api::app_router(config, services)
}

/// Flips `shutdown_tx` on ctrl-c or SIGTERM.
pub fn spawn_signal_handler(shutdown_tx: watch::Sender<bool>) {
    tokio::spawn(async move {
        let ctrl_c = async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                tracing::error!(error = %e, "Failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        };

        #[cfg(unix)]
        let terminate = async {
            match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
                Ok(mut signal) => {
                    signal.recv().await;
                }
                Err(e) => {
                    tracing::error!(error = %e, "Failed to install SIGTERM handler");
                    std::future::pending::<()>().await;
                }
            }
        };

        #[cfg(not(unix))]
        let terminate = std::future::pending::<()>();

        tokio::select! {
            () = ctrl_c => {},
            () = terminate => {},
        }

        tracing::info!("Shutdown signal received");
        let _ = shutdown_tx.send(true);
    });
}
