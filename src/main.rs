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

use relaydesk::config::Config;
use relaydesk::telemetry;
use std::future::IntoFuture;
use std::net::SocketAddr;
use tokio::sync::watch;
use tracing::Instrument;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::load();
    telemetry::init_telemetry(&config.telemetry)?;

    let boot_span = tracing::info_span!("boot_server");
    let (listener, router, shutdown_rx) = async {
        let (shutdown_tx, shutdown_rx) = watch::channel(false);
        relaydesk::spawn_signal_handler(shutdown_tx);

        let store = relaydesk::build_store(&config);
        let router = relaydesk::build_router(config.clone(), &store);

        let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
        let listener = tokio::net::TcpListener::bind(addr).await?;
        tracing::info!(address = %addr, page_size = config.messaging.page_size, "listening");

        Ok::<_, anyhow::Error>((listener, router, shutdown_rx))
    }
    .instrument(boot_span)
    .await?;

    let mut serve_rx = shutdown_rx.clone();
    let server = axum::serve(listener, router).with_graceful_shutdown(async move {
        let _ = serve_rx.wait_for(|&s| s).await;
    });

    let mut timeout_rx = shutdown_rx;
    let shutdown_timeout = std::time::Duration::from_secs(config.server.shutdown_timeout_secs);
    tokio::select! {
        result = server.into_future() => {
            if let Err(e) = result {
                tracing::error!(error = %e, "Server error");
            }
        }
        () = async {
            let _ = timeout_rx.wait_for(|&s| s).await;
            tokio::time::sleep(shutdown_timeout).await;
        } => {
            tracing::warn!("Timeout waiting for in-flight requests to finish.");
        }
    }

    tracing::info!("Server stopped");
    Ok(())
}
