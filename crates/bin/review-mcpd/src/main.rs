//! Daemon entry point for the restaurant reviews MCP server.
//!
//! Loads configuration from the environment, opens the shared review store,
//! and serves the MCP protocol over streamable HTTP and/or stdio until every
//! transport stops or Ctrl-C is received.

mod config;
mod logging;

use std::sync::Arc;

use review_core::services::ServiceHandle;
use review_mcp::server::{McpHttpServerConfig, ServeResult, serve_stdio, serve_streamable_http};
use tokio::sync::watch;
use tokio::task::JoinSet;
use tracing::info;

use crate::config::ReviewsConfig;

type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Resolves once shutdown is requested or the sender is gone.
async fn shutdown_requested(mut stop: watch::Receiver<bool>) {
    while !*stop.borrow_and_update() {
        if stop.changed().await.is_err() {
            return;
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = ReviewsConfig::from_args()?;
    logging::init(&config.log_level);

    let handle = ServiceHandle::connect(&config.store_config(), config.control_options()).await?;
    let handle = Arc::new(handle);
    let (stop_tx, stop_rx) = watch::channel(false);

    let mut transports: JoinSet<ServeResult> = JoinSet::new();
    if config.mcp_serve {
        let http_config = McpHttpServerConfig::new(config.mcp_http_addr)
            .with_stateful_mode(!config.mcp_stateless);
        transports.spawn(serve_streamable_http(
            handle.clone(),
            http_config,
            shutdown_requested(stop_rx.clone()),
        ));
    }
    if config.enable_stdio {
        transports.spawn(serve_stdio(handle.clone(), shutdown_requested(stop_rx)));
    }

    let mut stopping = false;
    loop {
        tokio::select! {
            signal = tokio::signal::ctrl_c(), if !stopping => {
                signal?;
                info!("shutdown requested");
                stopping = true;
                stop_tx.send_replace(true);
            }
            finished = transports.join_next() => match finished {
                Some(finished) => finished??,
                None => break,
            },
        }
    }
    info!("all transports stopped");
    Ok(())
}
