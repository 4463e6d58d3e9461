//! Transports for the reviews MCP server.
//!
//! Both runners take a shutdown future. When it resolves, the HTTP listener
//! stops accepting connections and drains in-flight requests, and the stdio
//! session is cancelled.

use std::error::Error;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use axum::routing::get;
use review_core::services::ServiceHandle;
use rmcp::serve_server;
use rmcp::transport::io::stdio;
use rmcp::transport::streamable_http_server::{
    StreamableHttpServerConfig,
    StreamableHttpService,
    session::local::LocalSessionManager,
};
use tokio::net::TcpListener;
use tracing::info;

use crate::ReviewsMcp;

pub type ServeResult = Result<(), Box<dyn Error + Send + Sync>>;

const MCP_PATH: &str = "/mcp";
const HEALTH_PATH: &str = "/health";

/// Listener settings for the streamable HTTP transport.
#[derive(Debug, Clone)]
pub struct McpHttpServerConfig {
    pub addr: SocketAddr,
    /// Track sessions across requests. Stateless mode answers each POST on its own.
    pub stateful_mode: bool,
    pub sse_keep_alive: Option<Duration>,
    pub sse_retry: Option<Duration>,
}

impl McpHttpServerConfig {
    #[must_use]
    pub const fn new(addr: SocketAddr) -> Self {
        Self {
            addr,
            stateful_mode: true,
            sse_keep_alive: Some(Duration::from_secs(15)),
            sse_retry: Some(Duration::from_secs(3)),
        }
    }

    #[must_use]
    pub const fn with_stateful_mode(mut self, stateful_mode: bool) -> Self {
        self.stateful_mode = stateful_mode;
        self
    }

    fn streamable_config(&self) -> StreamableHttpServerConfig {
        StreamableHttpServerConfig {
            sse_keep_alive: self.sse_keep_alive,
            sse_retry: self.sse_retry,
            stateful_mode: self.stateful_mode,
            ..Default::default()
        }
    }
}

/// Routes served over HTTP: a plain-text liveness probe and the MCP endpoint.
///
/// Every MCP session gets its own `ReviewsMcp`, all sharing `handle`.
#[must_use]
pub fn http_router(handle: Arc<ServiceHandle>, config: &McpHttpServerConfig) -> Router {
    let mcp: StreamableHttpService<ReviewsMcp, LocalSessionManager> = StreamableHttpService::new(
        move || Ok(ReviewsMcp::with_handle(handle.clone())),
        Arc::new(LocalSessionManager::default()),
        config.streamable_config(),
    );

    Router::new()
        .route(HEALTH_PATH, get(|| async { "ok" }))
        .nest_service(MCP_PATH, mcp)
}

/// Serves MCP over stdin/stdout until the client disconnects or `shutdown`
/// resolves.
///
/// # Errors
/// Returns an error if the MCP handshake fails or the session task panics.
pub async fn serve_stdio<F>(handle: Arc<ServiceHandle>, shutdown: F) -> ServeResult
where
    F: Future<Output = ()> + Send + 'static,
{
    let running = serve_server(ReviewsMcp::with_handle(handle), stdio()).await?;
    info!("serving MCP over stdio");

    let cancel = running.cancellation_token();
    let watcher = tokio::spawn(async move {
        shutdown.await;
        cancel.cancel();
    });
    let reason = running.waiting().await;
    watcher.abort();

    info!(?reason, "stdio session ended");
    reason?;
    Ok(())
}

/// Serves MCP over streamable HTTP at `/mcp` until `shutdown` resolves.
///
/// # Errors
/// Returns an error if the address cannot be bound or the server fails.
pub async fn serve_streamable_http<F>(
    handle: Arc<ServiceHandle>,
    config: McpHttpServerConfig,
    shutdown: F,
) -> ServeResult
where
    F: Future<Output = ()> + Send + 'static,
{
    let app = http_router(handle, &config);
    let listener = TcpListener::bind(config.addr).await?;
    let local_addr = listener.local_addr()?;
    info!(
        addr = %local_addr,
        stateful = config.stateful_mode,
        "serving MCP over streamable HTTP"
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown)
        .await?;
    info!(addr = %local_addr, "HTTP transport stopped");
    Ok(())
}
