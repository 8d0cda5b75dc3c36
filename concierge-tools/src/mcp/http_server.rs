//! Streamable HTTP transport with bearer token enforcement
//!
//! Uses the rmcp `StreamableHttpService` for the `/mcp` endpoint rather than
//! reimplementing the MCP protocol. Every `/mcp` request passes the token
//! gate before any protocol handling; `/health` stays open for liveness
//! probes.

use axum::extract::{Request, State};
use axum::http::{header, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use rmcp::transport::streamable_http_server::{
    session::local::LocalSessionManager, StreamableHttpService,
};
use std::net::SocketAddr;
use std::sync::Arc;
use thiserror::Error;
use tokio::net::TcpListener;
use tokio::sync::oneshot;

use concierge_config::ServerConfig;

use super::auth::{AuthError, TokenGate};
use super::server::McpServer;

/// Errors raised while starting the HTTP transport.
#[derive(Debug, Error)]
pub enum ServeError {
    /// The configured bearer secret is unusable.
    #[error(transparent)]
    Auth(#[from] AuthError),

    /// The listener could not be bound.
    #[error("Failed to bind to {addr}: {source}")]
    Bind {
        addr: String,
        #[source]
        source: std::io::Error,
    },
}

/// Handle for managing the HTTP MCP server lifecycle
#[derive(Debug)]
pub struct McpServerHandle {
    addr: SocketAddr,
    url: String,
    shutdown_tx: Option<oneshot::Sender<()>>,
}

impl McpServerHandle {
    /// The actual bound address (useful when binding port 0)
    pub fn addr(&self) -> SocketAddr {
        self.addr
    }

    /// The actual bound port
    pub fn port(&self) -> u16 {
        self.addr.port()
    }

    /// Full HTTP URL for connecting to the server
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Shutdown the server gracefully
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.shutdown_tx.take() {
            if tx.send(()).is_err() {
                tracing::warn!("Server shutdown signal receiver already dropped");
            }
        }
    }
}

/// Health check endpoint handler
async fn health_check() -> axum::response::Json<serde_json::Value> {
    axum::response::Json(serde_json::json!({
        "status": "healthy",
        "service": "concierge-mcp"
    }))
}

/// Rejects any request that does not carry the configured bearer credential.
///
/// Runs before MCP protocol handling, so an unauthorized call never reaches
/// a tool body.
async fn require_bearer(
    State(gate): State<Arc<TokenGate>>,
    request: Request,
    next: Next,
) -> Response {
    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| gate.authorize_header(value).is_ok());

    if authorized {
        next.run(request).await
    } else {
        tracing::debug!("rejected unauthorized MCP request");
        (
            StatusCode::UNAUTHORIZED,
            [(header::WWW_AUTHENTICATE, "Bearer")],
        )
            .into_response()
    }
}

/// Start the streamable HTTP MCP server.
///
/// Binds the configured address (port 0 requests a random port), nests the
/// rmcp service at `/mcp` behind the token gate, and serves until the
/// returned handle is shut down.
pub async fn start_http_server(config: Arc<ServerConfig>) -> Result<McpServerHandle, ServeError> {
    let gate = Arc::new(TokenGate::new(config.auth.token.clone())?);
    let server = McpServer::new(config.clone());

    let service = StreamableHttpService::new(
        move || Ok(server.clone()),
        LocalSessionManager::default().into(),
        Default::default(),
    );

    let router = axum::Router::new()
        .nest_service("/mcp", service)
        .layer(middleware::from_fn_with_state(gate, require_bearer))
        .route("/health", axum::routing::get(health_check));

    let bind_addr = config.bind_addr();
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|source| ServeError::Bind {
            addr: bind_addr.clone(),
            source,
        })?;
    let addr = listener
        .local_addr()
        .map_err(|source| ServeError::Bind {
            addr: bind_addr,
            source,
        })?;

    let url = format!("http://{addr}/mcp");
    tracing::info!("Concierge MCP server ready on {url}");

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    tokio::spawn(async move {
        let serve = axum::serve(listener, router).with_graceful_shutdown(async {
            let _ = shutdown_rx.await;
        });
        if let Err(e) = serve.await {
            tracing::error!("HTTP MCP server task error: {e}");
        }
    });

    Ok(McpServerHandle {
        addr,
        url,
        shutdown_tx: Some(shutdown_tx),
    })
}
