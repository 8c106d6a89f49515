//! HTTP transport: `POST /mcp` carries one JSON-RPC message per request.

use axum::{
    body::Bytes,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::{get, post},
    Router,
};
use serde_json::{json, Value};
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tokio_util::sync::CancellationToken;
use tower_http::trace::TraceLayer;

use crate::mcp::handler::McpHandler;
use crate::mcp::protocol;

/// HTTP server wrapping the MCP handler.
#[derive(Debug)]
pub struct HttpServer {
    handler: McpHandler,
    addr: SocketAddr,
    cancel: CancellationToken,
}

impl HttpServer {
    pub fn new(handler: McpHandler, addr: SocketAddr) -> Self {
        Self {
            handler,
            addr,
            cancel: CancellationToken::new(),
        }
    }

    /// Bind `addr` and serve until shutdown is requested.
    pub async fn serve(&self) -> std::io::Result<()> {
        let listener = TcpListener::bind(self.addr).await?;
        self.serve_on(listener).await
    }

    /// Serve on an already-bound listener.
    pub async fn serve_on(&self, listener: TcpListener) -> std::io::Result<()> {
        tracing::info!("MCP HTTP server listening on {}", listener.local_addr()?);
        let cancel = self.cancel.clone();
        axum::serve(listener, router(self.handler.clone()))
            .with_graceful_shutdown(async move {
                cancel.cancelled().await;
                tracing::info!("MCP HTTP server shutting down");
            })
            .await
    }

    /// Token that stops `serve` gracefully when cancelled.
    pub fn cancellation_token(&self) -> CancellationToken {
        self.cancel.clone()
    }
}

/// Routes: `POST /mcp`, `GET /health`.
pub fn router(handler: McpHandler) -> Router {
    Router::new()
        .route("/mcp", post(mcp_endpoint))
        .route("/health", get(health_check))
        .layer(TraceLayer::new_for_http())
        .with_state(handler)
}

async fn mcp_endpoint(State(handler): State<McpHandler>, body: Bytes) -> Response {
    let message: Value = match serde_json::from_slice(&body) {
        Ok(message) => message,
        Err(e) => {
            tracing::debug!("rejecting unparseable body: {}", e);
            return (StatusCode::BAD_REQUEST, Json(protocol::parse_error(&e))).into_response();
        }
    };

    match handler.handle(message).await {
        Some(response) => Json(response).into_response(),
        None => StatusCode::ACCEPTED.into_response(),
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
