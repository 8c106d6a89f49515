//! MCP transport layer.
//!
//! JSON-RPC 2.0 framing, method routing, and two transports: HTTP (axum) and
//! newline-delimited stdio.

pub mod handler;
pub mod protocol;
pub mod server;
pub mod stdio;

pub use handler::McpHandler;
pub use server::HttpServer;
