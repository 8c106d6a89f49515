//! MCP method handler: routes JSON-RPC methods to the tool registry and the
//! category resource.
//!
//! Bad call shapes (unknown tool, missing or mistyped argument) come back as
//! JSON-RPC errors. Backend failures during a tool call come back as a tool
//! result with `isError: true`.

use crate::mcp::protocol::{
    self, JsonRpcRequest, METHOD_NOT_FOUND, PROTOCOL_VERSION, SERVER_INSTRUCTIONS, SERVER_NAME,
    SERVER_VERSION,
};
use crate::resources::{CategoryResource, CATEGORIES_URI};
use crate::store::ExpenseStore;
use crate::tools::{expense_tools, ToolRegistry};
use crate::types::{Error, Result};
use serde_json::{json, Value};
use std::sync::Arc;

/// Shared MCP request handler. Cheap to clone.
#[derive(Debug, Clone)]
pub struct McpHandler {
    registry: Arc<ToolRegistry>,
    categories: CategoryResource,
}

impl McpHandler {
    pub fn new(registry: ToolRegistry, categories: CategoryResource) -> Self {
        Self {
            registry: Arc::new(registry),
            categories,
        }
    }

    /// Handler serving the expense tools over `store`.
    pub fn with_expense_tools(store: Arc<ExpenseStore>, categories: CategoryResource) -> Result<Self> {
        let mut registry = ToolRegistry::new();
        expense_tools::register_all(&mut registry, store)?;
        Ok(Self::new(registry, categories))
    }

    pub fn registry(&self) -> &ToolRegistry {
        &self.registry
    }

    /// Handle one decoded JSON-RPC message. Returns `None` for notifications.
    pub async fn handle(&self, message: Value) -> Option<Value> {
        let request = match JsonRpcRequest::parse(message) {
            Ok(request) => request,
            Err(response) => return Some(response),
        };

        let notification = request.is_notification();
        tracing::debug!(method = %request.method, notification, "mcp request");
        let outcome = self.dispatch(&request.method, request.params).await;
        if notification {
            return None;
        }

        let id = request.id.unwrap_or(Value::Null);
        Some(match outcome {
            Ok(result) => protocol::success(&id, result),
            Err(error) => protocol::failure(&id, error),
        })
    }

    async fn dispatch(&self, method: &str, params: Value) -> std::result::Result<Value, Value> {
        match method {
            "initialize" => Ok(json!({
                "protocolVersion": PROTOCOL_VERSION,
                "capabilities": {
                    "tools": {},
                    "resources": {},
                },
                "serverInfo": {
                    "name": SERVER_NAME,
                    "version": SERVER_VERSION,
                },
                "instructions": SERVER_INSTRUCTIONS,
            })),

            "notifications/initialized" | "notifications/cancelled" => Ok(Value::Null),

            "ping" => Ok(json!({})),

            "tools/list" => {
                let tools: Vec<Value> = self.registry.entries().map(|e| e.to_listing()).collect();
                Ok(json!({ "tools": tools }))
            }

            "tools/call" => self.call_tool(params).await,

            "resources/list" => Ok(json!({
                "resources": [self.categories.to_listing()],
            })),

            "resources/templates/list" => Ok(json!({ "resourceTemplates": [] })),

            "resources/read" => self
                .read_resource(params)
                .await
                .map_err(|e| e.to_rpc_error()),

            _ => Err(protocol::rpc_error(
                METHOD_NOT_FOUND,
                format!("Unknown method: {}", method),
            )),
        }
    }

    async fn call_tool(&self, params: Value) -> std::result::Result<Value, Value> {
        let name = params
            .get("name")
            .and_then(|v| v.as_str())
            .map(|s| s.to_string())
            .ok_or_else(|| {
                Error::validation("tools/call requires a string 'name'").to_rpc_error()
            })?;
        let arguments = params.get("arguments").cloned().unwrap_or(Value::Null);

        let registry = self.registry.clone();
        let tool = name.clone();
        let outcome = tokio::task::spawn_blocking(move || registry.invoke(&tool, &arguments))
            .await
            .unwrap_or_else(|e| Err(Error::internal(format!("tool task failed: {}", e))));

        match outcome {
            Ok(value) => tool_result(value).map_err(|e| e.to_rpc_error()),
            Err(e) if e.is_call_shape() => {
                tracing::debug!(tool = %name, error = %e, "rejected tool call");
                Err(e.to_rpc_error())
            }
            Err(e) => {
                tracing::warn!(tool = %name, error = %e, "tool call failed");
                Ok(tool_error(&e))
            }
        }
    }

    async fn read_resource(&self, params: Value) -> Result<Value> {
        let uri = params
            .get("uri")
            .and_then(|v| v.as_str())
            .ok_or_else(|| Error::validation("resources/read requires a string 'uri'"))?;
        if uri != CATEGORIES_URI {
            return Err(Error::not_found(format!("Unknown resource: {}", uri)));
        }

        let categories = self.categories.clone();
        let contents = tokio::task::spawn_blocking(move || categories.contents())
            .await
            .map_err(|e| Error::internal(format!("resource task failed: {}", e)))??;
        Ok(json!({ "contents": [contents] }))
    }
}

fn tool_result(value: Value) -> Result<Value> {
    let text = serde_json::to_string(&value)?;
    Ok(json!({
        "content": [{ "type": "text", "text": text }],
        "structuredContent": { "result": value },
        "isError": false,
    }))
}

fn tool_error(error: &Error) -> Value {
    json!({
        "content": [{ "type": "text", "text": format!("{}: {}", error.kind(), error) }],
        "isError": true,
    })
}
