//! JSON-RPC 2.0 envelope handling for MCP messages.

use serde::{Deserialize, Deserializer};
use serde_json::{json, Value};

pub const JSONRPC_VERSION: &str = "2.0";
pub const PROTOCOL_VERSION: &str = "2025-03-26";

pub const SERVER_NAME: &str = "Expense Tracker MCP";
pub const SERVER_VERSION: &str = env!("CARGO_PKG_VERSION");
pub const SERVER_INSTRUCTIONS: &str = "Track, list, and summarize expenses stored in SQLite.";

pub const PARSE_ERROR: i64 = -32700;
pub const INVALID_REQUEST: i64 = -32600;
pub const METHOD_NOT_FOUND: i64 = -32601;

/// An inbound request or notification.
#[derive(Debug, Clone, Deserialize)]
pub struct JsonRpcRequest {
    pub jsonrpc: String,
    /// Absent for notifications. An explicit `null` id is still a request.
    #[serde(default, deserialize_with = "present_id")]
    pub id: Option<Value>,
    pub method: String,
    #[serde(default)]
    pub params: Value,
}

fn present_id<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl JsonRpcRequest {
    pub fn is_notification(&self) -> bool {
        self.id.is_none()
    }

    /// Parse a decoded message. On failure returns the error response to send.
    pub fn parse(message: Value) -> Result<Self, Value> {
        let id = message.get("id").cloned().unwrap_or(Value::Null);
        let request: JsonRpcRequest = serde_json::from_value(message).map_err(|e| {
            failure(&id, rpc_error(INVALID_REQUEST, format!("Invalid request: {}", e)))
        })?;
        if request.jsonrpc != JSONRPC_VERSION {
            return Err(failure(
                &id,
                rpc_error(
                    INVALID_REQUEST,
                    format!("Unsupported jsonrpc version: {}", request.jsonrpc),
                ),
            ));
        }
        Ok(request)
    }
}

/// Build a JSON-RPC error object.
pub fn rpc_error(code: i64, message: impl Into<String>) -> Value {
    json!({ "code": code, "message": message.into() })
}

pub fn success(id: &Value, result: Value) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "result": result,
    })
}

pub fn failure(id: &Value, error: Value) -> Value {
    json!({
        "jsonrpc": JSONRPC_VERSION,
        "id": id,
        "error": error,
    })
}

/// Response for bytes that are not JSON at all.
pub fn parse_error(err: &serde_json::Error) -> Value {
    failure(
        &Value::Null,
        rpc_error(PARSE_ERROR, format!("Parse error: {}", err)),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_request() {
        let req = JsonRpcRequest::parse(json!({
            "jsonrpc": "2.0",
            "id": 7,
            "method": "tools/list",
        }))
        .unwrap();
        assert_eq!(req.id, Some(json!(7)));
        assert_eq!(req.method, "tools/list");
        assert_eq!(req.params, Value::Null);
        assert!(!req.is_notification());
    }

    #[test]
    fn test_parse_notification() {
        let req = JsonRpcRequest::parse(json!({
            "jsonrpc": "2.0",
            "method": "notifications/initialized",
        }))
        .unwrap();
        assert!(req.is_notification());
    }

    #[test]
    fn test_parse_null_id_is_request() {
        let req = JsonRpcRequest::parse(json!({
            "jsonrpc": "2.0",
            "id": null,
            "method": "ping",
        }))
        .unwrap();
        assert_eq!(req.id, Some(Value::Null));
        assert!(!req.is_notification());
    }

    #[test]
    fn test_parse_missing_method() {
        let err = JsonRpcRequest::parse(json!({"jsonrpc": "2.0", "id": "a"})).unwrap_err();
        assert_eq!(err["id"], "a");
        assert_eq!(err["error"]["code"], INVALID_REQUEST);
    }

    #[test]
    fn test_parse_wrong_version() {
        let err = JsonRpcRequest::parse(json!({"jsonrpc": "1.0", "id": 1, "method": "ping"}))
            .unwrap_err();
        assert_eq!(err["error"]["code"], INVALID_REQUEST);
    }

    #[test]
    fn test_parse_non_object() {
        let err = JsonRpcRequest::parse(json!([1, 2])).unwrap_err();
        assert_eq!(err["id"], Value::Null);
        assert_eq!(err["error"]["code"], INVALID_REQUEST);
    }

    #[test]
    fn test_parse_error_shape() {
        let bad = serde_json::from_str::<Value>("{oops").unwrap_err();
        let resp = parse_error(&bad);
        assert_eq!(resp["jsonrpc"], "2.0");
        assert_eq!(resp["error"]["code"], PARSE_ERROR);
    }
}
