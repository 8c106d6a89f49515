//! Application error types.
//!
//! All errors use `thiserror` for automatic Error trait derivation. Each variant
//! carries a stable `kind()` code so callers can tell a malformed call apart
//! from a failing backend.

use serde_json::{json, Value};
use thiserror::Error;

/// Application result type.
pub type Result<T> = std::result::Result<T, Error>;

/// JSON-RPC: invalid method parameters.
pub const RPC_INVALID_PARAMS: i64 = -32602;
/// JSON-RPC: internal error.
pub const RPC_INTERNAL_ERROR: i64 = -32603;

/// Main error enum for the expense tracker.
#[derive(Error, Debug)]
pub enum Error {
    /// No tool is registered under this name.
    #[error("unknown operation: {0}")]
    UnknownOperation(String),

    /// A required argument was absent and the parameter has no default.
    #[error("missing required parameter '{param}' for {tool}")]
    MissingParameter { tool: String, param: String },

    /// An argument could not be coerced to its declared type.
    #[error("parameter '{param}': expected {expected}, {message}")]
    TypeMismatch {
        param: String,
        expected: String,
        message: String,
    },

    /// SQLite read/write failure.
    #[error("storage error: {0}")]
    Storage(#[from] rusqlite::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Validation errors (bad registration, malformed request params).
    #[error("validation error: {0}")]
    Validation(String),

    /// Serialization/deserialization errors.
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// I/O errors.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// Internal errors.
    #[error("internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Stable snake_case code for this error.
    pub fn kind(&self) -> &'static str {
        match self {
            Error::UnknownOperation(_) => "unknown_operation",
            Error::MissingParameter { .. } => "missing_parameter",
            Error::TypeMismatch { .. } => "type_mismatch",
            Error::Storage(_) => "storage_error",
            Error::NotFound(_) => "not_found",
            Error::Validation(_) => "validation",
            Error::Serialization(_) => "serialization",
            Error::Io(_) => "io",
            Error::Internal(_) => "internal",
        }
    }

    /// True when the caller sent a bad request, false when the backend failed.
    pub fn is_call_shape(&self) -> bool {
        matches!(
            self,
            Error::UnknownOperation(_)
                | Error::MissingParameter { .. }
                | Error::TypeMismatch { .. }
                | Error::NotFound(_)
                | Error::Validation(_)
        )
    }

    /// Convert to a JSON-RPC error object.
    pub fn to_rpc_error(&self) -> Value {
        let code = if self.is_call_shape() {
            RPC_INVALID_PARAMS
        } else {
            RPC_INTERNAL_ERROR
        };
        json!({
            "code": code,
            "message": self.to_string(),
            "data": { "kind": self.kind() },
        })
    }
}

// Convenience constructors
impl Error {
    pub fn unknown_operation(name: impl Into<String>) -> Self {
        Self::UnknownOperation(name.into())
    }

    pub fn missing_parameter(tool: impl Into<String>, param: impl Into<String>) -> Self {
        Self::MissingParameter {
            tool: tool.into(),
            param: param.into(),
        }
    }

    pub fn type_mismatch(
        param: impl Into<String>,
        expected: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self::TypeMismatch {
            param: param.into(),
            expected: expected.into(),
            message: message.into(),
        }
    }

    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        Self::Internal(msg.into())
    }
}
