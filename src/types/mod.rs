//! Core types for the expense tracker.
//!
//! - **Errors**: Application error types with thiserror derives
//! - **Config**: Configuration structures for server, storage, and logging

mod config;
mod errors;

pub use config::{Config, ObservabilityConfig, ServerConfig, StorageConfig};
pub use errors::{Error, Result, RPC_INTERNAL_ERROR, RPC_INVALID_PARAMS};
