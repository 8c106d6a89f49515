//! # Expense Tracker - MCP server over SQLite
//!
//! Exposes three tools and one resource to MCP clients:
//! - `add_expense`: record a dated expense
//! - `list_expenses`: list expenses in an inclusive date range, insertion order
//! - `summarize`: per-category totals in a date range
//! - `expense://categories`: advisory category list (JSON)
//!
//! ## Architecture
//!
//! ```text
//!   HTTP / stdio  →  McpHandler  →  ToolRegistry::invoke  →  ExpenseStore  →  SQLite
//!                         └──────→  CategoryResource::read  →  categories.json
//! ```

// Enforce strict safety at compile time
#![deny(unsafe_code)]
#![cfg_attr(not(test), deny(clippy::unwrap_used, clippy::expect_used))]
#![warn(missing_debug_implementations)]
#![warn(rust_2018_idioms)]

pub mod mcp;
pub mod resources;
pub mod store;
pub mod tools;
pub mod types;

// Internal utilities
pub mod observability;

pub use mcp::{HttpServer, McpHandler};
pub use resources::CategoryResource;
pub use store::ExpenseStore;
pub use tools::ToolRegistry;
pub use types::{Config, Error, Result};
