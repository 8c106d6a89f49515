//! Expense tracker MCP server - main entry point.
//!
//! Opens the SQLite store, registers the expense tools, and serves MCP over
//! HTTP (`POST /mcp`) or stdio.

use clap::{Parser, ValueEnum};
use expense_tracker::mcp::stdio;
use expense_tracker::{CategoryResource, Config, ExpenseStore, HttpServer, McpHandler};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Transport {
    Http,
    Stdio,
}

#[derive(Debug, Parser)]
#[command(name = "expense-tracker", version, about = "Track, list, and summarize expenses stored in SQLite.")]
struct Cli {
    /// Transport to serve MCP on.
    #[arg(long, value_enum, default_value_t = Transport::Http)]
    transport: Transport,

    /// JSON config file. Flags and environment variables override it.
    #[arg(long, env = "EXPENSE_TRACKER_CONFIG")]
    config: Option<PathBuf>,

    /// HTTP bind address.
    #[arg(long, env = "EXPENSE_TRACKER_LISTEN")]
    listen: Option<String>,

    /// SQLite database file.
    #[arg(long, env = "EXPENSE_TRACKER_DB")]
    db: Option<PathBuf>,

    /// Category list side file.
    #[arg(long, env = "EXPENSE_TRACKER_CATEGORIES")]
    categories: Option<PathBuf>,
}

impl Cli {
    fn into_config(self) -> expense_tracker::Result<(Transport, Config)> {
        let mut config = match &self.config {
            Some(path) => Config::from_file(path)?,
            None => Config::default(),
        };
        if let Some(listen) = self.listen {
            config.server.listen_addr = listen;
        }
        if let Some(db) = self.db {
            config.storage.db_path = db;
        }
        if let Some(categories) = self.categories {
            config.storage.categories_path = categories;
        }
        Ok((self.transport, config))
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let (transport, config) = Cli::parse().into_config()?;

    expense_tracker::observability::init_tracing(&config.observability);

    let store = Arc::new(ExpenseStore::open(&config.storage.db_path)?);
    let categories = CategoryResource::new(config.storage.categories_path.clone());
    let handler = McpHandler::with_expense_tools(store, categories)?;

    tracing::info!("Expense tracker MCP server starting");
    tracing::info!("  tools: {}", handler.registry().names().join(", "));
    tracing::info!("  categories: {}", config.storage.categories_path.display());

    match transport {
        Transport::Http => {
            let addr: SocketAddr = config.server.listen_addr.parse()?;
            let server = HttpServer::new(handler, addr);
            let cancel = server.cancellation_token();
            tokio::spawn(async move {
                if tokio::signal::ctrl_c().await.is_ok() {
                    cancel.cancel();
                }
            });
            server.serve().await?;
        }
        Transport::Stdio => stdio::serve_stdio(handler).await?,
    }

    Ok(())
}
