//! Stdio transport: newline-delimited JSON-RPC on stdin/stdout.

use tokio::io::{AsyncBufReadExt, AsyncRead, AsyncWrite, AsyncWriteExt, BufReader};

use crate::mcp::handler::McpHandler;
use crate::mcp::protocol;

/// Serve on the process's stdin/stdout until stdin closes.
pub async fn serve_stdio(handler: McpHandler) -> std::io::Result<()> {
    tracing::info!("MCP stdio transport ready");
    serve_lines(&handler, tokio::io::stdin(), tokio::io::stdout()).await
}

/// Read one message per line from `reader`, write one response per line.
pub async fn serve_lines<R, W>(handler: &McpHandler, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = match serde_json::from_str(line) {
            Ok(message) => handler.handle(message).await,
            Err(e) => {
                tracing::debug!("JSON parse error on stdin: {}", e);
                Some(protocol::parse_error(&e))
            }
        };

        if let Some(response) = response {
            let mut out = serde_json::to_vec(&response)?;
            out.push(b'\n');
            writer.write_all(&out).await?;
            writer.flush().await?;
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::CategoryResource;
    use crate::store::ExpenseStore;
    use serde_json::Value;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_serve_lines() {
        let dir = tempfile::tempdir().unwrap();
        let store = Arc::new(ExpenseStore::open_in_memory().unwrap());
        let handler =
            McpHandler::with_expense_tools(store, CategoryResource::new(dir.path().join("c.json")))
                .unwrap();

        let input = concat!(
            r#"{"jsonrpc":"2.0","id":1,"method":"initialize","params":{}}"#,
            "\n",
            r#"{"jsonrpc":"2.0","method":"notifications/initialized"}"#,
            "\n\n",
            "not json\n",
            r#"{"jsonrpc":"2.0","id":2,"method":"tools/call","params":{"name":"add_expense","arguments":{"date":"2024-01-01","amount":5,"category":"Misc"}}}"#,
            "\n",
        );
        let mut output: Vec<u8> = Vec::new();
        serve_lines(&handler, input.as_bytes(), &mut output).await.unwrap();

        let responses: Vec<Value> = String::from_utf8(output)
            .unwrap()
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(responses.len(), 3);
        assert_eq!(responses[0]["id"], 1);
        assert_eq!(responses[1]["error"]["code"], protocol::PARSE_ERROR);
        assert_eq!(responses[2]["id"], 2);
        assert_eq!(
            responses[2]["result"]["structuredContent"]["result"]["status"],
            "ok"
        );
    }
}
