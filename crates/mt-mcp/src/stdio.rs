//! STDIO transport for the MCP server
//!
//! Reads JSON-RPC requests from stdin line-by-line, dispatches them, and
//! writes responses back to stdout. Logs go to stderr only; all stdout
//! output is JSON-RPC.

use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::{debug, error, trace, warn};

use mt_types::AppResult;

use crate::protocol::{JsonRpcError, JsonRpcRequest, JsonRpcResponse};
use crate::server::McpServer;

/// Serves one [`McpServer`] over stdin/stdout
pub struct StdioServer {
    server: Arc<McpServer>,
    stdin: BufReader<tokio::io::Stdin>,
    stdout: tokio::io::Stdout,
}

impl StdioServer {
    pub fn new(server: Arc<McpServer>) -> Self {
        Self {
            server,
            stdin: BufReader::new(tokio::io::stdin()),
            stdout: tokio::io::stdout(),
        }
    }

    /// Run the serving loop until EOF on stdin
    pub async fn run(mut self) -> AppResult<()> {
        debug!("STDIO server started, reading from stdin...");

        let mut line = String::new();

        loop {
            line.clear();

            match self.stdin.read_line(&mut line).await {
                Ok(0) => {
                    debug!("EOF reached on stdin, exiting");
                    break;
                }
                Ok(n) => {
                    trace!("Read {} bytes from stdin", n);

                    let trimmed = line.trim();
                    if trimmed.is_empty() {
                        continue;
                    }

                    match serde_json::from_str::<JsonRpcRequest>(trimmed) {
                        Ok(request) => {
                            debug!("Received request: method={}", request.method);

                            if let Some(response) = self.server.dispatch(request).await {
                                self.write_response(&response).await?;
                            }
                        }
                        Err(e) => {
                            warn!("Failed to parse JSON-RPC request: {}", e);
                            let response = JsonRpcResponse::error(
                                serde_json::Value::Null,
                                JsonRpcError::parse_error(format!("Parse error: {}", e)),
                            );
                            self.write_response(&response).await?;
                        }
                    }
                }
                Err(e) => {
                    error!("Failed to read from stdin: {}", e);
                    return Err(e.into());
                }
            }
        }

        Ok(())
    }

    async fn write_response(&mut self, response: &JsonRpcResponse) -> AppResult<()> {
        let json = serde_json::to_string(response)?;
        self.stdout.write_all(json.as_bytes()).await?;
        self.stdout.write_all(b"\n").await?;
        self.stdout.flush().await?;
        trace!("Response written to stdout");
        Ok(())
    }
}
