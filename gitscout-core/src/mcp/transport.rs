//! MCP stdio transport layer
//!
//! MCP uses newline-delimited JSON. stdout carries only protocol messages;
//! diagnostics belong on stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};

use crate::mcp::protocol::{error_codes, JsonRpcRequest, JsonRpcResponse};
use crate::mcp::server::McpServer;
use crate::{Error, Result};

/// Read one line from the stream. `Ok(None)` means EOF.
pub async fn read_line<R: AsyncBufRead + Unpin>(reader: &mut R) -> Result<Option<String>> {
    let mut line = String::new();
    let bytes_read = reader
        .read_line(&mut line)
        .await
        .map_err(|e| Error::Protocol(format!("Failed to read MCP message: {e}")))?;

    if bytes_read == 0 {
        return Ok(None);
    }

    Ok(Some(line))
}

/// Write a JSON-RPC response followed by a newline and flush.
pub async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &JsonRpcResponse,
) -> Result<()> {
    let mut data = serde_json::to_vec(response)
        .map_err(|e| Error::Protocol(format!("Failed to serialize MCP response: {e}")))?;
    data.push(b'\n');

    writer
        .write_all(&data)
        .await
        .map_err(|e| Error::Protocol(format!("Failed to write MCP response: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| Error::Protocol(format!("Failed to flush MCP response: {e}")))?;

    Ok(())
}

/// Serve requests until EOF.
///
/// Lines that are not valid JSON-RPC are answered with a PARSE_ERROR
/// response and the loop keeps going; only stream-level failures terminate
/// the server.
pub async fn serve<R, W>(server: &McpServer, mut reader: R, mut writer: W) -> Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    while let Some(line) = read_line(&mut reader).await? {
        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let request: JsonRpcRequest = match serde_json::from_str(trimmed) {
            Ok(req) => req,
            Err(e) => {
                let response = JsonRpcResponse::error(
                    None,
                    error_codes::PARSE_ERROR,
                    format!("Invalid JSON-RPC request: {e}"),
                );
                write_response(&mut writer, &response).await?;
                continue;
            }
        };

        if let Some(response) = server.handle_request(request).await {
            write_response(&mut writer, &response).await?;
        }
    }

    tracing::debug!("stdin closed, shutting down");
    Ok(())
}
