//! Stdin/stdout JSON bridge for the host command channel.
//!
//! Reads newline-delimited JSON `CommandEnvelope` messages, dispatches them
//! through the [`HostRouter`], and writes one `ResponseEnvelope` per command
//! as newline-delimited JSON.
//!
//! Stdout is exclusively reserved for the JSON protocol; all diagnostic
//! output (tracing, logs) must be routed to stderr.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt, BufReader, BufWriter};

use crate::error::{AppError, Result};
use crate::host::contract::{CommandEnvelope, CommandName, ResponseEnvelope};
use crate::host::router::{HostRouter, TimelineService};

/// Request id used for responses to lines that could not be parsed.
pub const PARSE_ERROR_REQUEST_ID: &str = "parse-error";

/// Run the bridge over the process's stdin/stdout until stdin closes or a
/// `host.stop` command is received.
pub async fn run_stdio_bridge<T: TimelineService>(router: HostRouter<T>) -> Result<()> {
    let reader = BufReader::new(tokio::io::stdin());
    let writer = BufWriter::new(tokio::io::stdout());
    run_bridge(&router, reader, writer).await
}

/// Run the bridge over arbitrary async streams.
///
/// Commands are handled one at a time in arrival order. A malformed line
/// produces an error response and the loop continues.
pub async fn run_bridge<T, R, W>(router: &HostRouter<T>, mut reader: R, mut writer: W) -> Result<()>
where
    T: TimelineService,
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut buf: Vec<u8> = Vec::new();

    loop {
        buf.clear();
        let bytes_read = reader
            .read_until(b'\n', &mut buf)
            .await
            .map_err(|e| AppError::Channel(format!("failed to read from stdin: {e}")))?;

        // EOF
        if bytes_read == 0 {
            tracing::info!("stdin closed (EOF); shutting down stdio bridge");
            break;
        }

        let line = match std::str::from_utf8(&buf) {
            Ok(line) => line,
            Err(e) => {
                tracing::warn!(error = %e, "command line is not valid UTF-8");
                let response = ResponseEnvelope::error(
                    PARSE_ERROR_REQUEST_ID,
                    format!("command line is not valid UTF-8: {e}"),
                );
                write_response(&mut writer, &response).await?;
                continue;
            }
        };

        let trimmed = line.trim();
        if trimmed.is_empty() {
            continue;
        }

        let envelope: CommandEnvelope = match serde_json::from_str(trimmed) {
            Ok(env) => env,
            Err(e) => {
                tracing::warn!(error = %e, "failed to parse command envelope from stdin");
                let response = ResponseEnvelope::error(
                    PARSE_ERROR_REQUEST_ID,
                    format!("failed to parse command envelope: {e}"),
                );
                write_response(&mut writer, &response).await?;
                continue;
            }
        };

        tracing::debug!(command = %envelope.command, request_id = %envelope.request_id, "host command received");
        let response = router.dispatch(&envelope).await;
        write_response(&mut writer, &response).await?;

        if envelope.command == CommandName::HostStop && response.ok {
            tracing::info!("host.stop received; shutting down stdio bridge");
            break;
        }
    }

    Ok(())
}

async fn write_response<W: AsyncWrite + Unpin>(
    writer: &mut W,
    response: &ResponseEnvelope,
) -> Result<()> {
    let json = serde_json::to_string(response)
        .map_err(|e| AppError::Channel(format!("failed to serialize response envelope: {e}")))?;
    write_line(writer, &json).await
}

/// Write a single JSON line and flush.
async fn write_line<W: AsyncWrite + Unpin>(writer: &mut W, json: &str) -> Result<()> {
    writer
        .write_all(json.as_bytes())
        .await
        .map_err(|e| AppError::Channel(format!("failed to write to stdout: {e}")))?;
    writer
        .write_all(b"\n")
        .await
        .map_err(|e| AppError::Channel(format!("failed to write newline to stdout: {e}")))?;
    writer
        .flush()
        .await
        .map_err(|e| AppError::Channel(format!("failed to flush stdout: {e}")))?;
    Ok(())
}
