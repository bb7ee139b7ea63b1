//! Line-delimited JSON transport over stdin/stdout.
//!
//! One complete JSON object per `\n`-terminated line, per the MCP
//! stdio transport convention. Generic over reader/writer so tests can
//! drive the transport from in-memory buffers.

use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing::trace;

use crate::error::TransportError;

/// Reads JSON-RPC messages from the input stream, writes responses to
/// the output stream.
pub struct StdioTransport<R, W> {
    reader: BufReader<R>,
    writer: W,
}

impl<R, W> StdioTransport<R, W>
where
    R: tokio::io::AsyncRead + Unpin,
    W: tokio::io::AsyncWrite + Unpin,
{
    /// Creates a new transport over the given reader and writer.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader: BufReader::new(reader),
            writer,
        }
    }

    /// Reads the next line, trimmed of surrounding whitespace.
    ///
    /// Returns `None` on EOF. Blank input lines come back as empty
    /// strings so the caller can skip them.
    pub async fn read_line(&mut self) -> Result<Option<String>, TransportError> {
        let mut line = String::new();
        let bytes_read = self
            .reader
            .read_line(&mut line)
            .await
            .map_err(|e| TransportError::Read(e.to_string()))?;

        if bytes_read == 0 {
            return Ok(None);
        }

        let trimmed = line.trim();
        trace!(len = trimmed.len(), "read message");
        Ok(Some(trimmed.to_string()))
    }

    /// Writes one response line, newline-terminated and flushed.
    pub async fn write_line(&mut self, message: &str) -> Result<(), TransportError> {
        trace!(len = message.len(), "writing message");

        let mut framed = String::with_capacity(message.len() + 1);
        framed.push_str(message);
        framed.push('\n');

        self.writer
            .write_all(framed.as_bytes())
            .await
            .map_err(|e| TransportError::Write(e.to_string()))?;
        self.writer
            .flush()
            .await
            .map_err(|e| TransportError::Write(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    #[tokio::test]
    async fn read_single_line() {
        let input = b"{\"jsonrpc\":\"2.0\"}\n";
        let mut transport = StdioTransport::new(Cursor::new(input.to_vec()), Vec::new());

        let line = transport.read_line().await.expect("read");
        assert_eq!(line, Some("{\"jsonrpc\":\"2.0\"}".to_string()));
    }

    #[tokio::test]
    async fn read_eof_returns_none() {
        let mut transport = StdioTransport::new(Cursor::new(Vec::<u8>::new()), Vec::new());
        assert_eq!(transport.read_line().await.expect("read"), None);
    }

    #[tokio::test]
    async fn blank_line_comes_back_empty() {
        let mut transport = StdioTransport::new(Cursor::new(b"   \n".to_vec()), Vec::new());
        assert_eq!(transport.read_line().await.expect("read"), Some(String::new()));
    }

    #[tokio::test]
    async fn write_appends_newline_and_flushes() {
        let mut transport = StdioTransport::new(Cursor::new(Vec::<u8>::new()), Vec::new());
        transport.write_line("{\"ok\":true}").await.expect("write");

        let output = String::from_utf8(transport.writer.clone()).expect("utf8");
        assert_eq!(output, "{\"ok\":true}\n");
    }

    #[tokio::test]
    async fn read_multiple_lines_in_order() {
        let input = b"one\ntwo\n";
        let mut transport = StdioTransport::new(Cursor::new(input.to_vec()), Vec::new());

        assert_eq!(transport.read_line().await.expect("r1"), Some("one".into()));
        assert_eq!(transport.read_line().await.expect("r2"), Some("two".into()));
        assert_eq!(transport.read_line().await.expect("r3"), None);
    }
}
