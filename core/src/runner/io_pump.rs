use std::sync::Arc;

use tokio::io::{AsyncRead, AsyncReadExt};
use tokio::task::JoinHandle;

use crate::error::ViewerError;
use crate::util::RingBytes;

/// How much of parquet-tools' stderr is kept for error reports.
pub const STDERR_CAPTURE_BYTES: usize = 64 * 1024;

/// Splits a child's stdout into lines without waiting for EOF.
pub struct LineReader<R> {
    rd: R,
    label: &'static str,
    buf: Vec<u8>,
    line_buf: Vec<u8>,
    eof: bool,
}

impl<R> LineReader<R>
where
    R: AsyncRead + Unpin,
{
    pub fn new(rd: R, label: &'static str) -> Self {
        Self {
            rd,
            label,
            buf: vec![0u8; 16 * 1024],
            line_buf: Vec::with_capacity(8 * 1024),
            eof: false,
        }
    }

    /// Next line with the trailing `\n` / `\r\n` removed. Invalid UTF-8 is
    /// replaced rather than rejected.
    pub async fn next_line(&mut self) -> Result<Option<String>, ViewerError> {
        loop {
            if let Some(pos) = self.line_buf.iter().position(|&b| b == b'\n') {
                let mut one = self.line_buf.drain(..=pos).collect::<Vec<u8>>();
                trim_newline(&mut one);
                return Ok(Some(String::from_utf8_lossy(&one).into_owned()));
            }

            if self.eof {
                // EOF flush: deliver the last partial line if it doesn't end with '\n'.
                if self.line_buf.is_empty() {
                    return Ok(None);
                }
                let mut rest = std::mem::take(&mut self.line_buf);
                trim_newline(&mut rest);
                return Ok(Some(String::from_utf8_lossy(&rest).into_owned()));
            }

            let n = self
                .rd
                .read(&mut self.buf)
                .await
                .map_err(|e| ViewerError::StreamIo {
                    stream: self.label,
                    source: e,
                })?;
            if n == 0 {
                self.eof = true;
            } else {
                self.line_buf.extend_from_slice(&self.buf[..n]);
            }
        }
    }
}

/// Drain stderr into a ring so the child never stalls on a full pipe.
pub fn pump_stderr<R>(mut rd: R, ring: Arc<RingBytes>) -> JoinHandle<Result<u64, ViewerError>>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(async move {
        let mut buf = vec![0u8; 8 * 1024];
        let mut total = 0u64;
        loop {
            let n = rd.read(&mut buf).await.map_err(|e| ViewerError::StreamIo {
                stream: "stderr",
                source: e,
            })?;
            if n == 0 {
                break;
            }
            ring.push(&buf[..n]);
            total += n as u64;
        }
        Ok(total)
    })
}

/// The captured tail of a child's stderr.
pub struct StderrTail {
    ring: Arc<RingBytes>,
    task: Option<JoinHandle<Result<u64, ViewerError>>>,
}

impl StderrTail {
    pub fn spawn<R>(rd: Option<R>) -> Self
    where
        R: AsyncRead + Unpin + Send + 'static,
    {
        let ring = RingBytes::new(STDERR_CAPTURE_BYTES);
        let task = rd.map(|rd| pump_stderr(rd, ring.clone()));
        Self { ring, task }
    }

    /// Wait for the pipe to close and return what was captured, trimmed.
    pub async fn finish(mut self) -> String {
        if let Some(task) = self.task.take() {
            match task.await {
                Ok(Ok(_)) => {}
                Ok(Err(e)) => tracing::warn!(error = %e, "stderr capture failed"),
                Err(e) => tracing::warn!(error = %e, "stderr capture task panicked"),
            }
        }
        self.ring.to_string_lossy().trim().to_string()
    }
}

impl Drop for StderrTail {
    fn drop(&mut self) {
        if let Some(task) = self.task.take() {
            task.abort();
        }
    }
}

fn trim_newline(buf: &mut Vec<u8>) {
    if buf.last() == Some(&b'\n') {
        buf.pop();
    }
    if buf.last() == Some(&b'\r') {
        buf.pop();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::io::AsyncWriteExt;

    #[tokio::test]
    async fn splits_lines_and_flushes_last_line_on_eof() {
        let (mut wr, rd) = tokio::io::duplex(1024);
        let mut lines = LineReader::new(rd, "stdout");

        wr.write_all(b"{\"a\":1}\r\n{\"a\":2}\n{\"a\"").await.unwrap();
        wr.write_all(b":3}").await.unwrap();
        drop(wr);

        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("{\"a\":1}"));
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("{\"a\":2}"));
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("{\"a\":3}"));
        assert_eq!(lines.next_line().await.unwrap(), None);
        assert_eq!(lines.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn yields_a_line_before_eof() {
        let (mut wr, rd) = tokio::io::duplex(1024);
        let mut lines = LineReader::new(rd, "stdout");

        wr.write_all(b"first\n").await.unwrap();
        assert_eq!(lines.next_line().await.unwrap().as_deref(), Some("first"));
        drop(wr);
        assert_eq!(lines.next_line().await.unwrap(), None);
    }

    #[tokio::test]
    async fn stderr_tail_keeps_captured_text() {
        let (mut wr, rd) = tokio::io::duplex(1024);
        let tail = StderrTail::spawn(Some(rd));

        wr.write_all(b"Could not read footer\n").await.unwrap();
        drop(wr);

        assert_eq!(tail.finish().await, "Could not read footer");
    }

    #[tokio::test]
    async fn missing_stderr_is_empty() {
        let tail = StderrTail::spawn(None::<tokio::io::DuplexStream>);
        assert_eq!(tail.finish().await, "");
    }
}
