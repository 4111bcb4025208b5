//! Byte-based line reading for subprocess output.
//!
//! R can print text in the session's native encoding, which is not always
//! UTF-8. `BufReader::lines()` stops at the first invalid byte, so lines are
//! read as bytes and decoded lossily.

use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncRead, BufReader};
use tracing::debug;

/// Read one line, without its line terminator.
///
/// Returns `Ok(None)` at end of stream.
pub async fn read_line_lossy<R>(reader: &mut R) -> std::io::Result<Option<String>>
where
    R: AsyncBufRead + Unpin,
{
    let mut buf: Vec<u8> = Vec::with_capacity(256);
    if reader.read_until(b'\n', &mut buf).await? == 0 {
        return Ok(None);
    }

    if buf.last() == Some(&b'\n') {
        buf.pop();
        if buf.last() == Some(&b'\r') {
            buf.pop();
        }
    }
    Ok(Some(String::from_utf8_lossy(&buf).into_owned()))
}

/// Forward every line of `stream` to `tracing` at debug level until EOF.
pub fn spawn_stream_logger(
    stream: impl AsyncRead + Unpin + Send + 'static,
    source: &'static str,
) -> tokio::task::JoinHandle<()> {
    tokio::spawn(async move {
        let mut reader = BufReader::new(stream);
        loop {
            match read_line_lossy(&mut reader).await {
                Ok(Some(line)) => debug!(source, "{line}"),
                Ok(None) => break,
                Err(e) => {
                    debug!(source, error = %e, "Stream reader exiting due to read error");
                    break;
                }
            }
        }
        debug!(source, "Stream reader task exiting");
    })
}
