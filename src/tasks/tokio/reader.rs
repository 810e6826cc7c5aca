use tokio::{
    io::{AsyncBufReadExt, AsyncRead, BufReader},
    sync::mpsc,
    task::JoinHandle,
};

use crate::{helper::tracing::MaybeInstrument, tasks::config::StreamSource};

/// Spawns a line reader for one output stream.
///
/// Each newline-delimited line is sent to `tx` with the delimiter (and a
/// trailing `\r`) stripped; invalid UTF-8 is replaced rather than rejected.
/// The reader runs as its own task and ends when the stream reaches
/// end-of-input or on a read error. Dropping `tx` on exit closes the
/// channel, which is how the receiver learns the stream is exhausted.
///
/// Once the receiving side is gone the reader keeps draining the stream,
/// discarding lines, so a process still writing after the run ended does
/// not hit a broken pipe.
pub fn spawn_line_reader<R>(
    stream: R,
    source: StreamSource,
    tx: mpsc::Sender<String>,
) -> JoinHandle<()>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    tokio::spawn(read_lines(stream, source, tx).maybe_instrument("read_lines", source.as_str()))
}

async fn read_lines<R>(stream: R, _source: StreamSource, tx: mpsc::Sender<String>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(stream);
    let mut buf = Vec::new();
    let mut forwarding = true;
    loop {
        buf.clear();
        match reader.read_until(b'\n', &mut buf).await {
            Ok(0) => {
                #[cfg(feature = "tracing")]
                tracing::trace!("End of stream reached");
                break;
            }
            Ok(_) if forwarding => {
                if tx.send(decode_line(&buf)).await.is_err() {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Line receiver dropped, draining stream");
                    forwarding = false;
                }
            }
            Ok(_) => {}
            Err(_e) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(error = %_e, source = ?_source, "Error reading output stream, treating as closed");
                break;
            }
        }
    }
}

fn decode_line(raw: &[u8]) -> String {
    let line = raw.strip_suffix(b"\n").unwrap_or(raw);
    let line = line.strip_suffix(b"\r").unwrap_or(line);
    String::from_utf8_lossy(line).into_owned()
}
