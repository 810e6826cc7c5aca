use futures::future::pending;
use tokio::{io::AsyncRead, sync::mpsc};

use crate::tasks::{config::StreamSource, event::LineEvent, tokio::reader::spawn_line_reader};

/// Event yielded by [`StreamMultiplexer::next`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MuxEvent {
    /// A line arrived on one of the channels
    Line(LineEvent),

    /// A channel was closed by its reader; reported exactly once per channel
    Closed(StreamSource),
}

/// Fan-in of the ordinary and task line channels
///
/// Per-channel delivery order equals production order. Which channel is
/// served first when both have lines ready is unspecified. Readers are
/// detached: they outlive the multiplexer and end at end-of-stream.
#[derive(Debug)]
pub struct StreamMultiplexer {
    ordinary: Option<mpsc::Receiver<String>>,
    task: Option<mpsc::Receiver<String>>,
}

impl StreamMultiplexer {
    /// Spawns one line reader per stream and multiplexes their channels.
    pub fn spawn<O, T>(ordinary: O, task: T, capacity: usize) -> Self
    where
        O: AsyncRead + Unpin + Send + 'static,
        T: AsyncRead + Unpin + Send + 'static,
    {
        let (ordinary_tx, ordinary_rx) = mpsc::channel(capacity);
        let (task_tx, task_rx) = mpsc::channel(capacity);
        spawn_line_reader(ordinary, StreamSource::Ordinary, ordinary_tx);
        spawn_line_reader(task, StreamSource::Task, task_tx);
        Self::from_receivers(ordinary_rx, task_rx)
    }

    /// Multiplexes channels fed by some other producer.
    pub fn from_receivers(
        ordinary: mpsc::Receiver<String>,
        task: mpsc::Receiver<String>,
    ) -> Self {
        Self {
            ordinary: Some(ordinary),
            task: Some(task),
        }
    }

    /// Returns true once both channels have been reported closed.
    pub fn is_exhausted(&self) -> bool {
        self.ordinary.is_none() && self.task.is_none()
    }

    /// Returns true while the given channel has not been reported closed.
    pub fn is_open(&self, source: StreamSource) -> bool {
        match source {
            StreamSource::Ordinary => self.ordinary.is_some(),
            StreamSource::Task => self.task.is_some(),
        }
    }

    /// Waits for the next line or channel closure.
    ///
    /// Returns `None` once both channels are exhausted. Cancel safe: dropping
    /// the returned future loses no line.
    pub async fn next(&mut self) -> Option<MuxEvent> {
        if self.is_exhausted() {
            return None;
        }
        tokio::select! {
            line = Self::recv_from(&mut self.ordinary) => Some(self.on_receive(StreamSource::Ordinary, line)),
            line = Self::recv_from(&mut self.task) => Some(self.on_receive(StreamSource::Task, line)),
        }
    }

    async fn recv_from(rx: &mut Option<mpsc::Receiver<String>>) -> Option<String> {
        match rx {
            Some(rx) => rx.recv().await,
            None => pending().await,
        }
    }

    fn on_receive(&mut self, source: StreamSource, line: Option<String>) -> MuxEvent {
        match line {
            Some(text) => MuxEvent::Line(LineEvent { source, text }),
            None => {
                #[cfg(feature = "tracing")]
                tracing::debug!(channel = source.as_str(), "Channel closed");
                match source {
                    StreamSource::Ordinary => self.ordinary = None,
                    StreamSource::Task => self.task = None,
                }
                MuxEvent::Closed(source)
            }
        }
    }
}
