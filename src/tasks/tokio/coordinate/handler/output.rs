use tokio::sync::mpsc::error::TrySendError;

use crate::tasks::{
    config::StreamSource,
    control::ProcessControl,
    event::LineEvent,
    tokio::coordinate::Coordinator,
};

impl<P: ProcessControl> Coordinator<'_, P> {
    /// Handles one received line. Returns true once the capture completed.
    pub(crate) fn handle_line(&mut self, line: LineEvent) -> bool {
        let completed = match line.source {
            StreamSource::Ordinary => {
                #[cfg(feature = "tracing")]
                tracing::info!(target: "ordinary", "{}", line.text);
                false
            }
            StreamSource::Task => self.capture.feed(&line.text).is_completed(),
        };
        self.notify_observer(line);
        completed
    }

    fn notify_observer(&mut self, line: LineEvent) {
        let Some(observer) = &self.observer else {
            return;
        };
        match observer.try_send(line) {
            Ok(()) => {}
            Err(TrySendError::Full(_line)) => {
                #[cfg(feature = "tracing")]
                tracing::warn!(line = ?_line, "Observer channel full, line dropped");
            }
            Err(TrySendError::Closed(_)) => {
                #[cfg(feature = "tracing")]
                tracing::warn!("Observer channel closed, no longer forwarding lines");
                self.observer = None;
            }
        }
    }
}
