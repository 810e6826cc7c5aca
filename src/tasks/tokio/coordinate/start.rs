use crate::tasks::{
    control::ProcessControl,
    event::{CaptureOutcome, CaptureReport},
    tokio::{coordinate::Coordinator, multiplexer::MuxEvent},
};

impl<P: ProcessControl> Coordinator<'_, P> {
    /// Runs the control loop until the capture completes, both channels
    /// close, or the deadline fires.
    pub async fn run(mut self) -> CaptureReport {
        let outcome = loop {
            tokio::select! {
                event = self.multiplexer.next() => match event {
                    Some(MuxEvent::Line(line)) => {
                        if self.handle_line(line) {
                            break CaptureOutcome::Completed;
                        }
                    }
                    Some(MuxEvent::Closed(_source)) => {
                        #[cfg(feature = "tracing")]
                        tracing::trace!(channel = _source.as_str(), "Waiting on remaining channel");
                    }
                    None => break self.handle_exhausted(),
                },
                () = self.deadline.expired() => break self.handle_timeout().await,
            }
        };
        self.handle_result(outcome)
    }
}
