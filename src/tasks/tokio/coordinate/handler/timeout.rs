use crate::tasks::{
    control::ProcessControl, event::CaptureOutcome, tokio::coordinate::Coordinator,
};

impl<P: ProcessControl> Coordinator<'_, P> {
    /// Kills the process once the deadline fired before completion.
    pub(crate) async fn handle_timeout(&mut self) -> CaptureOutcome {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            elapsed_ms = self.deadline.elapsed().as_millis() as u64,
            state = ?self.capture.state(),
            captured_lines = self.capture.lines().len(),
            "Deadline reached before the task completed, killing process"
        );

        self.process.kill().await;
        CaptureOutcome::TimedOut
    }
}
