use crate::tasks::{
    control::ProcessControl,
    event::{CaptureOutcome, CaptureReport},
    tokio::coordinate::Coordinator,
};

impl<P: ProcessControl> Coordinator<'_, P> {
    pub(crate) fn handle_exhausted(&self) -> CaptureOutcome {
        #[cfg(feature = "tracing")]
        tracing::warn!(
            state = ?self.capture.state(),
            captured_lines = self.capture.lines().len(),
            "Task did not complete normally, both channels closed"
        );
        CaptureOutcome::StreamExhausted
    }

    pub(crate) fn handle_result(self, outcome: CaptureOutcome) -> CaptureReport {
        let report = CaptureReport {
            outcome,
            state: self.capture.state(),
            captured: self.capture.text(),
            captured_lines: self.capture.lines().len(),
            process_id: self.process_id,
            elapsed: self.deadline.elapsed(),
        };

        #[cfg(feature = "tracing")]
        tracing::debug!(
            outcome = ?report.outcome,
            captured_lines = report.captured_lines,
            elapsed_ms = report.elapsed.as_millis() as u64,
            "Capture run finished"
        );

        report
    }
}
