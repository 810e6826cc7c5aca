use std::time::Duration;

use crate::tasks::{config::StreamSource, state::CaptureState};

/// One line read from one of the two output channels
///
/// Lines of a single channel are delivered in the order they were produced.
/// No ordering holds across the two channels.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineEvent {
    /// Channel the line came from
    pub source: StreamSource,
    /// The line, without its trailing newline
    pub text: String,
}

impl LineEvent {
    pub fn new(source: StreamSource, text: impl Into<String>) -> Self {
        Self {
            source,
            text: text.into(),
        }
    }
}

/// How a capture run ended
///
/// # Examples
///
/// ```rust
/// use tcrm_capture::tasks::event::CaptureOutcome;
///
/// assert!(!CaptureOutcome::Completed.is_degraded());
/// assert!(CaptureOutcome::StreamExhausted.is_degraded());
/// assert!(CaptureOutcome::TimedOut.is_degraded());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureOutcome {
    /// An end marker was observed
    Completed,

    /// Both channels closed before an end marker was observed
    StreamExhausted,

    /// The deadline fired first, the process was killed
    TimedOut,
}

impl CaptureOutcome {
    /// Returns true when the run ended without observing an end marker.
    pub fn is_degraded(self) -> bool {
        !matches!(self, CaptureOutcome::Completed)
    }
}

/// Result of a capture run
///
/// Produced for every run that got past process launch, including degraded
/// ones. `captured` is the task region joined with `\n`, each line followed
/// by a newline.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureReport {
    pub outcome: CaptureOutcome,
    /// Capture state at the moment the run ended
    pub state: CaptureState,
    /// Captured text, empty if no start marker was seen
    pub captured: String,
    /// Number of lines in the captured region
    pub captured_lines: usize,
    /// Process id of the supervised task, if it was known
    pub process_id: Option<u32>,
    /// Time from process start to the end of the run
    pub elapsed: Duration,
}

impl CaptureReport {
    pub fn is_complete(&self) -> bool {
        self.outcome == CaptureOutcome::Completed
    }

    pub fn is_degraded(&self) -> bool {
        self.outcome.is_degraded()
    }
}
