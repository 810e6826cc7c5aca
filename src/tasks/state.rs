/// Progress of the task region capture.
///
/// Transitions only move forward: `NotStarted -> Capturing -> Completed`.
/// A deadline or stream exhaustion can end a run in any state, but never
/// moves the state itself.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CaptureState {
    /// No start marker has been observed yet
    #[default]
    NotStarted,

    /// A start marker was observed, lines are being accumulated
    Capturing,

    /// An end marker was observed, the buffer is frozen
    Completed,
}

impl CaptureState {
    pub fn is_completed(self) -> bool {
        matches!(self, CaptureState::Completed)
    }
}
