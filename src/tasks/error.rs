use thiserror::Error;

/// Errors surfaced by a capture run.
///
/// Only a launch failure or a rejected configuration ends a run with an
/// error. Stream exhaustion and deadline expiry are reported through
/// [`CaptureOutcome`](crate::tasks::event::CaptureOutcome) instead.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TaskError {
    /// The external process could not be started
    #[error("Failed to launch process: {0}")]
    Launch(String),

    #[error("IO error: {0}")]
    IO(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}
