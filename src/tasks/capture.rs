use crate::tasks::{config::CaptureMarkers, state::CaptureState};

/// Marker driven state machine accumulating the task region
///
/// `TaskCapture` is fed task-channel lines one at a time and knows nothing
/// about processes or channels, so the same line sequence always yields the
/// same transitions and the same buffer.
///
/// Capture is inclusive at both ends: the line carrying the start marker is
/// the first line buffered and the line carrying the end marker is the last.
/// A single line carrying both markers opens and closes the region at once.
///
/// # Examples
///
/// ```rust
/// use tcrm_capture::tasks::{capture::TaskCapture, config::CaptureMarkers, state::CaptureState};
///
/// let mut capture = TaskCapture::new(CaptureMarkers::default());
/// capture.feed("noise before the task");
/// capture.feed("START OF TASK [debug]");
/// capture.feed("ok: [localhost]");
/// let state = capture.feed("END OF TASK [debug]");
///
/// assert_eq!(state, CaptureState::Completed);
/// assert_eq!(
///     capture.text(),
///     "START OF TASK [debug]\nok: [localhost]\nEND OF TASK [debug]\n"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct TaskCapture {
    markers: CaptureMarkers,
    state: CaptureState,
    buffer: Vec<String>,
}

impl TaskCapture {
    pub fn new(markers: CaptureMarkers) -> Self {
        Self {
            markers,
            state: CaptureState::NotStarted,
            buffer: Vec::new(),
        }
    }

    pub fn state(&self) -> CaptureState {
        self.state
    }

    /// Lines captured so far, in arrival order.
    pub fn lines(&self) -> &[String] {
        &self.buffer
    }

    /// Feeds one task-channel line and returns the state after it.
    ///
    /// Lines fed after completion are ignored; the buffer is frozen.
    pub fn feed(&mut self, line: &str) -> CaptureState {
        if self.state == CaptureState::NotStarted {
            if !self.markers.is_start(line) {
                return self.state;
            }
            self.start();
        }
        if self.state == CaptureState::Capturing {
            self.buffer.push(line.to_string());
            if self.markers.is_end(line) {
                self.complete();
            }
        }
        self.state
    }

    fn start(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!("Task start marker observed, capturing");
        self.state = CaptureState::Capturing;
    }

    fn complete(&mut self) {
        #[cfg(feature = "tracing")]
        tracing::debug!(lines = self.buffer.len(), "Task end marker observed, capture completed");
        self.state = CaptureState::Completed;
    }

    /// Captured lines joined as text, each line terminated by `\n`.
    pub fn text(&self) -> String {
        let len = self.buffer.iter().map(|l| l.len() + 1).sum();
        let mut text = String::with_capacity(len);
        for line in &self.buffer {
            text.push_str(line);
            text.push('\n');
        }
        text
    }
}
