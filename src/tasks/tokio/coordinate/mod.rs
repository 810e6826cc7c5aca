use tokio::sync::mpsc;

use crate::tasks::{
    capture::TaskCapture,
    config::CaptureMarkers,
    control::ProcessControl,
    event::LineEvent,
    tokio::{deadline::DeadlineController, multiplexer::StreamMultiplexer},
};

mod handler;
mod start;


/// Single consumer driving the capture from both channels and the deadline
///
/// The coordinator waits on the ordinary channel, the task channel and the
/// deadline at once, then handles exactly one event before waiting again.
/// It is the only writer of the capture state and buffer, so no locking is
/// involved. It ends on completion, on exhaustion of both channels, or on
/// the deadline, killing the process in the last case.
pub struct Coordinator<'a, P: ProcessControl> {
    pub(crate) capture: TaskCapture,
    pub(crate) multiplexer: StreamMultiplexer,
    pub(crate) deadline: DeadlineController,
    pub(crate) process: &'a mut P,
    pub(crate) observer: Option<mpsc::Sender<LineEvent>>,
    pub(crate) process_id: Option<u32>,
}

impl<'a, P: ProcessControl> Coordinator<'a, P> {
    pub fn new(
        markers: CaptureMarkers,
        multiplexer: StreamMultiplexer,
        deadline: DeadlineController,
        process: &'a mut P,
    ) -> Self {
        let process_id = process.process_id();
        Self {
            capture: TaskCapture::new(markers),
            multiplexer,
            deadline,
            process,
            observer: None,
            process_id,
        }
    }

    /// Forwards every received line, from both channels, to `observer`.
    ///
    /// Lines are offered without waiting; a full or closed observer channel
    /// drops the line rather than delaying the deadline.
    pub fn observer(mut self, observer: mpsc::Sender<LineEvent>) -> Self {
        self.observer = Some(observer);
        self
    }
}
