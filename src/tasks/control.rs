use std::future::Future;

/// Forcible termination of a supervised process
///
/// Implemented by [`ProcessHandle`](crate::tasks::tokio::supervisor::ProcessHandle);
/// the coordinator only depends on this seam so it can be driven without a
/// real process.
pub trait ProcessControl {
    /// Kills the process.
    ///
    /// Idempotent: killing a process that already exited, or killing twice,
    /// does nothing and surfaces no error.
    fn kill(&mut self) -> impl Future<Output = ()> + Send;

    /// Process id, if the process is still known to be alive.
    fn process_id(&self) -> Option<u32>;
}
