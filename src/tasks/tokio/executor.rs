use tokio::sync::mpsc;

use crate::tasks::{
    config::CaptureConfig,
    control::ProcessControl,
    error::TaskError,
    event::{CaptureReport, LineEvent},
    parser::{ParsedRecord, parse_captured},
    tokio::{
        coordinate::Coordinator, deadline::DeadlineController, multiplexer::StreamMultiplexer,
        supervisor::ProcessSupervisor,
    },
};

/// Runs one supervised capture end to end
///
/// `CaptureExecutor` launches the external task, starts the deadline at the
/// same moment, fans both output streams into the coordinator, and returns
/// the captured task region once the run ends.
///
/// Only deadline expiry kills the supervised process. A run that completes
/// returns as soon as the end marker is seen and leaves the process to
/// finish on its own; its remaining output is drained and discarded.
///
/// # Examples
///
/// ## Capture and parse
/// ```rust,no_run
/// use tcrm_capture::tasks::{config::CaptureConfig, tokio::executor::CaptureExecutor};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let executor = CaptureExecutor::new(CaptureConfig::for_script("scripts/cleanup.rb"));
///     let (report, record) = executor.run_and_parse().await?;
///
///     println!("{:?}: {}", report.outcome, record.status);
///     Ok(())
/// }
/// ```
///
/// ## Watching both channels
/// ```rust,no_run
/// use tcrm_capture::tasks::{config::CaptureConfig, event::LineEvent, tokio::executor::CaptureExecutor};
/// use tokio::sync::mpsc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     #[cfg(unix)]
///     let config = CaptureConfig::new("sh").args([
///         "-c",
///         "echo progress; echo 'START OF TASK [debug]' >&2; echo 'END OF TASK [debug]' >&2",
///     ]);
///     #[cfg(windows)]
///     let config = CaptureConfig::new("cmd").args(["/C", "echo START OF TASK [debug] 1>&2"]);
///
///     let (tx, mut rx) = mpsc::channel::<LineEvent>(100);
///     let watcher = tokio::spawn(async move {
///         while let Some(line) = rx.recv().await {
///             println!("{:?}: {}", line.source, line.text);
///         }
///     });
///
///     let report = CaptureExecutor::new(config).with_observer(tx).run().await?;
///     watcher.await?;
///     println!("{}", report.captured);
///     Ok(())
/// }
/// ```
#[derive(Debug)]
pub struct CaptureExecutor {
    config: CaptureConfig,
    observer: Option<mpsc::Sender<LineEvent>>,
}

impl CaptureExecutor {
    pub fn new(config: CaptureConfig) -> Self {
        Self {
            config,
            observer: None,
        }
    }

    /// Forwards every line read from either channel to `observer`.
    ///
    /// The sender is dropped when the run ends, closing the channel.
    pub fn with_observer(mut self, observer: mpsc::Sender<LineEvent>) -> Self {
        self.observer = Some(observer);
        self
    }

    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Runs the task and returns the capture report.
    ///
    /// A run ending by exhaustion or by the deadline still returns `Ok`;
    /// check [`CaptureReport::outcome`].
    ///
    /// # Errors
    ///
    /// * [`TaskError::InvalidConfiguration`] if the configuration is invalid
    /// * [`TaskError::Launch`] if the process cannot be started
    /// * [`TaskError::IO`] if the output streams cannot be taken
    pub async fn run(self) -> Result<CaptureReport, TaskError> {
        self.validate_config()?;

        let mut handle = ProcessSupervisor::start(&self.config)?;
        let deadline = DeadlineController::from_millis(self.config.timeout_ms);

        let (stdout, stderr) = match handle.take_output_streams() {
            Ok(streams) => streams,
            Err(e) => {
                handle.kill().await;
                return Err(e);
            }
        };
        let multiplexer =
            StreamMultiplexer::spawn(stdout, stderr, self.config.channel_capacity);

        let mut coordinator = Coordinator::new(
            self.config.markers.clone(),
            multiplexer,
            deadline,
            &mut handle,
        );
        if let Some(observer) = self.observer {
            coordinator = coordinator.observer(observer);
        }

        Ok(coordinator.run().await)
    }

    /// Runs the task and parses the captured text.
    ///
    /// The record is parsed for degraded runs too, from whatever was captured.
    ///
    /// # Errors
    ///
    /// Same as [`CaptureExecutor::run`].
    pub async fn run_and_parse(self) -> Result<(CaptureReport, ParsedRecord), TaskError> {
        let report = self.run().await?;
        let record = parse_captured(&report.captured);
        Ok((report, record))
    }

    fn validate_config(&self) -> Result<(), TaskError> {
        self.config.validate().inspect_err(|_e| {
            #[cfg(feature = "tracing")]
            tracing::error!(error = %_e, "Invalid capture configuration");
        })
    }
}
