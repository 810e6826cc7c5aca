use std::collections::HashMap;

use crate::tasks::error::TaskError;

/// Default execution deadline, 10 minutes
pub const DEFAULT_TIMEOUT_MS: u64 = 10 * 60 * 1000;

/// Default capacity of each line channel
pub const DEFAULT_CHANNEL_CAPACITY: usize = 100;

/// Interpreter of the fixed external invocation
pub const DEFAULT_COMMAND: &str = "python3";

/// Automation script run by the interpreter, followed by the caller's script path
pub const DEFAULT_RUNNER: &str = "main.py";

/// Configuration for a single capture run
///
/// The defaults reproduce the fixed external contract: `python3 main.py <script>`,
/// a 10 minute deadline and the `debug`/`failure` task markers.
///
/// # Examples
///
/// ```rust
/// use tcrm_capture::tasks::config::CaptureConfig;
///
/// let config = CaptureConfig::for_script("scripts/cleanup.rb")
///     .working_dir(".")
///     .timeout_ms(30_000);
///
/// assert_eq!(config.command, "python3");
/// assert_eq!(
///     config.args,
///     vec!["main.py".to_string(), "scripts/cleanup.rb".to_string()]
/// );
/// assert!(config.validate().is_ok());
/// ```
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
#[derive(Debug, Clone, PartialEq)]
pub struct CaptureConfig {
    /// The command or executable to run
    pub command: String,

    /// Arguments to pass to the command
    pub args: Vec<String>,

    /// Working directory for the command
    pub working_dir: Option<String>,

    /// Environment variables for the command
    pub env: Option<HashMap<String, String>>,

    /// Execution deadline in milliseconds, measured from process start
    pub timeout_ms: u64,

    /// Marker strings delimiting the task region
    pub markers: CaptureMarkers,

    /// Capacity of each line channel between a reader and the coordinator
    pub channel_capacity: usize,
}

impl Default for CaptureConfig {
    fn default() -> Self {
        CaptureConfig {
            command: DEFAULT_COMMAND.to_string(),
            args: vec![DEFAULT_RUNNER.to_string()],
            working_dir: None,
            env: None,
            timeout_ms: DEFAULT_TIMEOUT_MS,
            markers: CaptureMarkers::default(),
            channel_capacity: DEFAULT_CHANNEL_CAPACITY,
        }
    }
}

impl CaptureConfig {
    /// Creates a configuration running `command` with no arguments.
    pub fn new(command: impl Into<String>) -> Self {
        CaptureConfig {
            command: command.into(),
            args: Vec::new(),
            ..Default::default()
        }
    }

    /// Creates the fixed external invocation with `script` as its sole positional argument.
    pub fn for_script(script: impl Into<String>) -> Self {
        let mut config = CaptureConfig::default();
        config.args.push(script.into());
        config
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args = args.into_iter().map(Into::into).collect();
        self
    }

    pub fn working_dir(mut self, dir: impl Into<String>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn env<K, V, I>(mut self, env: I) -> Self
    where
        K: Into<String>,
        V: Into<String>,
        I: IntoIterator<Item = (K, V)>,
    {
        self.env = Some(env.into_iter().map(|(k, v)| (k.into(), v.into())).collect());
        self
    }

    pub fn timeout_ms(mut self, timeout: u64) -> Self {
        self.timeout_ms = timeout;
        self
    }

    pub fn markers(mut self, markers: CaptureMarkers) -> Self {
        self.markers = markers;
        self
    }

    pub fn channel_capacity(mut self, capacity: usize) -> Self {
        self.channel_capacity = capacity;
        self
    }

    /// Validates the configuration before a run.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::InvalidConfiguration`] describing the first problem found.
    pub fn validate(&self) -> Result<(), TaskError> {
        const MAX_COMMAND_LEN: usize = 4096;
        const MAX_ARG_LEN: usize = 4096;
        const MAX_ENV_KEY_LEN: usize = 1024;

        if self.command.is_empty() {
            return Err(TaskError::InvalidConfiguration(
                "Command cannot be empty".to_string(),
            ));
        }
        if self.command.trim() != self.command {
            return Err(TaskError::InvalidConfiguration(
                "Command cannot have leading or trailing whitespace".to_string(),
            ));
        }
        if self.command.len() > MAX_COMMAND_LEN {
            return Err(TaskError::InvalidConfiguration(
                "Command length exceeds maximum allowed length".to_string(),
            ));
        }

        for arg in &self.args {
            if arg.is_empty() {
                return Err(TaskError::InvalidConfiguration(
                    "Arguments cannot be empty".to_string(),
                ));
            }
            if arg.trim() != arg {
                return Err(TaskError::InvalidConfiguration(format!(
                    "Argument '{}' cannot have leading/trailing whitespace",
                    arg
                )));
            }
            if arg.len() > MAX_ARG_LEN {
                return Err(TaskError::InvalidConfiguration(format!(
                    "Argument '{}' exceeds maximum length",
                    arg
                )));
            }
        }

        if let Some(dir) = &self.working_dir {
            let path = std::path::Path::new(dir);
            if !path.exists() {
                return Err(TaskError::InvalidConfiguration(format!(
                    "Working directory '{}' does not exist",
                    dir
                )));
            }
            if !path.is_dir() {
                return Err(TaskError::InvalidConfiguration(format!(
                    "Working directory '{}' is not a directory",
                    dir
                )));
            }
        }

        if let Some(env) = &self.env {
            for k in env.keys() {
                if k.is_empty() {
                    return Err(TaskError::InvalidConfiguration(
                        "Environment variable key cannot be empty".to_string(),
                    ));
                }
                if k.contains('=') || k.contains(' ') {
                    return Err(TaskError::InvalidConfiguration(format!(
                        "Environment variable key '{}' cannot contain '=' or spaces",
                        k
                    )));
                }
                if k.len() > MAX_ENV_KEY_LEN {
                    return Err(TaskError::InvalidConfiguration(format!(
                        "Environment variable key '{}' exceeds maximum length",
                        k
                    )));
                }
            }
        }

        if self.timeout_ms == 0 {
            return Err(TaskError::InvalidConfiguration(
                "Timeout must be greater than 0".to_string(),
            ));
        }
        if self.channel_capacity == 0 {
            return Err(TaskError::InvalidConfiguration(
                "Channel capacity must be greater than 0".to_string(),
            ));
        }

        self.markers.validate()
    }
}

/// Marker substrings opening and closing the task region on the task channel
///
/// Any start marker opens the region and any end marker closes it; the
/// `debug` and `failure` task kinds share the same capture region.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CaptureMarkers {
    pub start: Vec<String>,
    pub end: Vec<String>,
}

impl Default for CaptureMarkers {
    fn default() -> Self {
        CaptureMarkers {
            start: vec![
                "START OF TASK [debug]".to_string(),
                "START OF TASK [failure]".to_string(),
            ],
            end: vec![
                "END OF TASK [debug]".to_string(),
                "END OF TASK [failure]".to_string(),
            ],
        }
    }
}

impl CaptureMarkers {
    pub fn new<S, E>(start: S, end: E) -> Self
    where
        S: IntoIterator,
        S::Item: Into<String>,
        E: IntoIterator,
        E::Item: Into<String>,
    {
        CaptureMarkers {
            start: start.into_iter().map(Into::into).collect(),
            end: end.into_iter().map(Into::into).collect(),
        }
    }

    pub fn is_start(&self, line: &str) -> bool {
        self.start.iter().any(|m| line.contains(m.as_str()))
    }

    pub fn is_end(&self, line: &str) -> bool {
        self.end.iter().any(|m| line.contains(m.as_str()))
    }

    fn validate(&self) -> Result<(), TaskError> {
        if self.start.is_empty() || self.end.is_empty() {
            return Err(TaskError::InvalidConfiguration(
                "At least one start and one end marker are required".to_string(),
            ));
        }
        if self.start.iter().chain(&self.end).any(|m| m.trim().is_empty()) {
            return Err(TaskError::InvalidConfiguration(
                "Markers cannot be empty or whitespace".to_string(),
            ));
        }
        Ok(())
    }
}

/// Logical channel a line was read from
///
/// The ordinary channel is bound to the process's stdout and carries general
/// logging. The task channel is bound to stderr and is scanned for markers.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum StreamSource {
    #[default]
    Ordinary = 0,
    Task = 1,
}

impl StreamSource {
    pub fn as_str(self) -> &'static str {
        match self {
            StreamSource::Ordinary => "ordinary",
            StreamSource::Task => "task",
        }
    }
}
