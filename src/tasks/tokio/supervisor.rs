use std::process::Stdio;

use tokio::process::{Child, ChildStderr, ChildStdout, Command};

use crate::tasks::{
    config::CaptureConfig, control::ProcessControl, error::TaskError,
    process::child::kill_process,
};

/// Launches the external task with both output streams piped
///
/// Exit status is never interpreted: whether the task completed is decided
/// from its output, not from how the process ended.
#[derive(Debug)]
pub struct ProcessSupervisor;

impl ProcessSupervisor {
    /// Starts the process described by `config`.
    ///
    /// Stdout becomes the ordinary channel, stderr the task channel, stdin is
    /// closed. Dropping the handle does not kill the process; only an
    /// explicit [`ProcessControl::kill`] does.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::Launch`] if the executable is missing, not
    /// permitted, or otherwise cannot be spawned.
    pub fn start(config: &CaptureConfig) -> Result<ProcessHandle, TaskError> {
        let mut cmd = Self::setup_command(config);
        match cmd.spawn() {
            Ok(child) => {
                let process_id = child.id();

                #[cfg(feature = "tracing")]
                tracing::info!(
                    command = %config.command,
                    args = ?config.args,
                    process_id,
                    "Process launched"
                );

                Ok(ProcessHandle {
                    child,
                    process_id,
                    killed: false,
                })
            }
            Err(e) => {
                #[cfg(feature = "tracing")]
                tracing::error!(error = %e, command = %config.command, "Failed to spawn child process");

                Err(TaskError::Launch(format!("{}: {}", config.command, e)))
            }
        }
    }

    /// Creates a tokio `Command` with all the parameters in `config`.
    pub(crate) fn setup_command(config: &CaptureConfig) -> Command {
        let mut cmd = Command::new(&config.command);

        cmd.args(&config.args);

        if let Some(dir) = &config.working_dir {
            cmd.current_dir(dir);
        }

        if let Some(envs) = &config.env {
            cmd.envs(envs);
        }

        cmd.stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .stdin(Stdio::null());
        cmd
    }
}

/// Handle to a launched external task
#[derive(Debug)]
pub struct ProcessHandle {
    child: Child,
    process_id: Option<u32>,
    killed: bool,
}

impl ProcessHandle {
    /// Takes the two output streams so they can feed the multiplexer.
    ///
    /// # Errors
    ///
    /// Returns [`TaskError::IO`] if a stream was already taken.
    pub fn take_output_streams(&mut self) -> Result<(ChildStdout, ChildStderr), TaskError> {
        let Some(stdout) = self.child.stdout.take() else {
            let msg = "Failed to take stdout of child process";
            #[cfg(feature = "tracing")]
            tracing::error!(msg);
            return Err(TaskError::IO(msg.to_string()));
        };

        let Some(stderr) = self.child.stderr.take() else {
            let msg = "Failed to take stderr of child process";
            #[cfg(feature = "tracing")]
            tracing::error!(msg);
            return Err(TaskError::IO(msg.to_string()));
        };

        Ok((stdout, stderr))
    }

    /// Returns true once the process has been killed through this handle.
    pub fn is_killed(&self) -> bool {
        self.killed
    }

    async fn kill_child(&mut self) {
        if self.killed {
            return;
        }
        self.killed = true;

        if let Ok(Some(_status)) = self.child.try_wait() {
            #[cfg(feature = "tracing")]
            tracing::debug!(status = ?_status, "Child process already exited, nothing to kill");
            self.process_id = None;
            return;
        }

        match self.child.kill().await {
            Ok(()) => {
                #[cfg(feature = "tracing")]
                tracing::info!(process_id = self.process_id, "Child process killed");
            }
            Err(e) => {
                use std::io::ErrorKind;
                if e.kind() == ErrorKind::InvalidInput {
                    #[cfg(feature = "tracing")]
                    tracing::debug!("Child process already exited, nothing to kill");
                } else {
                    #[cfg(feature = "tracing")]
                    tracing::warn!(error = %e, "Failed to kill child process");

                    if let Some(pid) = self.process_id {
                        #[cfg(feature = "tracing")]
                        tracing::info!("Trying to kill process ID {}", pid);
                        if let Err(_e) = kill_process(pid) {
                            #[cfg(feature = "tracing")]
                            tracing::warn!(error = %_e, "Failed to kill process ID {}", pid);
                        }
                    }
                }
            }
        }
        self.process_id = None;
    }
}

impl ProcessControl for ProcessHandle {
    fn kill(&mut self) -> impl std::future::Future<Output = ()> + Send {
        self.kill_child()
    }

    fn process_id(&self) -> Option<u32> {
        self.process_id
    }
}
