/// Forcibly kills a process by process ID
///
/// Fallback used when killing through the child handle failed. On Unix
/// sends `SIGKILL`, on Windows uses `TerminateProcess`.
///
/// # Errors
///
/// Returns an error if:
/// - The process does not exist (no such process)
/// - Permission denied
/// - Invalid process ID
/// - Platform-specific termination failed
pub(crate) fn kill_process(pid: u32) -> Result<(), std::io::Error> {
    #[cfg(unix)]
    {
        use nix::errno::Errno;
        use nix::sys::signal::{Signal, kill};
        use nix::unistd::Pid;

        let Ok(raw) = i32::try_from(pid) else {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid PID: {}", pid),
            ));
        };
        if raw <= 0 {
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("Invalid PID: {}", pid),
            ));
        }

        match kill(Pid::from_raw(raw), Signal::SIGKILL) {
            Ok(()) => Ok(()),
            Err(Errno::ESRCH) => Err(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("Process with PID {} does not exist", pid),
            )),
            Err(Errno::EPERM) => Err(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                format!("Permission denied to kill PID {}", pid),
            )),
            Err(e) => Err(std::io::Error::other(format!(
                "Failed to send SIGKILL to PID {}: {}",
                pid, e
            ))),
        }
    }

    #[cfg(windows)]
    {
        use windows::Win32::Foundation::CloseHandle;
        use windows::Win32::System::Threading::{OpenProcess, PROCESS_TERMINATE, TerminateProcess};

        unsafe {
            let process_handle = OpenProcess(PROCESS_TERMINATE, false, pid).map_err(|e| {
                std::io::Error::new(
                    std::io::ErrorKind::NotFound,
                    format!("Failed to open process with PID {}: {:?}", pid, e),
                )
            })?;

            let result = TerminateProcess(process_handle, 1).map_err(|e| {
                std::io::Error::other(format!(
                    "Failed to terminate process with PID {}: {:?}",
                    pid, e
                ))
            });

            let _ = CloseHandle(process_handle);
            result
        }
    }

    #[cfg(not(any(unix, windows)))]
    {
        let _ = pid;
        Err(std::io::Error::other("Unsupported platform"))
    }
}
