use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

use crate::error::{LauncherError, Result};

/// How a delegated child run ended
#[derive(Debug)]
pub enum ChildOutcome {
    /// Exited normally with this code
    Exited(i32),
    /// Killed by the named signal
    Signaled(String),
    /// Never ran: the executable could not be spawned
    FailedToStart { path: PathBuf, error: std::io::Error },
}

impl ChildOutcome {
    /// The code the launcher should exit with, or the failure to report
    pub fn into_exit_code(self) -> Result<i32> {
        match self {
            ChildOutcome::Exited(code) => Ok(code),
            ChildOutcome::Signaled(signal) => Err(LauncherError::Terminated { signal }),
            ChildOutcome::FailedToStart { path, error } => Err(LauncherError::Startup {
                path,
                source: error,
            }),
        }
    }

    fn from_wait(path: &Path, status: std::io::Result<ExitStatus>) -> Self {
        match status {
            Ok(status) => Self::from_status(status),
            // Lost track of the child; treat it like a launch that never happened
            Err(error) => ChildOutcome::FailedToStart {
                path: path.to_path_buf(),
                error,
            },
        }
    }

    fn from_status(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ChildOutcome::Exited(code);
        }
        match termination_signal(status) {
            Some(signal) => ChildOutcome::Signaled(signal),
            None => ChildOutcome::Exited(1),
        }
    }
}

#[cfg(unix)]
fn termination_signal(status: ExitStatus) -> Option<String> {
    use std::os::unix::process::ExitStatusExt;

    let raw = status.signal()?;
    Some(match nix::sys::signal::Signal::try_from(raw) {
        Ok(signal) => signal.as_str().to_string(),
        Err(_) => format!("signal {raw}"),
    })
}

#[cfg(not(unix))]
fn termination_signal(_status: ExitStatus) -> Option<String> {
    None
}

/// Run `path` with `args`, sharing the launcher's stdin, stdout and stderr,
/// and wait for it to finish.
///
/// Ctrl-C reaches the child directly through the terminal's process group;
/// the launcher swallows its own copy and keeps waiting so the child decides
/// how to shut down.
pub async fn supervise(path: &Path, args: &[OsString]) -> ChildOutcome {
    tracing::debug!("Running {} with {} argument(s)", path.display(), args.len());

    let mut child = match Command::new(path)
        .args(args)
        .stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::inherit())
        .spawn()
    {
        Ok(child) => child,
        Err(error) => {
            return ChildOutcome::FailedToStart {
                path: path.to_path_buf(),
                error,
            }
        }
    };

    loop {
        tokio::select! {
            status = child.wait() => return ChildOutcome::from_wait(path, status),
            interrupted = tokio::signal::ctrl_c() => {
                if let Err(e) = interrupted {
                    tracing::debug!("Unable to listen for Ctrl-C: {}", e);
                    return ChildOutcome::from_wait(path, child.wait().await);
                }
                tracing::debug!("Interrupt received; waiting for {} to exit", path.display());
            }
        }
    }
}
