//! Child process execution.

use anyhow::{Context, Result};
use log::debug;
use std::ffi::OsString;
use std::fmt;
use std::process::{ExitStatus, Stdio};
use tokio::process::Command;

use super::RealRuntime;

/// A program and its argument vector, passed through without shell parsing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCommand {
    pub program: OsString,
    pub args: Vec<OsString>,
}

impl ToolCommand {
    pub fn new<P, I, A>(program: P, args: I) -> Self
    where
        P: Into<OsString>,
        I: IntoIterator<Item = A>,
        A: Into<OsString>,
    {
        Self {
            program: program.into(),
            args: args.into_iter().map(Into::into).collect(),
        }
    }
}

impl fmt::Display for ToolCommand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// How a child process ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChildExit {
    /// Normal exit with a status code.
    Code(i32),
    /// Terminated by a signal (Unix only).
    Signal(i32),
    /// The platform reported neither a code nor a signal.
    Unknown,
}

impl ChildExit {
    pub fn success(&self) -> bool {
        matches!(self, ChildExit::Code(0))
    }

    /// The status the parent should exit with to mirror this child.
    ///
    /// Signals map to `128 + signal`, the convention shells use, so a child
    /// killed by SIGKILL yields 137. Anything unrepresentable yields 1.
    pub fn exit_code(&self) -> i32 {
        match *self {
            ChildExit::Code(code) => code,
            ChildExit::Signal(signal) => 128 + signal,
            ChildExit::Unknown => 1,
        }
    }
}

impl From<ExitStatus> for ChildExit {
    fn from(status: ExitStatus) -> Self {
        if let Some(code) = status.code() {
            return ChildExit::Code(code);
        }

        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ChildExit::Signal(signal);
            }
        }

        ChildExit::Unknown
    }
}

impl fmt::Display for ChildExit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChildExit::Code(code) => write!(f, "exit code {}", code),
            ChildExit::Signal(signal) => match signal_name(*signal) {
                Some(name) => write!(f, "signal {} ({})", signal, name),
                None => write!(f, "signal {}", signal),
            },
            ChildExit::Unknown => write!(f, "unknown termination"),
        }
    }
}

#[cfg(unix)]
fn signal_name(signal: i32) -> Option<&'static str> {
    nix::sys::signal::Signal::try_from(signal)
        .ok()
        .map(|s| s.as_str())
}

#[cfg(not(unix))]
fn signal_name(_signal: i32) -> Option<&'static str> {
    None
}

impl RealRuntime {
    #[tracing::instrument(skip(self))]
    pub(crate) async fn run_quiet_impl(&self, command: &ToolCommand) -> Result<ChildExit> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .await
            .with_context(|| format!("Failed to run `{}`", command))?;

        let exit = ChildExit::from(status);
        debug!("`{}` finished with {}", command, exit);
        Ok(exit)
    }

    #[tracing::instrument(skip(self))]
    pub(crate) async fn run_inherited_impl(&self, command: &ToolCommand) -> Result<ChildExit> {
        let status = Command::new(&command.program)
            .args(&command.args)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .status()
            .await
            .with_context(|| format!("Failed to run `{}`", command))?;

        let exit = ChildExit::from(status);
        debug!("`{}` finished with {}", command, exit);
        Ok(exit)
    }
}
