//! Fatal conditions of the installer and launcher.
//!
//! Each `Display` is the complete message shown to the user, remediation
//! included. Recoverable download failures never surface here; they are
//! [`crate::http::FetchError`] values the acquirer turns into a fallback build.

use std::fmt;
use std::path::PathBuf;

use crate::runtime::ChildExit;
use crate::{ISSUES_URL, RUSTUP_URL, TOOL_NAME};

#[derive(Debug)]
pub enum InstallError {
    /// No prebuilt asset is advertised for the resolved platform.
    UnsupportedPlatform { platform: String },
    /// The source toolchain probe could not run or reported failure.
    ToolchainMissing { probe: String },
    /// The ecosystem install command could not run or exited non-zero.
    BuildFailure { command: String, reason: String },
    /// The install target could not be prepared or written.
    Io {
        action: String,
        source: anyhow::Error,
    },
}

impl InstallError {
    pub(crate) fn io(action: impl Into<String>, source: anyhow::Error) -> Self {
        InstallError::Io {
            action: action.into(),
            source,
        }
    }

    pub(crate) fn build_exit(command: impl Into<String>, exit: ChildExit) -> Self {
        InstallError::BuildFailure {
            command: command.into(),
            reason: exit.to_string(),
        }
    }
}

impl fmt::Display for InstallError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InstallError::UnsupportedPlatform { platform } => {
                writeln!(f, "Unsupported platform: {}", platform)?;
                write!(
                    f,
                    "Please build from source (`cargo install {}`) or open an issue at:\n   {}",
                    TOOL_NAME, ISSUES_URL
                )
            }
            InstallError::ToolchainMissing { probe } => {
                writeln!(
                    f,
                    "Cargo is not available (`{}` failed). Please install Rust and Cargo first:",
                    probe
                )?;
                write!(f, "   {}", RUSTUP_URL)
            }
            InstallError::BuildFailure { command, reason } => {
                writeln!(f, "Failed to install {} via `{}`: {}", TOOL_NAME, command, reason)?;
                write!(f, "Please check the installation log above and try again.")
            }
            InstallError::Io { action, source } => {
                write!(f, "Failed to {}: {:#}", action, source)
            }
        }
    }
}

impl std::error::Error for InstallError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            InstallError::Io { source, .. } => Some(&**source),
            _ => None,
        }
    }
}

#[derive(Debug)]
pub enum LaunchError {
    /// Nothing is installed where the installer puts the binary.
    TargetMissing(PathBuf),
    /// The binary exists but could not be started.
    Spawn { path: PathBuf, source: anyhow::Error },
}

impl fmt::Display for LaunchError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LaunchError::TargetMissing(path) => {
                writeln!(f, "{} binary not found at {}", TOOL_NAME, path.display())?;
                write!(
                    f,
                    "Re-run the installer, or install it with `cargo install {}`.",
                    TOOL_NAME
                )
            }
            LaunchError::Spawn { path, source } => {
                write!(f, "Failed to start {}: {:#}", path.display(), source)
            }
        }
    }
}

impl std::error::Error for LaunchError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            LaunchError::Spawn { source, .. } => Some(&**source),
            LaunchError::TargetMissing(_) => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unsupported_platform_message_has_guidance() {
        let err = InstallError::UnsupportedPlatform {
            platform: "freebsd-x64".into(),
        };
        let msg = err.to_string();

        assert!(msg.contains("Unsupported platform: freebsd-x64"));
        assert!(msg.contains(ISSUES_URL));
        assert!(msg.contains("cargo install wasm-wizard"));
    }

    #[test]
    fn test_toolchain_missing_points_to_rustup() {
        let err = InstallError::ToolchainMissing {
            probe: "cargo --version".into(),
        };

        assert!(err.to_string().contains(RUSTUP_URL));
    }

    #[test]
    fn test_build_failure_mentions_exit() {
        let err = InstallError::build_exit("cargo install wasm-wizard", ChildExit::Code(101));
        let msg = err.to_string();

        assert!(msg.contains("exit code 101"));
        assert!(msg.contains("installation log above"));
    }

    #[test]
    fn test_io_error_keeps_source_chain() {
        let source = anyhow::anyhow!("permission denied").context("Failed to create directory");
        let err = InstallError::io("prepare /opt/native", source);

        assert!(std::error::Error::source(&err).is_some());
        let msg = err.to_string();
        assert!(msg.contains("prepare /opt/native"));
        assert!(msg.contains("permission denied"));
    }

    #[test]
    fn test_launch_target_missing_message() {
        let err = LaunchError::TargetMissing(PathBuf::from("/opt/native/wasm-wizard"));
        let msg = err.to_string();

        assert!(msg.contains("/opt/native/wasm-wizard"));
        assert!(msg.contains("Re-run the installer"));
    }
}
