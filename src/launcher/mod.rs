//! Pass-through launcher for the installed native binary.

use log::debug;
use std::ffi::OsString;

use crate::error::LaunchError;
use crate::install::InstallTarget;
use crate::runtime::{ChildExit, Runtime, ToolCommand};

/// Run the installed binary with `args` and report the status the launcher
/// must exit with.
///
/// Arguments are forwarded untouched and the child shares all three standard
/// streams with this process. A child killed by a signal yields
/// `128 + signal` (see [`ChildExit::exit_code`]).
#[tracing::instrument(skip(runtime))]
pub async fn launch<R: Runtime>(
    runtime: &R,
    target: &InstallTarget,
    args: Vec<OsString>,
) -> Result<i32, LaunchError> {
    let path = target.path();
    if !runtime.exists(path) {
        return Err(LaunchError::TargetMissing(path.to_path_buf()));
    }

    let command = ToolCommand::new(path, args);
    let exit = runtime
        .run_inherited(&command)
        .await
        .map_err(|source| LaunchError::Spawn {
            path: path.to_path_buf(),
            source,
        })?;

    if !matches!(exit, ChildExit::Code(_)) {
        debug!("{:?} ended with {}", path, exit);
    }
    Ok(exit.exit_code())
}
