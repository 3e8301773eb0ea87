//! Runtime abstraction for system operations.
//!
//! Everything the installer and launcher do to the host (files, permissions,
//! child processes) goes through [`Runtime`], so the control flow can be
//! exercised against a mock without touching real process state.
//!
//! # Structure
//!
//! - `env` - The running executable
//! - `fs` - File system operations (directories, files, permissions)
//! - `process` - Child process execution and exit status mapping

mod env;
mod fs;
mod process;

use anyhow::Result;
use async_trait::async_trait;
use std::path::{Path, PathBuf};

pub use process::{ChildExit, ToolCommand};

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Runtime: Send + Sync {
    // Environment
    fn current_exe(&self) -> Result<PathBuf>;

    // File System
    fn exists(&self, path: &Path) -> bool;
    fn create_dir_all(&self, path: &Path) -> Result<()>;
    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>>;
    fn remove_file(&self, path: &Path) -> Result<()>;

    /// Set file permissions (mode) on Unix systems. No-op on Windows.
    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()>;

    // Processes
    /// Run a command to completion with all output discarded.
    async fn run_quiet(&self, command: &ToolCommand) -> Result<ChildExit>;

    /// Run a command to completion with stdin, stdout and stderr shared with
    /// the current process.
    async fn run_inherited(&self, command: &ToolCommand) -> Result<ChildExit>;
}

pub struct RealRuntime;

#[async_trait]
impl Runtime for RealRuntime {
    fn current_exe(&self) -> Result<PathBuf> {
        self.current_exe_impl()
    }

    fn exists(&self, path: &Path) -> bool {
        self.exists_impl(path)
    }

    fn create_dir_all(&self, path: &Path) -> Result<()> {
        self.create_dir_all_impl(path)
    }

    fn create_file(&self, path: &Path) -> Result<Box<dyn std::io::Write + Send>> {
        self.create_file_impl(path)
    }

    fn remove_file(&self, path: &Path) -> Result<()> {
        self.remove_file_impl(path)
    }

    fn set_permissions(&self, path: &Path, mode: u32) -> Result<()> {
        self.set_permissions_impl(path, mode)
    }

    async fn run_quiet(&self, command: &ToolCommand) -> Result<ChildExit> {
        self.run_quiet_impl(command).await
    }

    async fn run_inherited(&self, command: &ToolCommand) -> Result<ChildExit> {
        self.run_inherited_impl(command).await
    }
}
