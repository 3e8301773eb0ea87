//! Building the tool from source when no prebuilt binary can be fetched.
//!
//! The fallback hands the whole job to the ecosystem installer
//! (`cargo install`), which places the result on the user's `PATH` rather
//! than at the install target.

use log::{debug, info};

use crate::TOOL_NAME;
use crate::error::InstallError;
use crate::runtime::{Runtime, ToolCommand};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FallbackBuilder {
    probe: ToolCommand,
    install: ToolCommand,
}

impl FallbackBuilder {
    pub fn new(probe: ToolCommand, install: ToolCommand) -> Self {
        Self { probe, install }
    }

    /// `cargo --version` as the probe, `cargo install wasm-wizard` as the build.
    pub fn cargo() -> Self {
        Self::new(
            ToolCommand::new("cargo", ["--version"]),
            ToolCommand::new("cargo", ["install", TOOL_NAME]),
        )
    }

    pub fn probe(&self) -> &ToolCommand {
        &self.probe
    }

    pub fn install(&self) -> &ToolCommand {
        &self.install
    }

    /// Verify the toolchain, then run the install command with its output
    /// streamed straight to the terminal.
    #[tracing::instrument(skip(self, runtime))]
    pub async fn build_from_source<R: Runtime>(&self, runtime: &R) -> Result<(), InstallError> {
        println!("    building {} from source using cargo...", TOOL_NAME);

        match runtime.run_quiet(&self.probe).await {
            Ok(exit) if exit.success() => {
                debug!("Toolchain probe `{}` succeeded", self.probe);
            }
            Ok(exit) => {
                debug!("Toolchain probe `{}` finished with {}", self.probe, exit);
                return Err(self.toolchain_missing());
            }
            Err(e) => {
                debug!("Toolchain probe `{}` could not run: {:#}", self.probe, e);
                return Err(self.toolchain_missing());
            }
        }

        info!("Running `{}`", self.install);
        let exit = runtime
            .run_inherited(&self.install)
            .await
            .map_err(|e| InstallError::BuildFailure {
                command: self.install.to_string(),
                reason: format!("{:#}", e),
            })?;

        if !exit.success() {
            return Err(InstallError::build_exit(self.install.to_string(), exit));
        }

        println!("   installed {} via `{}`", TOOL_NAME, self.install);
        Ok(())
    }

    fn toolchain_missing(&self) -> InstallError {
        InstallError::ToolchainMissing {
            probe: self.probe.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::runtime::{ChildExit, MockRuntime};
    use mockall::predicate::eq;

    #[test]
    fn test_cargo_commands() {
        let builder = FallbackBuilder::cargo();

        assert_eq!(builder.probe().to_string(), "cargo --version");
        assert_eq!(builder.install().to_string(), "cargo install wasm-wizard");
    }

    #[test_log::test(tokio::test)]
    async fn test_build_from_source_success() {
        let builder = FallbackBuilder::cargo();
        let mut runtime = MockRuntime::new();

        runtime
            .expect_run_quiet()
            .with(eq(builder.probe().clone()))
            .times(1)
            .returning(|_| Ok(ChildExit::Code(0)));
        runtime
            .expect_run_inherited()
            .with(eq(builder.install().clone()))
            .times(1)
            .returning(|_| Ok(ChildExit::Code(0)));

        builder.build_from_source(&runtime).await.unwrap();
    }

    #[tokio::test]
    async fn test_missing_probe_skips_install() {
        let builder = FallbackBuilder::cargo();
        let mut runtime = MockRuntime::new();

        runtime
            .expect_run_quiet()
            .times(1)
            .returning(|_| Err(anyhow::anyhow!("No such file or directory (os error 2)")));
        runtime.expect_run_inherited().never();

        let err = builder.build_from_source(&runtime).await.unwrap_err();

        assert!(matches!(err, InstallError::ToolchainMissing { .. }));
    }

    #[tokio::test]
    async fn test_failing_probe_skips_install() {
        let builder = FallbackBuilder::cargo();
        let mut runtime = MockRuntime::new();

        runtime
            .expect_run_quiet()
            .times(1)
            .returning(|_| Ok(ChildExit::Code(127)));
        runtime.expect_run_inherited().never();

        let err = builder.build_from_source(&runtime).await.unwrap_err();

        assert!(matches!(err, InstallError::ToolchainMissing { .. }));
    }

    #[tokio::test]
    async fn test_install_nonzero_exit_is_build_failure() {
        let builder = FallbackBuilder::cargo();
        let mut runtime = MockRuntime::new();

        runtime
            .expect_run_quiet()
            .returning(|_| Ok(ChildExit::Code(0)));
        runtime
            .expect_run_inherited()
            .times(1)
            .returning(|_| Ok(ChildExit::Code(101)));

        let err = builder.build_from_source(&runtime).await.unwrap_err();

        match err {
            InstallError::BuildFailure { command, reason } => {
                assert_eq!(command, "cargo install wasm-wizard");
                assert_eq!(reason, "exit code 101");
            }
            other => panic!("expected build failure, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_install_spawn_error_is_build_failure() {
        let builder = FallbackBuilder::cargo();
        let mut runtime = MockRuntime::new();

        runtime
            .expect_run_quiet()
            .returning(|_| Ok(ChildExit::Code(0)));
        runtime
            .expect_run_inherited()
            .returning(|_| Err(anyhow::anyhow!("permission denied")));

        let err = builder.build_from_source(&runtime).await.unwrap_err();

        assert!(matches!(err, InstallError::BuildFailure { .. }));
        assert!(err.to_string().contains("permission denied"));
    }
}
