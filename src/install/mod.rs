//! Acquiring the native binary: download the prebuilt asset, or fall back to
//! a source build.

use anyhow::Context;
use log::{debug, info, warn};
use std::path::{Path, PathBuf};

use crate::{
    TOOL_NAME,
    error::InstallError,
    fallback::FallbackBuilder,
    http::{FetchError, HttpClient},
    platform::{AssetMap, HostEnv, PlatformKey, resolve},
    runtime::Runtime,
};

mod config;
mod target;

pub use config::Config;
pub use target::{InstallTarget, NATIVE_DIR, VersionTag, binary_name, release_url};

/// Permission bits for the downloaded binary.
pub const EXECUTABLE_MODE: u32 = 0o755;

/// How the tool ended up installed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Acquired {
    /// The prebuilt asset was written to the install target.
    Downloaded { path: PathBuf, bytes: u64 },
    /// The ecosystem installer built it; it lives wherever that puts binaries.
    BuiltFromSource,
}

pub struct Acquirer<R: Runtime> {
    runtime: R,
    http_client: HttpClient,
    releases_url: String,
    target: InstallTarget,
    fallback: FallbackBuilder,
}

impl<R: Runtime> Acquirer<R> {
    pub fn new(
        runtime: R,
        http_client: HttpClient,
        releases_url: impl Into<String>,
        target: InstallTarget,
        fallback: FallbackBuilder,
    ) -> Self {
        Self {
            runtime,
            http_client,
            releases_url: releases_url.into(),
            target,
            fallback,
        }
    }

    /// Put a `wasm-wizard` binary for `platform` in place.
    ///
    /// Unsupported platforms fail before any filesystem or network access.
    /// Any download failure other than a local write error triggers exactly
    /// one source build; the download is never retried.
    #[tracing::instrument(skip(self))]
    pub async fn acquire(
        &self,
        version: &VersionTag,
        platform: &PlatformKey,
    ) -> Result<Acquired, InstallError> {
        let asset = AssetMap::lookup(platform).ok_or_else(|| InstallError::UnsupportedPlatform {
            platform: platform.to_string(),
        })?;
        debug!("Asset for {}: {}", platform, asset);

        let dir = self.target.dir();
        self.runtime
            .create_dir_all(dir)
            .map_err(|e| InstallError::io(format!("create directory {}", dir.display()), e))?;

        let path = self.target.path();
        self.remove_stale(path)?;

        let url = release_url(&self.releases_url, version, asset);
        println!(" downloading {} {} ({})", TOOL_NAME, version.release_tag(), platform);
        info!("Downloading from {}", url);

        let result = self
            .http_client
            .download_file(&url, || {
                self.runtime
                    .create_file(path)
                    .with_context(|| format!("Failed to create {}", path.display()))
            })
            .await;

        match result {
            Ok(bytes) => {
                self.runtime
                    .set_permissions(path, EXECUTABLE_MODE)
                    .map_err(|e| {
                        InstallError::io(format!("mark {} executable", path.display()), e)
                    })?;
                info!("Wrote {} bytes to {:?}", bytes, path);
                Ok(Acquired::Downloaded {
                    path: path.to_path_buf(),
                    bytes,
                })
            }
            Err(e) if !e.is_recoverable() => {
                self.discard_partial(path);
                Err(InstallError::io(
                    format!("write {}", path.display()),
                    anyhow::Error::new(e),
                ))
            }
            Err(e) => {
                match &e {
                    FetchError::NotPublished => eprintln!(
                        "No prebuilt binary for {} {} on {}",
                        TOOL_NAME,
                        version.release_tag(),
                        platform
                    ),
                    other => eprintln!("Failed to download prebuilt binary: {}", other),
                }
                warn!("Download of {} failed ({}), building from source", url, e);
                self.discard_partial(path);

                self.fallback.build_from_source(&self.runtime).await?;
                Ok(Acquired::BuiltFromSource)
            }
        }
    }

    /// A previous install may have left a binary (possibly truncated) here.
    /// Removing it first means a fresh file never inherits its executable bit.
    fn remove_stale(&self, path: &Path) -> Result<(), InstallError> {
        if self.runtime.exists(path) {
            debug!("Removing existing file at {:?}", path);
            self.runtime
                .remove_file(path)
                .map_err(|e| InstallError::io(format!("replace {}", path.display()), e))?;
        }
        Ok(())
    }

    fn discard_partial(&self, path: &Path) {
        if self.runtime.exists(path) {
            if let Err(e) = self.runtime.remove_file(path) {
                warn!("Failed to remove partial download {:?}: {:#}", path, e);
            }
        }
    }
}

impl<R: Runtime> From<Config<R>> for Acquirer<R> {
    fn from(config: Config<R>) -> Self {
        Acquirer::new(
            config.runtime,
            config.http_client,
            config.releases_url,
            config.target,
            FallbackBuilder::cargo(),
        )
    }
}

/// Install entry point: resolve the host platform and acquire the binary.
#[tracing::instrument(skip(runtime, releases_url))]
pub async fn install<R: Runtime>(
    runtime: R,
    host: &HostEnv,
    releases_url: Option<String>,
) -> Result<Acquired, InstallError> {
    let config = Config::new(runtime, releases_url)
        .map_err(|e| InstallError::io("configure the installer", e))?;
    run(config, host).await
}

pub async fn run<R: Runtime>(config: Config<R>, host: &HostEnv) -> Result<Acquired, InstallError> {
    let version = config.version.clone();
    let platform = resolve(host);
    println!("  installing {} {} for {}", TOOL_NAME, version, platform);

    let acquirer = Acquirer::from(config);
    let acquired = acquirer.acquire(&version, &platform).await?;

    if let Acquired::Downloaded { path, .. } = &acquired {
        println!("   installed {}", path.display());
    }
    println!("Try running: {} --help", TOOL_NAME);

    Ok(acquired)
}
