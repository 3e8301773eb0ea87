use anyhow::{Context, Result};
use log::debug;
use reqwest::Client;
use std::time::Duration;

use crate::{DEFAULT_RELEASES_URL, http::HttpClient, runtime::Runtime};

use super::target::{InstallTarget, VersionTag};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(30);

pub struct Config<R: Runtime> {
    pub runtime: R,
    pub http_client: HttpClient,
    pub releases_url: String,
    pub target: InstallTarget,
    pub version: VersionTag,
}

impl<R: Runtime> Config<R> {
    /// Build the installer configuration.
    ///
    /// The binary always goes to `native/` beside the running installer, the
    /// same place the launcher looks for it.
    pub fn new(runtime: R, releases_url: Option<String>) -> Result<Self> {
        let target = InstallTarget::beside(&runtime.current_exe()?);
        Self::with_target(runtime, target, releases_url)
    }

    pub fn with_target(
        runtime: R,
        target: InstallTarget,
        releases_url: Option<String>,
    ) -> Result<Self> {
        let version = VersionTag::current();

        let client = Client::builder()
            .user_agent(format!("wasm-wizard-installer/{}", version))
            .connect_timeout(CONNECT_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        debug!("Install target: {:?}", target.path());

        let releases_url = releases_url.unwrap_or_else(|| DEFAULT_RELEASES_URL.to_string());
        debug!("Releases host: {}", releases_url);

        Ok(Self {
            runtime,
            http_client: HttpClient::new(client),
            releases_url,
            target,
            version,
        })
    }
}
