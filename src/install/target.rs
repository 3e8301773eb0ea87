use std::fmt;
use std::path::{Path, PathBuf};

use crate::TOOL_NAME;

/// Name of the directory, next to the installer, that receives the binary.
pub const NATIVE_DIR: &str = "native";

/// Where the native binary lives on disk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallTarget {
    dir: PathBuf,
    path: PathBuf,
}

impl InstallTarget {
    /// The conventional location: `native/` beside the given executable.
    ///
    /// Installer and launcher are shipped side by side, so both resolve the
    /// same path from their own location.
    pub fn beside(exe: &Path) -> Self {
        let base = exe.parent().unwrap_or_else(|| Path::new("."));
        Self::in_dir(base.join(NATIVE_DIR))
    }

    pub fn in_dir(dir: impl Into<PathBuf>) -> Self {
        let dir = dir.into();
        let path = dir.join(binary_name());
        Self { dir, path }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Filename of the installed binary on this host.
pub fn binary_name() -> String {
    format!("{}{}", TOOL_NAME, std::env::consts::EXE_SUFFIX)
}

/// The installer's own declared release version.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VersionTag(String);

impl VersionTag {
    pub fn new(version: &str) -> Self {
        let version = version.trim();
        Self(version.strip_prefix('v').unwrap_or(version).to_string())
    }

    /// The version stamped into this build.
    pub fn current() -> Self {
        Self::new(env!("WASM_WIZARD_VERSION"))
    }

    pub fn version(&self) -> &str {
        &self.0
    }

    /// Git tag of the release that carries this version's assets.
    pub fn release_tag(&self) -> String {
        format!("v{}", self.0)
    }
}

impl fmt::Display for VersionTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// `<host>/<tag>/<asset>`
pub fn release_url(host: &str, version: &VersionTag, asset: &str) -> String {
    format!(
        "{}/{}/{}",
        host.trim_end_matches('/'),
        version.release_tag(),
        asset
    )
}
