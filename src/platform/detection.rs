use std::fmt;

/// Snapshot of the host-reported operating system and architecture.
///
/// Resolution only ever looks at this snapshot, never at the live process,
/// so any combination can be resolved in tests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HostEnv {
    pub os: String,
    pub arch: String,
}

impl HostEnv {
    pub fn new(os: impl Into<String>, arch: impl Into<String>) -> Self {
        Self {
            os: os.into(),
            arch: arch.into(),
        }
    }

    /// Capture the platform this binary is running on.
    pub fn current() -> Self {
        Self::new(std::env::consts::OS, std::env::consts::ARCH)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Os {
    Darwin,
    Linux,
    Windows,
    Other(String),
}

impl Os {
    fn normalize(raw: &str) -> Self {
        let raw = raw.trim().to_ascii_lowercase();
        match raw.as_str() {
            "macos" | "darwin" => Os::Darwin,
            "linux" => Os::Linux,
            "windows" | "win32" => Os::Windows,
            _ => Os::Other(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Os::Darwin => "darwin",
            Os::Linux => "linux",
            Os::Windows => "win32",
            Os::Other(name) => name,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Arch {
    X64,
    Arm64,
    Other(String),
}

impl Arch {
    fn normalize(raw: &str) -> Self {
        let raw = raw.trim().to_ascii_lowercase();
        match raw.as_str() {
            "x86_64" | "amd64" | "x64" => Arch::X64,
            "aarch64" | "arm64" => Arch::Arm64,
            _ => Arch::Other(raw),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Arch::X64 => "x64",
            Arch::Arm64 => "arm64",
            Arch::Other(name) => name,
        }
    }
}

/// Canonical platform identifier, rendered as `<os>-<arch>`.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformKey {
    pub os: Os,
    pub arch: Arch,
}

impl PlatformKey {
    pub fn new(os: Os, arch: Arch) -> Self {
        Self { os, arch }
    }
}

impl fmt::Display for PlatformKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.os.as_str(), self.arch.as_str())
    }
}

/// Resolve a host snapshot to its canonical platform key.
///
/// Unrecognized names are carried through verbatim, which yields a key with
/// no asset entry.
pub fn resolve(env: &HostEnv) -> PlatformKey {
    PlatformKey::new(Os::normalize(&env.os), Arch::normalize(&env.arch))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_rust_target_names() {
        let key = resolve(&HostEnv::new("macos", "aarch64"));
        assert_eq!(key, PlatformKey::new(Os::Darwin, Arch::Arm64));
        assert_eq!(key.to_string(), "darwin-arm64");

        let key = resolve(&HostEnv::new("linux", "x86_64"));
        assert_eq!(key.to_string(), "linux-x64");

        let key = resolve(&HostEnv::new("windows", "x86_64"));
        assert_eq!(key.to_string(), "win32-x64");
    }

    #[test]
    fn test_resolve_arch_aliases() {
        for arch in ["x86_64", "amd64", "x64", "AMD64"] {
            assert_eq!(resolve(&HostEnv::new("linux", arch)).arch, Arch::X64);
        }
        for arch in ["aarch64", "arm64", "ARM64"] {
            assert_eq!(resolve(&HostEnv::new("linux", arch)).arch, Arch::Arm64);
        }
    }

    #[test]
    fn test_resolve_os_aliases() {
        assert_eq!(resolve(&HostEnv::new("darwin", "x64")).os, Os::Darwin);
        assert_eq!(resolve(&HostEnv::new("win32", "x64")).os, Os::Windows);
        assert_eq!(resolve(&HostEnv::new(" Linux ", "x64")).os, Os::Linux);
    }

    #[test]
    fn test_resolve_unknown_is_carried_verbatim() {
        let key = resolve(&HostEnv::new("FreeBSD", "riscv64"));

        assert_eq!(key.os, Os::Other("freebsd".into()));
        assert_eq!(key.arch, Arch::Other("riscv64".into()));
        assert_eq!(key.to_string(), "freebsd-riscv64");
    }

    #[test]
    fn test_resolve_is_pure() {
        let env = HostEnv::new("linux", "aarch64");
        assert_eq!(resolve(&env), resolve(&env.clone()));
    }

    #[test]
    fn test_current_host_env() {
        let env = HostEnv::current();

        assert!(!env.os.is_empty());
        assert!(!env.arch.is_empty());

        #[cfg(target_os = "linux")]
        assert_eq!(resolve(&env).os, Os::Linux);

        #[cfg(target_os = "macos")]
        assert_eq!(resolve(&env).os, Os::Darwin);

        #[cfg(target_arch = "x86_64")]
        assert_eq!(resolve(&env).arch, Arch::X64);

        #[cfg(target_arch = "aarch64")]
        assert_eq!(resolve(&env).arch, Arch::Arm64);
    }
}
