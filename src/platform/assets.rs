use super::{Arch, Os, PlatformKey};

/// Prebuilt release assets, one per advertised platform.
///
/// Keyed by the rendered [`PlatformKey`]; Windows assets carry `.exe`.
const ASSETS: &[(&str, &str)] = &[
    ("darwin-x64", "wasm-wizard-darwin-x64"),
    ("darwin-arm64", "wasm-wizard-darwin-arm64"),
    ("linux-x64", "wasm-wizard-linux-x64"),
    ("linux-arm64", "wasm-wizard-linux-arm64"),
    ("win32-x64", "wasm-wizard-win32-x64.exe"),
    ("win32-arm64", "wasm-wizard-win32-arm64.exe"),
];

/// Static mapping from platform to release asset filename.
pub struct AssetMap;

impl AssetMap {
    pub fn lookup(key: &PlatformKey) -> Option<&'static str> {
        let key = key.to_string();
        ASSETS
            .iter()
            .find(|(platform, _)| *platform == key)
            .map(|(_, asset)| *asset)
    }

    /// Every platform the installer advertises.
    pub fn platforms() -> impl Iterator<Item = PlatformKey> {
        [Os::Darwin, Os::Linux, Os::Windows].into_iter().flat_map(|os| {
            [Arch::X64, Arch::Arm64]
                .into_iter()
                .map(move |arch| PlatformKey::new(os.clone(), arch))
        })
    }
}
