fn main() {
    println!("cargo:rerun-if-env-changed=WASM_WIZARD_VERSION");

    // Release pipelines may stamp a version that differs from the manifest
    // (e.g. a prerelease tag); the download URL is derived from it.
    let version = std::env::var("WASM_WIZARD_VERSION")
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| std::env::var("CARGO_PKG_VERSION").unwrap_or_default());

    let version = version.strip_prefix('v').unwrap_or(&version);

    println!("cargo:rustc-env=WASM_WIZARD_VERSION={}", version);
}
