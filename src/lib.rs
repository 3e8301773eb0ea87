pub mod error;
pub mod fallback;
pub mod http;
pub mod install;
pub mod launcher;
pub mod platform;
pub mod runtime;

/// Name of the wrapped tool, its crate, and its installed binary.
pub const TOOL_NAME: &str = "wasm-wizard";

/// Base URL of the release download host.
pub const DEFAULT_RELEASES_URL: &str =
    "https://github.com/wasm-wizard/wasm-wizard/releases/download";

pub const ISSUES_URL: &str = "https://github.com/wasm-wizard/wasm-wizard/issues";

pub const RUSTUP_URL: &str = "https://rustup.rs/";
