//! Platform resolution and release asset mapping.
//!
//! This module maps the host operating system and CPU architecture to a
//! canonical [`PlatformKey`] and looks up which prebuilt release asset
//! serves that platform.

mod assets;
mod detection;

pub use assets::AssetMap;
pub use detection::{Arch, HostEnv, Os, PlatformKey, resolve};
