//! The information snapshot: application identity plus build provenance.

use serde::{Deserialize, Serialize};

use crate::version::DIRTY_SUFFIX;

/// Application identity and build provenance.
///
/// Fields with no available source are empty strings, never placeholders.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Info {
    /// Application name and version.
    pub app: App,
    /// Toolchain, target and VCS details.
    pub build: Build,
}

impl Info {
    /// True when the binary was built from a modified working tree.
    pub fn is_dirty(&self) -> bool {
        self.app.version.ends_with(DIRTY_SUFFIX)
    }
}

/// Application identity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct App {
    /// Name override, or the executable's file name.
    pub name: String,
    /// Release version. The toolchain-reported module version wins over the override.
    pub version: String,
}

/// Build provenance.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Build {
    /// Compiler version without the `rustc ` prefix, e.g. `1.93.0 (254b59607 2026-01-19)`.
    pub toolchain: String,
    /// Target architecture, e.g. `x86_64`.
    pub arch: String,
    /// Target operating system, e.g. `linux`.
    pub os: String,
    /// Commit the binary was built from.
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub commit: String,
    /// Build date: the override, or the commit time.
    pub date: String,
}
