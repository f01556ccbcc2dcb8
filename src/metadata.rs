//! Build metadata reported by the toolchain: module version, compiler version and
//! key/value build settings.
//!
//! [`EmbeddedMetadata`] wraps what [`build::emit`](crate::build::emit) recorded for the
//! application. Any other [`MetadataSource`] can be plugged into an
//! [`InfoProvider`](crate::InfoProvider).

/// Setting key: commit time of the built revision.
pub const VCS_TIME: &str = "vcs.time";
/// Setting key: revision id of the built commit.
pub const VCS_REVISION: &str = "vcs.revision";
/// Setting key: `true` when the working tree had uncommitted changes.
pub const VCS_MODIFIED: &str = "vcs.modified";
/// Setting key: target operating system.
pub const TARGET_OS: &str = "target_os";
/// Setting key: target architecture.
pub const TARGET_ARCH: &str = "target_arch";

/// Prefix of `rustc --version` output.
pub const TOOLCHAIN_PREFIX: &str = "rustc ";

/// One key/value build setting.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildSetting {
    /// Setting name, e.g. [`VCS_REVISION`].
    pub key: String,
    /// Raw value as recorded at build time.
    pub value: String,
}

impl BuildSetting {
    /// Setting with the given key and value.
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
        }
    }
}

/// Metadata embedded in the binary at build time.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildMetadata {
    /// Version of the main package, e.g. `v1.2.3` from a git tag or `1.2.3` from Cargo.
    pub module_version: String,
    /// Raw compiler version, e.g. `rustc 1.93.0 (254b59607 2026-01-19)`.
    pub toolchain_version: String,
    /// Build settings in the order they were recorded.
    pub settings: Vec<BuildSetting>,
}

impl BuildMetadata {
    /// Value of the last setting with the given key.
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings
            .iter()
            .rev()
            .find(|s| s.key == key)
            .map(|s| s.value.as_str())
    }
}

/// Source of toolchain build metadata.
///
/// Returning `None` means the binary carries no metadata; this is not an error.
pub trait MetadataSource {
    /// Metadata for the running binary, or `None` when none was recorded.
    fn read_build_metadata(&self) -> Option<BuildMetadata>;
}

impl<S: MetadataSource + ?Sized> MetadataSource for &S {
    fn read_build_metadata(&self) -> Option<BuildMetadata> {
        (**self).read_build_metadata()
    }
}

/// A source that never has metadata.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoMetadata;

impl MetadataSource for NoMetadata {
    fn read_build_metadata(&self) -> Option<BuildMetadata> {
        None
    }
}

/// Metadata as constants in the application binary, written by the build script.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StaticMetadata {
    /// See [`BuildMetadata::module_version`].
    pub module_version: &'static str,
    /// See [`BuildMetadata::toolchain_version`].
    pub toolchain_version: &'static str,
    /// Key/value settings in recording order.
    pub settings: &'static [(&'static str, &'static str)],
}

/// Source over metadata embedded with [`embed!`](crate::embed).
///
/// Unavailable when the `build-metadata` feature is off or the compiler version could not be
/// queried during the build.
#[derive(Debug, Clone, Copy, Default)]
pub struct EmbeddedMetadata {
    embedded: Option<StaticMetadata>,
}

impl EmbeddedMetadata {
    /// Source over the generated constants; `None` means nothing was recorded.
    pub const fn new(embedded: Option<StaticMetadata>) -> Self {
        Self { embedded }
    }
}

impl MetadataSource for EmbeddedMetadata {
    fn read_build_metadata(&self) -> Option<BuildMetadata> {
        let embedded = self.embedded?;
        Some(BuildMetadata {
            module_version: embedded.module_version.to_string(),
            toolchain_version: embedded.toolchain_version.to_string(),
            settings: embedded
                .settings
                .iter()
                .map(|(key, value)| BuildSetting::new(*key, *value))
                .collect(),
        })
    }
}
