//! Lazily computed, process-wide information snapshot.
//!
//! The snapshot merges build-time [`Overrides`] with what a [`MetadataSource`] reports:
//!
//! | field   | winner                                              |
//! |---------|-----------------------------------------------------|
//! | name    | override, else executable file name                 |
//! | version | module version (normalized), else override          |
//! | date    | override, else `vcs.time`                           |
//! | commit  | override, else `vcs.revision`                       |
//! | os/arch | `target_os` / `target_arch` settings                |
//!
//! `+dirty` is appended to the version whenever `vcs.modified` is `true`.
//!
//! Applications get their process-wide `information()` from [`embed!`](crate::embed).

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use thiserror::Error;

use crate::info::{App, Build, Info};
use crate::metadata::{self, BuildMetadata, EmbeddedMetadata, MetadataSource};
use crate::overrides::Overrides;
use crate::version::{append_dirty, normalize_version};

/// Errors when resolving the running executable's file name.
#[derive(Debug, Error)]
pub enum ExecutableNameError {
    #[error("cannot locate current executable: {0}")]
    Lookup(#[from] std::io::Error),

    #[error("executable path {} has no file name", .0.display())]
    NoFileName(PathBuf),

    #[error("executable file name in {} is not valid UTF-8", .0.display())]
    NonUtf8(PathBuf),
}

/// File name of the running executable, including any platform suffix such as `.exe`.
pub fn executable_name() -> Result<String, ExecutableNameError> {
    let path = std::env::current_exe()?;
    file_name(&path)
}

fn file_name(path: &Path) -> Result<String, ExecutableNameError> {
    let name = path
        .file_name()
        .ok_or_else(|| ExecutableNameError::NoFileName(path.to_path_buf()))?;
    name.to_str()
        .map(str::to_string)
        .ok_or_else(|| ExecutableNameError::NonUtf8(path.to_path_buf()))
}

/// Computes the snapshot once and hands out the cached value afterwards.
///
/// Concurrent first callers block until the single computation has finished.
#[derive(Debug)]
pub struct InfoProvider<S = EmbeddedMetadata> {
    overrides: Overrides,
    source: S,
    info: OnceLock<Info>,
}

impl<S: MetadataSource> InfoProvider<S> {
    pub fn new(overrides: Overrides, source: S) -> Self {
        Self {
            overrides,
            source,
            info: OnceLock::new(),
        }
    }

    /// The snapshot, computed on first call.
    pub fn information(&self) -> &Info {
        self.info.get_or_init(|| {
            let info = compute(&self.overrides, self.source.read_build_metadata());
            log::debug!(
                "Application info computed: name={:?} version={:?}",
                info.app.name,
                info.app.version
            );
            info
        })
    }
}

/// Defines `information() -> &'static appinfo::Info` in the calling module.
///
/// Reads the file written by [`build::emit`](crate::build::emit) in the caller's build
/// script, so the snapshot describes the calling package rather than this crate. Expand it
/// once per binary; the snapshot is computed on the first call and shared afterwards.
///
/// ```ignore
/// appinfo::embed!();
///
/// fn main() {
///     let info = information();
///     println!("{} {}", info.app.name, info.app.version);
/// }
/// ```
#[macro_export]
macro_rules! embed {
    () => {
        #[doc(hidden)]
        #[allow(dead_code)]
        mod __appinfo_embedded {
            use $crate::metadata::StaticMetadata;

            include!(concat!(env!("OUT_DIR"), "/appinfo.rs"));
        }

        /// Application identity and build provenance for this binary.
        pub fn information() -> &'static $crate::Info {
            static PROVIDER: ::std::sync::LazyLock<$crate::InfoProvider> =
                ::std::sync::LazyLock::new(|| {
                    $crate::InfoProvider::new(
                        $crate::Overrides::new(
                            __appinfo_embedded::NAME,
                            __appinfo_embedded::VERSION,
                            __appinfo_embedded::DATE,
                            __appinfo_embedded::COMMIT,
                        ),
                        $crate::EmbeddedMetadata::new(__appinfo_embedded::METADATA),
                    )
                });
            PROVIDER.information()
        }
    };
}

fn resolve_name(name_override: &str) -> String {
    if !name_override.is_empty() {
        return name_override.to_string();
    }
    executable_name().unwrap_or_else(|e| {
        log::warn!("Application name unavailable: {}", e);
        String::new()
    })
}

fn compute(overrides: &Overrides, meta: Option<BuildMetadata>) -> Info {
    let mut info = Info {
        app: App {
            name: resolve_name(&overrides.name),
            version: overrides.version.clone(),
        },
        build: Build {
            date: overrides.date.clone(),
            commit: overrides.commit.clone(),
            ..Default::default()
        },
    };

    let Some(meta) = meta else {
        log::debug!("No build metadata embedded; using overrides only");
        return info;
    };

    info.build.toolchain = meta
        .toolchain_version
        .strip_prefix(metadata::TOOLCHAIN_PREFIX)
        .unwrap_or(&meta.toolchain_version)
        .to_string();

    if !meta.module_version.is_empty() {
        let version = normalize_version(&meta.module_version);
        if !info.app.version.is_empty() && info.app.version != version {
            log::debug!(
                "Version override {:?} replaced by module version {:?}",
                info.app.version,
                version
            );
        }
        info.app.version = version.to_string();
    }

    for setting in &meta.settings {
        match setting.key.as_str() {
            metadata::VCS_TIME => {
                if info.build.date.is_empty() {
                    info.build.date = setting.value.clone();
                }
            }
            metadata::VCS_REVISION => {
                if info.build.commit.is_empty() {
                    info.build.commit = setting.value.clone();
                }
            }
            metadata::VCS_MODIFIED => {
                if setting.value == "true" {
                    append_dirty(&mut info.app.version);
                }
            }
            metadata::TARGET_OS => info.build.os = setting.value.clone(),
            metadata::TARGET_ARCH => info.build.arch = setting.value.clone(),
            _ => {}
        }
    }

    info
}
