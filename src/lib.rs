//! # appinfo
//!
//! Application identity (name, version) and build provenance (compiler version, target
//! OS/architecture, commit, build date) for version endpoints, log banners and
//! diagnostics.
//!
//! Metadata is recorded for the application itself: its build script calls
//! [`build::emit`], and the application expands [`embed!`] once to define
//! `information()`. The snapshot is computed on the first call and cached for the life
//! of the process.
//!
//! ```ignore
//! // build.rs
//! fn main() {
//!     appinfo::build::emit().expect("failed to record build metadata");
//! }
//!
//! // src/main.rs
//! appinfo::embed!();
//!
//! fn main() {
//!     let info = information();
//!     assert!(std::ptr::eq(info, information()));
//! }
//! ```
//!
//! ## Build-time overrides
//! Set any of `APPINFO_NAME`, `APPINFO_VERSION`, `APPINFO_DATE`, `APPINFO_COMMIT` when
//! building. See [`provider`] for how overrides and detected values are merged.
//!
//! ## Features
//! - `build-metadata` (default): record compiler, target and git details. Without it only
//!   the overrides and the executable name are available.

pub mod build;
pub mod info;
pub mod metadata;
pub mod overrides;
pub mod provider;
pub mod version;

pub use info::{App, Build, Info};
pub use metadata::{
    BuildMetadata, BuildSetting, EmbeddedMetadata, MetadataSource, NoMetadata, StaticMetadata,
};
pub use overrides::Overrides;
pub use provider::{ExecutableNameError, InfoProvider, executable_name};
pub use version::{append_dirty, normalize_version};
