//! Build-script side: records overrides and toolchain/git metadata for the package being
//! built.
//!
//! Cargo resolves `CARGO_PKG_VERSION`, `CARGO_MANIFEST_DIR` and friends per package, so the
//! collection has to run in the application's own build script:
//!
//! ```ignore
//! // build.rs of the application
//! fn main() {
//!     appinfo::build::emit().expect("failed to record build metadata");
//! }
//! ```
//!
//! The application then expands [`embed!`](crate::embed) once to get its `information()`.
//!
//! Overrides are read from `APPINFO_NAME`, `APPINFO_VERSION`, `APPINFO_DATE` and
//! `APPINFO_COMMIT` (empty when unset). `APPINFO_GIT_METADATA=0` or `false` skips git.
//! Nothing here aborts the build when a tool is missing; absent pieces are left out.

use std::env;
use std::io;
use std::path::{Path, PathBuf};
use std::process::Command;

use thiserror::Error;

/// Name of the file written into `OUT_DIR`.
pub const GENERATED_FILE: &str = "appinfo.rs";

const OVERRIDE_VARS: [&str; 4] = [
    "APPINFO_NAME",
    "APPINFO_VERSION",
    "APPINFO_DATE",
    "APPINFO_COMMIT",
];

const GIT_SWITCH_VAR: &str = "APPINFO_GIT_METADATA";

/// Errors when recording build metadata.
#[derive(Debug, Error)]
pub enum BuildError {
    #[error("{0} is not set; emit() must be called from a Cargo build script")]
    MissingVar(&'static str),

    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

/// Inputs of one build, normally taken from the Cargo build-script environment.
#[derive(Debug, Clone, Default)]
pub struct BuildEnv {
    /// Directory of the package being built; git is queried here.
    pub manifest_dir: PathBuf,
    /// Where the generated file is written.
    pub out_dir: PathBuf,
    /// `CARGO_PKG_VERSION` of the package being built.
    pub package_version: String,
    /// Compiler to query for its version.
    pub rustc: String,
    /// Cargo profile, e.g. `release`.
    pub profile: String,
    /// Target triple.
    pub target: String,
    /// `CARGO_CFG_TARGET_OS`.
    pub target_os: String,
    /// `CARGO_CFG_TARGET_ARCH`.
    pub target_arch: String,
    /// Probe git for revision, commit time, modified flag and an exact tag.
    pub git: bool,
    /// Record toolchain metadata at all. When false only the overrides are embedded.
    pub metadata: bool,
    /// `APPINFO_NAME` override.
    pub name: String,
    /// `APPINFO_VERSION` override.
    pub version: String,
    /// `APPINFO_DATE` override.
    pub date: String,
    /// `APPINFO_COMMIT` override.
    pub commit: String,
}

impl BuildEnv {
    /// Reads the environment Cargo gives a build script.
    pub fn from_cargo() -> Result<Self, BuildError> {
        let required = |var: &'static str| env::var(var).map_err(|_| BuildError::MissingVar(var));
        let optional = |var: &str| env::var(var).unwrap_or_default().trim().to_string();

        Ok(Self {
            manifest_dir: PathBuf::from(required("CARGO_MANIFEST_DIR")?),
            out_dir: PathBuf::from(required("OUT_DIR")?),
            package_version: optional("CARGO_PKG_VERSION"),
            rustc: env::var("RUSTC").unwrap_or_else(|_| "rustc".to_string()),
            profile: optional("PROFILE"),
            target: optional("TARGET"),
            target_os: optional("CARGO_CFG_TARGET_OS"),
            target_arch: optional("CARGO_CFG_TARGET_ARCH"),
            git: !env::var(GIT_SWITCH_VAR)
                .map(|s| s == "0" || s.eq_ignore_ascii_case("false"))
                .unwrap_or(false),
            metadata: cfg!(feature = "build-metadata"),
            name: optional(OVERRIDE_VARS[0]),
            version: optional(OVERRIDE_VARS[1]),
            date: optional(OVERRIDE_VARS[2]),
            commit: optional(OVERRIDE_VARS[3]),
        })
    }
}

/// Toolchain metadata gathered for one build.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Collected {
    pub module_version: String,
    pub toolchain_version: String,
    pub settings: Vec<(&'static str, String)>,
    /// Files whose change should rerun the build script.
    pub watch: Vec<PathBuf>,
}

impl Collected {
    /// Value of the last setting with the given key.
    pub fn setting(&self, key: &str) -> Option<&str> {
        self.settings
            .iter()
            .rev()
            .find(|(k, _)| *k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// Records metadata for the package whose build script is running.
pub fn emit() -> Result<(), BuildError> {
    emit_with(&BuildEnv::from_cargo()?)
}

/// Writes `$OUT_DIR/appinfo.rs` for `build_env` and prints the Cargo rerun directives.
pub fn emit_with(build_env: &BuildEnv) -> Result<(), BuildError> {
    for var in OVERRIDE_VARS.into_iter().chain([GIT_SWITCH_VAR]) {
        println!("cargo:rerun-if-env-changed={}", var);
    }

    let collected = collect(build_env);
    if let Some(c) = &collected {
        for path in &c.watch {
            println!("cargo:rerun-if-changed={}", path.display());
        }
    }

    let path = build_env.out_dir.join(GENERATED_FILE);
    std::fs::write(&path, render(build_env, collected.as_ref()))
        .map_err(|source| BuildError::Write { path, source })
}

/// `None` when metadata is disabled or the compiler version cannot be queried.
pub fn collect(build_env: &BuildEnv) -> Option<Collected> {
    if !build_env.metadata {
        return None;
    }
    let toolchain_version = command_stdout(
        Command::new(&build_env.rustc).arg("--version"),
        &build_env.manifest_dir,
    )?;
    Some(collect_with_toolchain(build_env, toolchain_version))
}

/// Gathers git and target settings given an already known compiler version.
pub fn collect_with_toolchain(build_env: &BuildEnv, toolchain_version: String) -> Collected {
    let root = build_env.manifest_dir.as_path();
    let mut collected = Collected {
        toolchain_version,
        ..Default::default()
    };

    if build_env.git
        && let Some(git_dir) = git_dir(root)
    {
        collected.watch = vec![git_dir.join("HEAD"), git_dir.join("index"), root.join("src")];

        collected.settings.push(("vcs", "git".to_string()));
        if let Some(revision) = git(&["rev-parse", "HEAD"], root) {
            collected.settings.push(("vcs.revision", revision));
        }
        if let Some(time) = git_commit_time(root) {
            collected.settings.push(("vcs.time", time));
        }
        if let Some(status) = git_raw(&["status", "--porcelain"], root) {
            let modified = !status.trim().is_empty();
            collected.settings.push(("vcs.modified", modified.to_string()));
        }
        if let Some(tag) = git(&["describe", "--tags", "--exact-match", "HEAD"], root) {
            collected.module_version = tag;
        }
    }

    for (key, value) in [
        ("profile", &build_env.profile),
        ("target", &build_env.target),
        ("target_os", &build_env.target_os),
        ("target_arch", &build_env.target_arch),
    ] {
        if !value.is_empty() {
            collected.settings.push((key, value.clone()));
        }
    }

    if collected.module_version.is_empty() {
        collected.module_version = build_env.package_version.clone();
    }
    collected
}

/// Source of the generated file. Items are expected to be included inside a module that
/// has `StaticMetadata` in scope, as [`embed!`](crate::embed) does.
pub fn render(build_env: &BuildEnv, collected: Option<&Collected>) -> String {
    let mut out = String::from("// @generated by appinfo::build\n");
    for (item, value) in [
        ("NAME", &build_env.name),
        ("VERSION", &build_env.version),
        ("DATE", &build_env.date),
        ("COMMIT", &build_env.commit),
    ] {
        out.push_str(&format!("pub(super) const {}: &str = {:?};\n", item, value));
    }

    let Some(c) = collected else {
        out.push_str("pub(super) const METADATA: Option<StaticMetadata> = None;\n");
        return out;
    };
    out.push_str("pub(super) const METADATA: Option<StaticMetadata> = Some(StaticMetadata {\n");
    out.push_str(&format!("    module_version: {:?},\n", c.module_version));
    out.push_str(&format!("    toolchain_version: {:?},\n", c.toolchain_version));
    out.push_str("    settings: &[\n");
    for (key, value) in &c.settings {
        out.push_str(&format!("        ({:?}, {:?}),\n", key, value));
    }
    out.push_str("    ],\n});\n");
    out
}

fn git_dir(root: &Path) -> Option<PathBuf> {
    let dir = PathBuf::from(git(&["rev-parse", "--absolute-git-dir"], root)?);
    dir.is_dir().then_some(dir)
}

/// Commit time of `HEAD` in UTC, RFC 3339 with a `Z` suffix.
fn git_commit_time(root: &Path) -> Option<String> {
    let mut cmd = Command::new("git");
    cmd.args([
        "log",
        "-1",
        "--format=%cd",
        "--date=format-local:%Y-%m-%dT%H:%M:%SZ",
    ])
    .env("TZ", "UTC");
    command_stdout(&mut cmd, root)
}

fn git(args: &[&str], root: &Path) -> Option<String> {
    command_stdout(Command::new("git").args(args), root)
}

fn git_raw(args: &[&str], root: &Path) -> Option<String> {
    Command::new("git")
        .args(args)
        .current_dir(root)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).into_owned())
}

/// Trimmed stdout of a successful command; `None` on spawn failure, non-zero exit or empty output.
fn command_stdout(cmd: &mut Command, root: &Path) -> Option<String> {
    cmd.current_dir(root)
        .output()
        .ok()
        .filter(|o| o.status.success())
        .map(|o| String::from_utf8_lossy(&o.stdout).trim().to_string())
        .filter(|s| !s.is_empty())
}
