//! Build-time overrides for the application name, version, build date and commit.
//!
//! Set `APPINFO_NAME`, `APPINFO_VERSION`, `APPINFO_DATE` or `APPINFO_COMMIT` in the
//! environment of `cargo build`; [`build::emit`](crate::build::emit) records them for the
//! application. Unset means empty.

/// Values that take precedence over detected ones. An empty string means "not set".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Overrides {
    pub name: String,
    pub version: String,
    pub date: String,
    pub commit: String,
}

impl Overrides {
    pub fn new(name: &str, version: &str, date: &str, commit: &str) -> Self {
        Self {
            name: name.to_string(),
            version: version.to_string(),
            date: date.to_string(),
            commit: commit.to_string(),
        }
    }
}
