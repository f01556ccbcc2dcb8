//! Version string rules: `v`-prefix normalization and the `+dirty` suffix.

use std::sync::OnceLock;

use regex::Regex;

/// Suffix marking a build from a modified working tree.
pub const DIRTY_SUFFIX: &str = "+dirty";

static SEMVER_TAG: OnceLock<Regex> = OnceLock::new();

fn semver_tag() -> &'static Regex {
    SEMVER_TAG.get_or_init(|| {
        Regex::new(r"^v[0-9]+\.[0-9]+\.[0-9]+").expect("version pattern must be valid")
    })
}

/// Strips the leading `v` from tag-style versions (`v1.2.3`, `v1.2.3-rc.1+meta`).
/// Anything else is returned unchanged.
pub fn normalize_version(raw: &str) -> &str {
    if semver_tag().is_match(raw) {
        &raw[1..]
    } else {
        raw
    }
}

/// Appends `+dirty` unless `version` already ends with it.
pub fn append_dirty(version: &mut String) {
    if !version.ends_with(DIRTY_SUFFIX) {
        version.push_str(DIRTY_SUFFIX);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_v_from_plain_tag() {
        assert_eq!(normalize_version("v1.2.3"), "1.2.3");
    }

    #[test]
    fn strips_v_and_keeps_prerelease_and_build_metadata() {
        assert_eq!(normalize_version("v1.2.3-rc.1+meta"), "1.2.3-rc.1+meta");
        assert_eq!(normalize_version("v10.20.30+dirty"), "10.20.30+dirty");
    }

    #[test]
    fn leaves_unprefixed_version_unchanged() {
        assert_eq!(normalize_version("1.2.3"), "1.2.3");
    }

    #[test]
    fn leaves_non_versions_unchanged() {
        assert_eq!(normalize_version("not-a-version"), "not-a-version");
        assert_eq!(normalize_version("v1.2"), "v1.2");
        assert_eq!(normalize_version("vx.y.z"), "vx.y.z");
        assert_eq!(normalize_version("(devel)"), "(devel)");
        assert_eq!(normalize_version(""), "");
    }

    #[test]
    fn non_ascii_digits_are_not_a_version() {
        let arabic_indic = "v\u{0661}.\u{0662}.\u{0663}";
        assert_eq!(normalize_version(arabic_indic), arabic_indic);
        assert_eq!(normalize_version("v\u{0661}.2.3"), "v\u{0661}.2.3");
    }

    #[test]
    fn dirty_suffix_is_appended_once() {
        let mut version = "1.2.3".to_string();
        append_dirty(&mut version);
        append_dirty(&mut version);
        assert_eq!(version, "1.2.3+dirty");
    }

    #[test]
    fn dirty_suffix_on_empty_version() {
        let mut version = String::new();
        append_dirty(&mut version);
        assert_eq!(version, "+dirty");
    }
}
