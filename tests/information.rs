//! Integration tests for the process-wide snapshot, acting as an application that embeds
//! its metadata. The build script records overrides version `9.9.9`, date
//! `2026-01-02T03:04:05Z` and commit `feedface`, with git lookups off.

use std::sync::{Arc, Barrier};

appinfo::embed!();

#[test]
fn name_is_the_executable_file_name() {
    let exe = appinfo::executable_name().expect("test binary has a file name");
    assert_eq!(information().app.name, exe);
    assert!(information().app.name.starts_with("information"));
}

#[cfg(feature = "build-metadata")]
#[test]
fn package_version_wins_over_version_override() {
    assert_eq!(information().app.version, "0.1.0");
    assert!(!information().is_dirty());
}

#[cfg(not(feature = "build-metadata"))]
#[test]
fn version_override_used_without_metadata() {
    assert_eq!(information().app.version, "9.9.9");
}

#[test]
fn date_and_commit_come_from_overrides() {
    let info = information();
    assert_eq!(info.build.date, "2026-01-02T03:04:05Z");
    assert_eq!(info.build.commit, "feedface");
}

#[cfg(feature = "build-metadata")]
#[test]
fn build_fields_describe_this_build() {
    let info = information();
    assert!(!info.build.toolchain.is_empty());
    assert!(!info.build.toolchain.starts_with("rustc "));
    assert_eq!(info.build.os, std::env::consts::OS);
    assert_eq!(info.build.arch, std::env::consts::ARCH);
}

#[cfg(not(feature = "build-metadata"))]
#[test]
fn build_fields_empty_without_metadata() {
    let info = information();
    assert!(info.build.toolchain.is_empty());
    assert!(info.build.os.is_empty());
    assert!(info.build.arch.is_empty());
}

#[test]
fn concurrent_callers_see_the_same_snapshot() {
    const THREADS: usize = 50;
    let barrier = Arc::new(Barrier::new(THREADS));

    let addresses: Vec<usize> = (0..THREADS)
        .map(|_| {
            let barrier = Arc::clone(&barrier);
            std::thread::spawn(move || {
                barrier.wait();
                information() as *const _ as usize
            })
        })
        .collect::<Vec<_>>()
        .into_iter()
        .map(|h| h.join().expect("thread panicked"))
        .collect();

    assert!(addresses.iter().all(|a| *a == addresses[0]));
    assert_eq!(addresses[0], information() as *const _ as usize);
}

#[test]
fn snapshot_serializes_to_json() {
    let value = serde_json::to_value(information()).expect("serializable");
    assert_eq!(value["build"]["commit"], "feedface");
    assert_eq!(value["build"]["date"], "2026-01-02T03:04:05Z");
    let build = value["build"].as_object().expect("build object");
    for key in ["toolchain", "arch", "os"] {
        assert!(build.contains_key(key), "missing build.{}", key);
    }
    assert!(value["app"]["name"].is_string());
    assert!(value["app"]["version"].is_string());
}
