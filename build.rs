//! Build script: writes the metadata file that this crate's integration tests embed.
//!
//! The tests play the part of an application, with fixed overrides and no git lookups so
//! their expectations do not depend on the checkout.

#[path = "src/build.rs"]
#[allow(dead_code)]
mod build;

fn main() {
    let mut build_env =
        build::BuildEnv::from_cargo().unwrap_or_else(|e| panic!("appinfo build script: {}", e));
    build_env.git = false;
    build_env.name = String::new();
    build_env.version = "9.9.9".to_string();
    build_env.date = "2026-01-02T03:04:05Z".to_string();
    build_env.commit = "feedface".to_string();

    build::emit_with(&build_env).unwrap_or_else(|e| panic!("appinfo build script: {}", e));
}
