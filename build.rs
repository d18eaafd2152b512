//! Build script for outstanding-prs - embeds version and commit information.
//!
//! Sets two environment variables for the crate:
//!
//! - `BUILD_GIT_COMMIT`: the 12-character commit SHA, suffixed with `+dirty`
//!   when the working tree has uncommitted changes, or `unset` when git is
//!   unavailable.
//! - `BUILD_INFO_HUMAN`: `{CARGO_PKG_VERSION}-{commit} (built {date})`, used as
//!   the clap long version.

use std::process::Command;

use chrono::Utc;

fn main() {
    ["src", "build.rs", "Cargo.toml"]
        .iter()
        .for_each(|path| println!("cargo:rerun-if-changed={path}"));

    let commit = commit_id().unwrap_or_else(|| "unset".to_string());
    let built = Utc::now().format("%Y-%m-%d");
    let version = env!("CARGO_PKG_VERSION");

    println!("cargo:rustc-env=BUILD_GIT_COMMIT={commit}");
    println!("cargo:rustc-env=BUILD_INFO_HUMAN={version}-{commit} (built {built})");
}

fn git(args: &[&str]) -> Option<String> {
    Command::new("git")
        .args(args)
        .output()
        .ok()
        .filter(|output| output.status.success())
        .and_then(|output| String::from_utf8(output.stdout).ok())
        .map(|s| s.trim().to_string())
}

fn commit_id() -> Option<String> {
    let sha = git(&["rev-parse", "--short=12", "HEAD"]).filter(|s| !s.is_empty())?;

    // .cargo-ok is written by `cargo install --git` and is not a real change.
    let dirty = git(&["status", "--porcelain"]).is_some_and(|status| {
        status
            .lines()
            .any(|line| line.get(3..).is_some_and(|path| path != ".cargo-ok"))
    });

    Some(if dirty { format!("{sha}+dirty") } else { sha })
}
