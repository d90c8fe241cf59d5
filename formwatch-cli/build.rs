// Inject the build version: prefer `git describe` output, fall back to
// the crate version when git or tags are unavailable.

use std::process::Command;

fn main() {
    println!("cargo:rustc-env=FORMWATCH_VERSION={}", version());
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/tags");
}

fn version() -> String {
    let described = Command::new("git")
        .args(["describe", "--tags", "--always", "--dirty"])
        .output()
        .ok()
        .filter(|out| out.status.success())
        .and_then(|out| String::from_utf8(out.stdout).ok())
        .map(|raw| raw.trim().trim_start_matches('v').to_string())
        .filter(|v| !v.is_empty());

    described.unwrap_or_else(|| env!("CARGO_PKG_VERSION").to_string())
}
