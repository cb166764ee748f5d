//! Build script: embeds the git short hash for the version string.

use std::process::Command;

fn main() {
    let version = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let mut display_version = version.clone();

    if let Ok(output) = Command::new("git")
        .args(["rev-parse", "--short=7", "HEAD"])
        .output()
        && output.status.success()
    {
        let hash = String::from_utf8_lossy(&output.stdout).trim().to_string();
        if !hash.is_empty() {
            display_version = format!("{}+{}", version, hash);
        }
        println!("cargo:rustc-env=GIT_HASH={}", hash);
    }
    println!("cargo:rustc-env=INTERVIEW_TTS_VERSION={}", display_version);
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/heads/");
}
