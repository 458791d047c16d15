// SPDX-License-Identifier: GPL-3.0-only

use std::process::Command;

fn main() {
    println!("cargo::rerun-if-changed=.git/HEAD");
    println!("cargo::rerun-if-changed=.git/refs/tags");
    println!("cargo::rerun-if-env-changed=SNAPCAM_VERSION");

    // Packaging (flatpak, distro builds) pins the version explicitly
    let version = match std::env::var("SNAPCAM_VERSION") {
        Ok(v) => v,
        Err(_) => describe_version(),
    };

    println!("cargo::rustc-env=GIT_VERSION={}", version);
}

/// Version string derived from git.
///
/// - tag `v0.1.0` at HEAD: `0.1.0-abcdef1`
/// - five commits after `v0.1.0`: `0.1.0-dirty-abcdef1`
/// - no tags or no git: the package version with the commit hash if known
fn describe_version() -> String {
    let commit = git(&["rev-parse", "--short", "HEAD"]);

    let Some(described) = git(&["describe", "--tags", "--match", "v*"]) else {
        let pkg = env!("CARGO_PKG_VERSION");
        return match commit {
            Some(hash) => format!("{}-{}", pkg, hash),
            None => pkg.to_string(),
        };
    };

    let described = described.strip_prefix('v').unwrap_or(&described).to_string();
    let commit = commit.unwrap_or_else(|| "unknown".to_string());

    // "<tag>-<count>-g<hash>" means HEAD is past the tag
    let parts: Vec<&str> = described.rsplitn(3, '-').collect();
    if parts.len() == 3 && parts[0].starts_with('g') {
        format!("{}-dirty-{}", parts[2], &parts[0][1..])
    } else {
        format!("{}-{}", described, commit)
    }
}

fn git(args: &[&str]) -> Option<String> {
    let output = Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
    if text.is_empty() { None } else { Some(text) }
}
