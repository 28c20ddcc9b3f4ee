use std::process::Command;

/// Run a git subcommand, returning its trimmed stdout on success.
fn git(args: &[&str]) -> Option<String> {
    let out = Command::new("git").args(args).output().ok()?;
    out.status
        .success()
        .then(|| String::from_utf8_lossy(&out.stdout).trim().to_string())
}

fn main() {
    println!("cargo:rerun-if-changed=.git/HEAD");
    println!("cargo:rerun-if-changed=.git/refs/");
    println!("cargo:rerun-if-changed=assets/frame.png");

    // Tagged builds report the bare package version; anything else is marked
    // as a development build with the commit it came from, when known.
    let pkg = std::env::var("CARGO_PKG_VERSION").unwrap_or_default();
    let tagged = git(&["describe", "--exact-match", "--tags", "HEAD"]).is_some();
    let version = match git(&["rev-parse", "--short", "HEAD"]) {
        _ if tagged => pkg,
        Some(commit) if !commit.is_empty() => format!("{pkg}-dev+{commit}"),
        _ => format!("{pkg}-dev"),
    };

    println!("cargo:rustc-env=JEWELCASE_VERSION={version}");
}
