use std::{env, fs, path::PathBuf};

/// Runs git and returns its trimmed stdout, or `None` when git is missing or fails, for example
/// when building from a source tarball.
fn git<'a, I: IntoIterator<Item = &'a str>>(args: I) -> Option<String> {
    let output = std::process::Command::new("git").args(args).output().ok()?;
    if !output.status.success() {
        return None;
    }
    String::from_utf8(output.stdout)
        .ok()
        .map(|stdout| stdout.trim().to_owned())
}

fn main() {
    println!("cargo:rerun-if-env-changed=TRACKER_IMAGE_RELEASE");

    let doing_release = env::var("TRACKER_IMAGE_RELEASE")
        .map(|env| matches!(env.as_str(), "1" | "true"))
        .unwrap_or_default();

    let mut version = env!("CARGO_PKG_VERSION").to_owned();
    if !doing_release {
        if let Some(commit_hash) = git(["rev-parse", "--short", "HEAD"]) {
            version.push('+');
            version.push_str(&commit_hash);
            if git(["status", "--porcelain"]).is_some_and(|status| !status.is_empty()) {
                version.push_str(".dirty");
            }
        }
    }

    let out_dir = PathBuf::from(env::var_os("OUT_DIR").expect("cargo sets OUT_DIR"));
    fs::write(
        out_dir.join("version.rs"),
        format!("pub const VERSION: &str = {version:?};"),
    )
    .expect("unable to write version.rs");
}
