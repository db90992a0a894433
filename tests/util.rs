use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

pub const RSA_SHA1: &str = "bd3effc9d7df69f0a94efbe19dceccebcd030d98";
pub const EC_SHA1: &str = "a55afc43980604c336785c22264f932bdaa47da6";

pub fn fixture(name: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

/// Tests that shell out to the real decoder skip themselves without it.
pub fn openssl_available() -> bool {
    let available = Command::new("openssl")
        .arg("version")
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .status()
        .map(|status| status.success())
        .unwrap_or(false);
    if !available {
        eprintln!("openssl not found on PATH, skipping");
    }
    available
}
