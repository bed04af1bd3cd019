//! Build script for the storefront crate.
//!
//! Fingerprints the static assets so they can be served with long cache
//! lifetimes: each file is copied to `derived/` under a content-hashed name
//! and the hash is exposed to the crate as a compile-time env var.

use std::env;
use std::fs;
use std::path::Path;

use sha2::{Digest, Sha256};

/// (source under `static/`, derived directory, file stem, extension, env var)
const ASSETS: [(&str, &str, &str, &str, &str); 2] = [
    ("css/main.css", "css/derived", "main", "css", "CSS_HASH"),
    ("js/app.js", "js/derived", "app", "js", "JS_HASH"),
];

fn main() {
    let manifest_dir =
        env::var("CARGO_MANIFEST_DIR").expect("CARGO_MANIFEST_DIR must be set by Cargo");
    let static_dir = Path::new(&manifest_dir).join("static");

    for (source, derived, stem, ext, var) in ASSETS {
        fingerprint(&static_dir, source, derived, stem, ext, var);
    }
}

/// Hash one asset and copy it to `{derived}/{stem}.{hash}.{ext}`.
///
/// A missing file leaves the env var empty so the crate still builds.
fn fingerprint(static_dir: &Path, source: &str, derived: &str, stem: &str, ext: &str, var: &str) {
    let path = static_dir.join(source);
    println!("cargo:rerun-if-changed={}", path.display());

    let content = match fs::read(&path) {
        Ok(content) => content,
        Err(e) => {
            println!("cargo:warning=Could not read {source}: {e}");
            println!("cargo:rustc-env={var}=");
            return;
        }
    };

    // First 8 hex chars of SHA-256
    let hash = format!("{:x}", Sha256::digest(&content));
    let short_hash = &hash[..8];
    println!("cargo:rustc-env={var}={short_hash}");

    let derived_dir = static_dir.join(derived);
    fs::create_dir_all(&derived_dir).expect("Failed to create derived asset directory");
    fs::copy(&path, derived_dir.join(format!("{stem}.{short_hash}.{ext}")))
        .expect("Failed to copy asset to derived directory");
}
