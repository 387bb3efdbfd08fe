//! Shared fixture loading for integration tests: clip-set JSON documents
//! addressed by short names through `fixtures/manifest.json`.

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    animations: HashMap<String, String>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

/// Names of every animation fixture in the manifest, sorted.
pub fn animation_names() -> Vec<String> {
    let mut names: Vec<String> = MANIFEST.animations.keys().cloned().collect();
    names.sort();
    names
}

/// Raw clip-set JSON for a named animation fixture.
pub fn animation_json(name: &str) -> Result<String> {
    let rel = MANIFEST
        .animations
        .get(name)
        .ok_or_else(|| anyhow!("unknown animation fixture '{name}'"))?;
    let path = fixtures_root().join(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}
