use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Manifest> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).expect("fixtures manifest should parse")
});

#[derive(Debug, Deserialize)]
struct Manifest {
    shapes: HashMap<String, String>,
    playbacks: HashMap<String, String>,
}

#[derive(Debug, Deserialize)]
struct ShapeFile {
    points: Vec<[f64; 3]>,
}

fn fixtures_root() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../../../fixtures")
}

fn resolve_path(rel: &str) -> PathBuf {
    fixtures_root().join(rel)
}

fn read_to_string(rel: &str) -> Result<String> {
    let path = resolve_path(rel);
    fs::read_to_string(&path)
        .with_context(|| format!("failed to read fixture at {}", path.display()))
}

fn load_json<T: DeserializeOwned>(rel: &str) -> Result<T> {
    let text = read_to_string(rel)?;
    serde_json::from_str(&text).with_context(|| format!("failed to parse JSON fixture {rel}"))
}

fn lookup<'a>(map: &'a HashMap<String, String>, kind: &str, name: &str) -> Result<&'a str> {
    map.get(name)
        .map(String::as_str)
        .ok_or_else(|| anyhow!("unknown {kind} fixture '{name}'"))
}

/// Point clouds stored as `{ "points": [[x, y, z], ...] }`.
pub mod shapes {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.shapes.keys().cloned().collect()
    }

    pub fn points(name: &str) -> Result<Vec<[f64; 3]>> {
        let rel = lookup(&MANIFEST.shapes, "shape", name)?;
        let file: ShapeFile = super::load_json(rel)?;
        Ok(file.points)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        let rel = lookup(&MANIFEST.shapes, "shape", name)?;
        Ok(resolve_path(rel))
    }
}

/// Playback settings documents.
pub mod playbacks {
    use super::*;

    pub fn keys() -> Vec<String> {
        MANIFEST.playbacks.keys().cloned().collect()
    }

    pub fn json(name: &str) -> Result<String> {
        let rel = lookup(&MANIFEST.playbacks, "playback", name)?;
        read_to_string(rel)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        let rel = lookup(&MANIFEST.playbacks, "playback", name)?;
        super::load_json(rel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_resolves() {
        for key in shapes::keys() {
            let points = shapes::points(&key).unwrap();
            assert!(!points.is_empty(), "shape {key} is empty");
        }
        for key in playbacks::keys() {
            let value: serde_json::Value = playbacks::load(&key).unwrap();
            assert!(value.is_object(), "playback {key} is not an object");
        }
    }

    #[test]
    fn unknown_names_error() {
        assert!(shapes::points("missing").is_err());
        assert!(playbacks::json("missing").is_err());
    }
}
