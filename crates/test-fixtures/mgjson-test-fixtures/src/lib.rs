use std::collections::BTreeMap;
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
    scenarios: BTreeMap<String, ScenarioEntry>,
}

/// A scenario pairs builder input (properties and streams to add) with the
/// MGJSON document expected from it.
#[derive(Debug, Deserialize)]
struct ScenarioEntry {
    input: String,
    expected: String,
}

/// Absolute path of a file under the workspace `fixtures/` directory.
fn fixture_path(rel: &str) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("../../../fixtures")
        .join(rel)
}

fn read_fixture(rel: &str) -> Result<String> {
    let path = fixture_path(rel);
    fs::read_to_string(&path).with_context(|| format!("reading scenario file {}", path.display()))
}

fn lookup(name: &str) -> Result<&'static ScenarioEntry> {
    MANIFEST
        .scenarios
        .get(name)
        .ok_or_else(|| anyhow!("unknown scenario fixture '{name}'"))
}

pub mod scenarios {
    use super::*;

    /// Scenario names in sorted order.
    pub fn keys() -> Vec<String> {
        MANIFEST.scenarios.keys().cloned().collect()
    }

    pub fn input_json(name: &str) -> Result<String> {
        read_fixture(&lookup(name)?.input)
    }

    /// Builder input deserialized into the caller's own scenario type.
    pub fn input<T: DeserializeOwned>(name: &str) -> Result<T> {
        let text = input_json(name)?;
        serde_json::from_str(&text).with_context(|| format!("scenario '{name}' input is not valid"))
    }

    /// Golden MGJSON text, exactly as stored.
    pub fn expected_json(name: &str) -> Result<String> {
        read_fixture(&lookup(name)?.expected)
    }

    pub fn expected(name: &str) -> Result<serde_json::Value> {
        let text = expected_json(name)?;
        serde_json::from_str(&text)
            .with_context(|| format!("scenario '{name}' golden document is not valid JSON"))
    }

    pub fn expected_path(name: &str) -> Result<PathBuf> {
        Ok(fixture_path(&lookup(name)?.expected))
    }
}
