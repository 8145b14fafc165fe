//! Shared JSON fixtures for the player crates, listed in `fixtures/manifest.json`.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use once_cell::sync::Lazy;
use serde::de::DeserializeOwned;
use serde::Deserialize;

static MANIFEST: Lazy<Result<Manifest, String>> = Lazy::new(|| {
    let raw = include_str!("../../../../fixtures/manifest.json");
    serde_json::from_str(raw).map_err(|e| format!("fixtures manifest should parse: {e}"))
});

#[derive(Debug, Deserialize)]
struct Manifest {
    players: HashMap<String, String>,
    #[serde(default)]
    props: HashMap<String, String>,
}

/// One named section of the manifest.
struct Catalog {
    label: &'static str,
    section: fn(&Manifest) -> &HashMap<String, String>,
}

impl Catalog {
    fn entries(&self) -> Result<&'static HashMap<String, String>> {
        let manifest = MANIFEST.as_ref().map_err(|e| anyhow!("{e}"))?;
        Ok((self.section)(manifest))
    }

    fn keys(&self) -> Result<Vec<String>> {
        Ok(self.entries()?.keys().cloned().collect())
    }

    fn path(&self, name: &str) -> Result<PathBuf> {
        let rel = self
            .entries()?
            .get(name)
            .ok_or_else(|| anyhow!("unknown {} fixture '{name}'", self.label))?;
        Ok(Path::new(env!("CARGO_MANIFEST_DIR"))
            .join("../../../fixtures")
            .join(rel))
    }

    fn json(&self, name: &str) -> Result<String> {
        let path = self.path(name)?;
        std::fs::read_to_string(&path).with_context(|| {
            format!("reading {} fixture '{name}' at {}", self.label, path.display())
        })
    }

    fn load<T: DeserializeOwned>(&self, name: &str) -> Result<T> {
        let text = self.json(name)?;
        serde_json::from_str(&text)
            .with_context(|| format!("decoding {} fixture '{name}'", self.label))
    }
}

fn players_section(m: &Manifest) -> &HashMap<String, String> {
    &m.players
}

fn props_section(m: &Manifest) -> &HashMap<String, String> {
    &m.props
}

const PLAYERS: Catalog = Catalog {
    label: "player",
    section: players_section,
};

const PROPS: Catalog = Catalog {
    label: "props",
    section: props_section,
};

/// Player configurations (`NodePlayerConfig` JSON).
pub mod players {
    use super::*;

    pub fn keys() -> Result<Vec<String>> {
        PLAYERS.keys()
    }

    pub fn json(name: &str) -> Result<String> {
        PLAYERS.json(name)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        PLAYERS.load(name)
    }

    pub fn path(name: &str) -> Result<PathBuf> {
        PLAYERS.path(name)
    }
}

/// Full constructor props (`{ currentAddress?, config }`).
pub mod props {
    use super::*;

    pub fn keys() -> Result<Vec<String>> {
        PROPS.keys()
    }

    pub fn json(name: &str) -> Result<String> {
        PROPS.json(name)
    }

    pub fn load<T: DeserializeOwned>(name: &str) -> Result<T> {
        PROPS.load(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_manifest_entry_exists() {
        for key in players::keys().unwrap() {
            assert!(players::path(&key).unwrap().is_file(), "missing player '{key}'");
            let _: serde_json::Value = players::load(&key).unwrap();
        }
        for key in props::keys().unwrap() {
            let _: serde_json::Value = props::load(&key).unwrap();
        }
    }

    #[test]
    fn unknown_fixture_is_an_error() {
        let err = players::json("nope").unwrap_err();
        assert!(err.to_string().contains("unknown player fixture 'nope'"));
        assert!(props::json("nope").is_err());
    }
}
