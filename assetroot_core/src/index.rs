//! Asset index and release manifest documents.

use crate::error::{Error, Result};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// A content-addressed asset referenced by an index entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Lowercase hex digest of the object's content.
    pub hash: String,
    /// Size in bytes.
    #[serde(default)]
    pub size: u64,
}

impl Asset {
    pub fn new(hash: impl Into<String>, size: u64) -> Self {
        Self {
            hash: hash.into(),
            size,
        }
    }
}

/// Mapping from logical asset path to the object holding its content.
///
/// Entries iterate in document order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIndex {
    #[serde(default)]
    pub objects: IndexMap<String, Asset>,
    #[serde(default, rename = "virtual")]
    pub is_virtual: bool,
    #[serde(default)]
    pub map_to_resources: bool,
}

impl AssetIndex {
    /// Build an index from `(logical path, asset)` pairs, keeping their order.
    pub fn from_entries<I, K>(entries: I) -> Self
    where
        I: IntoIterator<Item = (K, Asset)>,
        K: Into<String>,
    {
        Self {
            objects: entries.into_iter().map(|(k, v)| (k.into(), v)).collect(),
            ..Self::default()
        }
    }

    /// Parse an index document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read and parse an index document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_json(&content).map_err(|e| Error::parse(path, e))
    }

    /// Number of entries.
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Iterate over `(logical path, asset)` pairs in document order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Asset)> {
        self.objects.iter().map(|(k, v)| (k.as_str(), v))
    }
}

/// The part of a release manifest the asset store cares about.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReleaseManifest {
    /// Release identifier.
    #[serde(default)]
    pub id: Option<String>,
    /// Identifier of the asset index this release uses.
    #[serde(default, rename = "assets")]
    pub assets_index_id: String,
}

impl ReleaseManifest {
    /// Parse a manifest document.
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Read, parse and validate a manifest document from disk.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        let manifest = Self::from_json(&content).map_err(|e| Error::parse(path, e))?;

        if manifest.assets_index_id.is_empty() {
            return Err(Error::invalid_manifest(path, "missing assets index id"));
        }

        Ok(manifest)
    }
}
