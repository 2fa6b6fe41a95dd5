//! Path resolution over an asset store root.

use crate::builder::TreeBuilder;
use crate::error::Result;
use crate::index::{Asset, AssetIndex};
use std::fs;
use std::path::{Path, PathBuf};

/// Number of leading hash characters used as the shard directory name.
pub const SHARD_PREFIX_LEN: usize = 2;

/// The directory layout of an asset store.
///
/// ```text
/// <root>/indexes/<assetsIndexId>.json
/// <root>/objects/<hash[0:2]>/<hash>
/// <root>/virtual/<assetsIndexId>/<logicalPath...>
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetStoreLayout {
    root: PathBuf,
}

impl AssetStoreLayout {
    pub fn new<P: AsRef<Path>>(root: P) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
        }
    }

    /// Get the root directory of the store.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn indexes_dir(&self) -> PathBuf {
        self.root.join("indexes")
    }

    pub fn objects_dir(&self) -> PathBuf {
        self.root.join("objects")
    }

    /// Destination of the virtual tree for an asset index.
    pub fn virtual_dir(&self, assets_index_id: &str) -> PathBuf {
        self.root.join("virtual").join(assets_index_id)
    }

    /// Get the path to an asset index document.
    ///
    /// Returns: `indexes/{assets_index_id}.json`
    ///
    /// # Panics
    ///
    /// Panics if `assets_index_id` is empty.
    pub fn index_path(&self, assets_index_id: &str) -> PathBuf {
        assert!(!assets_index_id.is_empty(), "assets index id is empty");
        self.indexes_dir().join(format!("{}.json", assets_index_id))
    }

    /// Get the path to the object holding an asset's content.
    ///
    /// Returns: `objects/{hash[0:2]}/{hash}`
    ///
    /// # Panics
    ///
    /// Panics if the hash is shorter than [`SHARD_PREFIX_LEN`].
    pub fn object_path(&self, asset: &Asset) -> PathBuf {
        let hash = asset.hash.as_str();
        let prefix = hash
            .get(..SHARD_PREFIX_LEN)
            .unwrap_or_else(|| panic!("asset hash {:?} is too short to shard", hash));
        self.objects_dir().join(prefix).join(hash)
    }

    /// Read the asset index document for `assets_index_id`.
    pub fn load_index(&self, assets_index_id: &str) -> Result<AssetIndex> {
        AssetIndex::load(&self.index_path(assets_index_id))
    }

    /// Create a builder for the virtual tree of `assets_index_id`.
    ///
    /// Creates the destination directory if it does not exist yet.
    ///
    /// # Panics
    ///
    /// Panics if `assets_index_id` is empty.
    pub fn tree_builder<'a>(
        &'a self,
        assets_index_id: &str,
        index: &'a AssetIndex,
    ) -> Result<TreeBuilder<'a>> {
        assert!(!assets_index_id.is_empty(), "assets index id is empty");
        let dest_dir = self.virtual_dir(assets_index_id);
        fs::create_dir_all(&dest_dir)?;
        Ok(TreeBuilder::new(self, index, dest_dir))
    }
}
