//! # assetroot Core
//!
//! Layout of a content-addressed asset store, and materialization of the
//! "virtual tree" of logically-named files a release's asset index
//! describes.
//!
//! ## Features
//!
//! - Store layout: index documents, hash-sharded objects, virtual trees
//! - Idempotent, resumable virtual tree builds
//! - Progress that can be polled while a build runs
//! - Missing objects reported with their absolute path
//! - No display prose in the library; messages go through [`Messages`]
//!
//! ## Example
//!
//! ```no_run
//! use assetroot_core::{AssetStoreLayout, ProgressObservable, ReleaseManifest};
//! use std::path::Path;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let manifest = ReleaseManifest::load(Path::new("./versions/1.7.10.json"))?;
//! let layout = AssetStoreLayout::new("./assets");
//!
//! // Load the asset index the release refers to
//! let index = layout.load_index(&manifest.assets_index_id)?;
//!
//! // Materialize the virtual tree
//! let builder = layout.tree_builder(&manifest.assets_index_id, &index)?;
//! let dest = builder.build()?;
//! println!("Built {} ({:.0}%)", dest.display(), builder.fraction_complete() * 100.0);
//! # Ok(())
//! # }
//! ```

mod builder;
mod error;
mod index;
mod layout;
mod messages;
mod progress;

pub use builder::TreeBuilder;
pub use error::{Error, Result};
pub use index::{Asset, AssetIndex, ReleaseManifest};
pub use layout::{AssetStoreLayout, SHARD_PREFIX_LEN};
pub use messages::{MessageArg, Messages, StatusMessage, keys};
pub use progress::{INDETERMINATE, ProgressObservable};
