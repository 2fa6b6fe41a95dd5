//! Virtual tree materialization.

use crate::error::{Error, Result};
use crate::index::AssetIndex;
use crate::layout::AssetStoreLayout;
use crate::messages::{Messages, StatusMessage, keys};
use crate::progress::{INDETERMINATE, ProgressObservable};
use std::fs;
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tracing::{debug, info, warn};

/// Materializes one file per index entry under a destination directory.
///
/// Files that already exist are kept as they are; missing ones are copied
/// from the store. Progress can be polled from another thread while
/// [`TreeBuilder::build`] runs.
#[derive(Debug)]
pub struct TreeBuilder<'a> {
    layout: &'a AssetStoreLayout,
    index: &'a AssetIndex,
    dest_dir: PathBuf,
    total: usize,
    processed: AtomicUsize,
    copied: AtomicUsize,
    cancel: Option<Arc<AtomicBool>>,
}

impl<'a> TreeBuilder<'a> {
    /// Create a builder. The destination directory must already exist.
    pub(crate) fn new(
        layout: &'a AssetStoreLayout,
        index: &'a AssetIndex,
        dest_dir: PathBuf,
    ) -> Self {
        Self {
            layout,
            index,
            dest_dir,
            total: index.len(),
            processed: AtomicUsize::new(0),
            copied: AtomicUsize::new(0),
            cancel: None,
        }
    }

    /// Stop the build between entries once `flag` is set.
    pub fn with_cancel_flag(mut self, flag: Arc<AtomicBool>) -> Self {
        self.cancel = Some(flag);
        self
    }

    /// Directory the virtual tree is materialized into.
    pub fn dest_dir(&self) -> &Path {
        &self.dest_dir
    }

    /// Number of index entries, fixed at construction.
    pub fn total(&self) -> usize {
        self.total
    }

    /// Number of entries handled so far in the current build.
    pub fn processed(&self) -> usize {
        self.processed.load(Ordering::Relaxed)
    }

    /// Number of files copied by the current (or last) build.
    pub fn copied(&self) -> usize {
        self.copied.load(Ordering::Relaxed)
    }

    /// Materialize the virtual tree and return its directory.
    ///
    /// Aborts on the first entry whose object is missing from the store.
    /// Entries handled before that stay in place, so calling `build` again
    /// after the store has been repaired picks up where this one stopped.
    pub fn build(&self) -> Result<PathBuf> {
        info!(
            dest = %self.dest_dir.display(),
            entries = self.total,
            "Building asset virtual tree"
        );

        self.processed.store(0, Ordering::Relaxed);
        self.copied.store(0, Ordering::Relaxed);

        for (logical_path, asset) in self.index.iter() {
            if self.is_cancelled() {
                info!(processed = self.processed(), "Virtual tree build cancelled");
                return Err(Error::Cancelled);
            }

            let object_path = self.layout.object_path(asset);
            let virtual_path = self.virtual_path(logical_path);

            if let Some(parent) = virtual_path.parent() {
                fs::create_dir_all(parent)?;
            }

            if virtual_path.try_exists()? {
                debug!(path = %virtual_path.display(), "Reusing existing file");
            } else {
                if !object_path.try_exists()? {
                    let missing = std::path::absolute(&object_path)?;
                    warn!(
                        object = %missing.display(),
                        asset = logical_path,
                        "Missing object"
                    );
                    return Err(Error::missing_object(missing));
                }

                info!(
                    from = %object_path.display(),
                    to = %virtual_path.display(),
                    "Copying object"
                );
                copy_object(&object_path, &virtual_path)?;
                self.copied.fetch_add(1, Ordering::Relaxed);
            }

            self.processed.fetch_add(1, Ordering::Relaxed);
        }

        Ok(self.dest_dir.clone())
    }

    /// The current status, unformatted.
    pub fn status_message(&self) -> StatusMessage {
        let key = if self.total == 0 {
            keys::EXPANDING_NONE
        } else {
            keys::EXPANDING
        };

        StatusMessage {
            key,
            total: self.total,
            remaining: self.total.saturating_sub(self.processed()),
        }
    }

    /// Resolve a logical path under the destination directory.
    ///
    /// Only normal components are kept, so root, prefix and `..` parts of a
    /// key can never reach outside the tree.
    fn virtual_path(&self, logical_path: &str) -> PathBuf {
        let mut path = self.dest_dir.clone();
        path.extend(
            Path::new(logical_path)
                .components()
                .filter_map(|component| match component {
                    Component::Normal(part) => Some(part),
                    _ => None,
                }),
        );
        path
    }

    fn is_cancelled(&self) -> bool {
        self.cancel
            .as_ref()
            .is_some_and(|flag| flag.load(Ordering::Relaxed))
    }
}

impl ProgressObservable for TreeBuilder<'_> {
    fn fraction_complete(&self) -> f64 {
        if self.total == 0 {
            INDETERMINATE
        } else {
            self.processed() as f64 / self.total as f64
        }
    }

    fn status_description(&self, messages: &dyn Messages) -> String {
        self.status_message().render(messages)
    }
}

/// Copy an object into the tree through a temporary file.
///
/// The destination only appears once it holds the full content.
fn copy_object(src: &Path, dest: &Path) -> Result<()> {
    let temp_dir = dest.parent().unwrap_or_else(|| Path::new("."));
    let mut source = fs::File::open(src)?;
    let mut temp_file = tempfile::NamedTempFile::new_in(temp_dir)?;

    io::copy(&mut source, temp_file.as_file_mut())?;
    temp_file.as_file().sync_all()?;
    fs::set_permissions(temp_file.path(), source.metadata()?.permissions())?;

    temp_file.persist(dest)?;

    Ok(())
}
