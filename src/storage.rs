//! Blob storage for product images.

use std::io;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;
use uuid::Uuid;

/// Directory, relative to the storage root, that holds product images.
pub const PRODUCT_IMAGE_DIR: &str = "products";

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage io error: {0}")]
    Io(#[from] io::Error),
    /// The path would resolve outside the storage root.
    #[error("invalid storage path `{0}`")]
    InvalidPath(String),
}

/// Place where uploaded images are kept. Paths handed out by [`put`] are
/// relative and are what gets persisted on the product row.
///
/// [`put`]: ImageStore::put
#[cfg_attr(test, mockall::automock)]
pub trait ImageStore {
    /// Store `bytes` under a fresh name with the given extension.
    fn put(&self, bytes: &[u8], extension: &str) -> StorageResult<String>;
    /// Remove a stored blob. Deleting a missing blob succeeds.
    fn delete(&self, path: &str) -> StorageResult<()>;
}

/// [`ImageStore`] backed by a directory on the local disk.
#[derive(Debug, Clone)]
pub struct LocalImageStore {
    root: PathBuf,
}

impl LocalImageStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(path);
        let safe = !path.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !safe {
            return Err(StorageError::InvalidPath(path.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ImageStore for LocalImageStore {
    fn put(&self, bytes: &[u8], extension: &str) -> StorageResult<String> {
        if extension.is_empty() || !extension.chars().all(|ch| ch.is_ascii_alphanumeric()) {
            return Err(StorageError::InvalidPath(extension.to_string()));
        }

        let relative = format!("{PRODUCT_IMAGE_DIR}/{}.{extension}", Uuid::new_v4());
        let target = self.resolve(&relative)?;
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(&target, bytes)?;

        log::debug!("Stored image {relative} ({} bytes)", bytes.len());
        Ok(relative)
    }

    fn delete(&self, path: &str) -> StorageResult<()> {
        let target = self.resolve(path)?;
        match std::fs::remove_file(&target) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }
}

/// Delete every path, logging failures instead of returning them.
pub fn delete_quietly<S>(store: &S, paths: &[String])
where
    S: ImageStore + ?Sized,
{
    for path in paths {
        if let Err(err) = store.delete(path) {
            log::warn!("Failed to delete stored image {path}: {err}");
        }
    }
}
