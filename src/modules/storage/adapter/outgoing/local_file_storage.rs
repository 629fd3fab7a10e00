use async_trait::async_trait;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::storage::application::domain::extension_for_mime;
use crate::storage::application::ports::outgoing::{
    FileCategory, FileStorage, StorageError, StoredFile,
};

pub const PUBLIC_PREFIX: &str = "/uploads";

/// Writes uploads under `root/<category>/<uuid>.<ext>`; `root` is what
/// `actix-files` serves at `/uploads`.
#[derive(Debug, Clone)]
pub struct LocalFileStorage {
    root: PathBuf,
}

impl LocalFileStorage {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Maps a public path back onto disk, refusing anything that could escape `root`.
    fn resolve(&self, public_path: &str) -> Result<PathBuf, StorageError> {
        let relative = public_path
            .strip_prefix(PUBLIC_PREFIX)
            .and_then(|p| p.strip_prefix('/'))
            .ok_or_else(|| StorageError::InvalidPath(public_path.to_string()))?;

        if relative.is_empty()
            || relative
                .split('/')
                .any(|seg| seg.is_empty() || seg == "." || seg == "..")
        {
            return Err(StorageError::InvalidPath(public_path.to_string()));
        }

        Ok(self.root.join(relative))
    }
}

#[async_trait]
impl FileStorage for LocalFileStorage {
    async fn store(
        &self,
        category: FileCategory,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, StorageError> {
        let dir = self.root.join(category.dir_name());
        tokio::fs::create_dir_all(&dir)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        let file_name = format!("{}.{}", Uuid::new_v4(), extension_for_mime(mime));
        let size = bytes.len() as u64;

        tokio::fs::write(dir.join(&file_name), bytes)
            .await
            .map_err(|e| StorageError::Io(e.to_string()))?;

        let path = format!("{}/{}/{}", PUBLIC_PREFIX, category.dir_name(), file_name);
        debug!(path = %path, size, "Stored upload");

        Ok(StoredFile { path, size })
    }

    async fn delete(&self, path: &str) -> Result<(), StorageError> {
        let disk_path = self.resolve(path)?;

        match tokio::fs::remove_file(&disk_path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                warn!(path = %path, "Upload already removed");
                Ok(())
            }
            Err(e) => Err(StorageError::Io(e.to_string())),
        }
    }
}
