use async_trait::async_trait;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileCategory {
    KycDocument,
    Avatar,
}

impl FileCategory {
    pub fn dir_name(&self) -> &'static str {
        match self {
            FileCategory::KycDocument => "kyc",
            FileCategory::Avatar => "avatars",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredFile {
    /// Public path, e.g. `/uploads/kyc/<uuid>.jpg`.
    pub path: String,
    pub size: u64,
}

#[derive(Debug, Clone, thiserror::Error)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(String),

    #[error("Path is outside the upload area: {0}")]
    InvalidPath(String),
}

#[async_trait]
pub trait FileStorage: Send + Sync {
    /// `mime` must already be validated by an `UploadPolicy`.
    async fn store(
        &self,
        category: FileCategory,
        mime: &str,
        bytes: Vec<u8>,
    ) -> Result<StoredFile, StorageError>;

    /// Removing a file that no longer exists is not an error.
    async fn delete(&self, path: &str) -> Result<(), StorageError>;
}
