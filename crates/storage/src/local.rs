//! Filesystem-backed object storage.
//!
//! Objects live at `{root}/{bucket}/{path}`. The API serves `root`
//! read-only under `/media`, so the public URL of an object is
//! `{public_base_url}/{bucket}/{path}`.

use std::path::{Component, Path, PathBuf};

use async_trait::async_trait;
use playlife_core::submission::{CollaboratorError, ObjectStorage};

use crate::error::StorageError;

#[derive(Debug, Clone)]
pub struct LocalObjectStorage {
    root: PathBuf,
    public_base_url: String,
}

impl LocalObjectStorage {
    pub fn new(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Resolve an object key to a file path below the root.
    pub fn object_path(&self, bucket: &str, path: &str) -> Result<PathBuf, StorageError> {
        validate_key(bucket, path)?;
        Ok(self.root.join(bucket).join(path))
    }

    async fn write(&self, bucket: &str, path: &str, bytes: &[u8]) -> Result<(), StorageError> {
        let target = self.object_path(bucket, path)?;
        if let Some(parent) = target.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        tokio::fs::write(&target, bytes).await?;
        Ok(())
    }
}

/// Reject keys that could escape the bucket directory.
pub(crate) fn validate_key(bucket: &str, path: &str) -> Result<(), StorageError> {
    let plain = |s: &str| {
        !s.is_empty()
            && Path::new(s)
                .components()
                .all(|c| matches!(c, Component::Normal(_)))
    };
    if bucket.contains('/') || !plain(bucket) {
        return Err(StorageError::InvalidKey(bucket.to_string()));
    }
    if path.contains('\\') || !plain(path) {
        return Err(StorageError::InvalidKey(path.to_string()));
    }
    Ok(())
}

#[async_trait]
impl ObjectStorage for LocalObjectStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, CollaboratorError> {
        let size = bytes.len();
        self.write(bucket, path, &bytes).await?;
        tracing::debug!(bucket, path, size, content_type, "Stored object on local filesystem");
        Ok(self.public_url(bucket, path))
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{bucket}/{path}", self.public_base_url)
    }
}
