//! Object storage backends for uploaded media.
//!
//! Both backends implement [`playlife_core::submission::ObjectStorage`]:
//! [`local::LocalObjectStorage`] writes to the filesystem and
//! [`s3::S3ObjectStorage`] writes to S3 or an S3-compatible service.

use std::sync::Arc;

use playlife_core::submission::ObjectStorage;

pub mod config;
pub mod error;
pub mod local;
pub mod s3;

pub use config::{StorageBackend, StorageConfig};
pub use error::StorageError;
pub use local::LocalObjectStorage;
pub use s3::S3ObjectStorage;

/// Build the configured backend.
pub async fn build_storage(config: &StorageConfig) -> Result<Arc<dyn ObjectStorage>, StorageError> {
    match config.backend {
        StorageBackend::Local => {
            tokio::fs::create_dir_all(&config.local_root).await?;
            tracing::info!(root = %config.local_root.display(), "Local object storage configured");
            Ok(Arc::new(LocalObjectStorage::new(
                &config.local_root,
                &config.public_base_url,
            )))
        }
        StorageBackend::S3 => Ok(Arc::new(S3ObjectStorage::from_config(config).await)),
    }
}
