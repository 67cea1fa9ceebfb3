use std::path::PathBuf;

use crate::error::StorageError;

/// Which object storage implementation to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StorageBackend {
    Local,
    S3,
}

impl StorageBackend {
    pub fn from_name(name: &str) -> Result<Self, StorageError> {
        match name.trim().to_ascii_lowercase().as_str() {
            "local" => Ok(Self::Local),
            "s3" => Ok(Self::S3),
            other => Err(StorageError::Config(format!(
                "Unknown storage backend '{other}'. Must be one of: local, s3"
            ))),
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            Self::Local => "local",
            Self::S3 => "s3",
        }
    }
}

/// Object storage configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub backend: StorageBackend,
    /// Directory holding one sub-directory per bucket (local backend).
    pub local_root: PathBuf,
    /// Prefix of every public URL, without trailing slash.
    pub public_base_url: String,
    /// Prepended to logical bucket names to form S3 bucket names.
    pub s3_bucket_prefix: String,
    pub s3_region: Option<String>,
    /// Custom endpoint for S3-compatible services (enables path-style).
    pub s3_endpoint: Option<String>,
}

impl StorageConfig {
    /// Load configuration from environment variables with defaults.
    ///
    /// | Env Var                    | Default                        |
    /// |----------------------------|--------------------------------|
    /// | `STORAGE_BACKEND`          | `local`                        |
    /// | `STORAGE_LOCAL_ROOT`       | `./storage`                    |
    /// | `STORAGE_PUBLIC_BASE_URL`  | `http://localhost:3000/media`  |
    /// | `STORAGE_S3_BUCKET_PREFIX` | (empty)                        |
    /// | `STORAGE_S3_REGION`        | (SDK default chain)            |
    /// | `STORAGE_S3_ENDPOINT`      | (AWS)                          |
    pub fn from_env() -> Result<Self, StorageError> {
        let backend = StorageBackend::from_name(
            &std::env::var("STORAGE_BACKEND").unwrap_or_else(|_| "local".into()),
        )?;

        let local_root = PathBuf::from(
            std::env::var("STORAGE_LOCAL_ROOT").unwrap_or_else(|_| "./storage".into()),
        );

        let public_base_url = std::env::var("STORAGE_PUBLIC_BASE_URL")
            .unwrap_or_else(|_| "http://localhost:3000/media".into())
            .trim_end_matches('/')
            .to_string();

        let s3_bucket_prefix = std::env::var("STORAGE_S3_BUCKET_PREFIX").unwrap_or_default();
        let s3_region = non_empty_var("STORAGE_S3_REGION");
        let s3_endpoint = non_empty_var("STORAGE_S3_ENDPOINT");

        Ok(Self {
            backend,
            local_root,
            public_base_url,
            s3_bucket_prefix,
            s3_region,
            s3_endpoint,
        })
    }

    /// Local filesystem storage rooted at `root`, for tests and development.
    pub fn local(root: impl Into<PathBuf>, public_base_url: &str) -> Self {
        Self {
            backend: StorageBackend::Local,
            local_root: root.into(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
            s3_bucket_prefix: String::new(),
            s3_region: None,
            s3_endpoint: None,
        }
    }
}

fn non_empty_var(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
