use playlife_core::submission::CollaboratorError;

#[derive(Debug, thiserror::Error)]
pub enum StorageError {
    #[error("Invalid storage configuration: {0}")]
    Config(String),

    #[error("Invalid object key '{0}'")]
    InvalidKey(String),

    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("S3 request failed: {0}")]
    S3(String),
}

impl From<StorageError> for CollaboratorError {
    fn from(err: StorageError) -> Self {
        CollaboratorError::new(err.to_string())
    }
}
