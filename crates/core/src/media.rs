//! Client-side media rules for mission images.
//!
//! Files are checked before any upload is attempted: a file larger than
//! [`MAX_MEDIA_BYTES`] or whose MIME type does not start with
//! [`IMAGE_MIME_PREFIX`] never reaches the storage collaborator.

use std::fmt;

use crate::types::{DbId, Timestamp};

/// Largest accepted image (5 MiB).
pub const MAX_MEDIA_BYTES: usize = 5 * 1024 * 1024;

/// Required MIME type prefix for mission images.
pub const IMAGE_MIME_PREFIX: &str = "image/";

/// Storage bucket holding mission images.
pub const MISSION_MEDIA_BUCKET: &str = "missions";

/// Fallback stem when a file name has no usable characters.
const FALLBACK_FILE_NAME: &str = "upload";

/// A file selected for upload but not yet sent anywhere.
#[derive(Clone, PartialEq, Eq)]
pub struct MediaFile {
    pub file_name: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

impl MediaFile {
    pub fn new(
        file_name: impl Into<String>,
        content_type: impl Into<String>,
        bytes: Vec<u8>,
    ) -> Self {
        Self {
            file_name: file_name.into(),
            content_type: content_type.into(),
            bytes,
        }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }
}

impl fmt::Debug for MediaFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MediaFile")
            .field("file_name", &self.file_name)
            .field("content_type", &self.content_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MediaError {
    #[error("The selected file is empty")]
    Empty,

    #[error("Image is too large ({size} bytes). Maximum size is {max} bytes")]
    TooLarge { size: usize, max: usize },

    #[error("File type '{content_type}' is not an image")]
    NotAnImage { content_type: String },
}

/// Check size and type of a selected file.
pub fn validate_media(file: &MediaFile) -> Result<(), MediaError> {
    if file.bytes.is_empty() {
        return Err(MediaError::Empty);
    }
    if file.size() > MAX_MEDIA_BYTES {
        return Err(MediaError::TooLarge {
            size: file.size(),
            max: MAX_MEDIA_BYTES,
        });
    }
    if !file
        .content_type
        .trim()
        .to_ascii_lowercase()
        .starts_with(IMAGE_MIME_PREFIX)
    {
        return Err(MediaError::NotAnImage {
            content_type: file.content_type.clone(),
        });
    }
    Ok(())
}

/// Reduce a client file name to `[a-z0-9._-]`, keeping it non-empty.
pub fn sanitize_file_name(name: &str) -> String {
    // Browsers on some platforms send the full client path.
    let base = name.rsplit(['/', '\\']).next().unwrap_or(name);

    let mut out = String::with_capacity(base.len());
    for c in base.chars() {
        if c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-') {
            out.push(c.to_ascii_lowercase());
        } else if !out.ends_with('-') {
            out.push('-');
        }
    }

    let trimmed = out.trim_matches(|c| c == '-' || c == '.');
    if trimmed.is_empty() {
        FALLBACK_FILE_NAME.to_string()
    } else {
        trimmed.to_string()
    }
}

/// Object path for an upload: `{user_id}/{unix_millis}-{file_name}`.
///
/// Scoping by user and timestamp keeps two uploads of the same file name
/// from overwriting each other.
pub fn upload_path(user_id: DbId, file_name: &str, now: Timestamp) -> String {
    format!(
        "{user_id}/{}-{}",
        now.timestamp_millis(),
        sanitize_file_name(file_name)
    )
}
