//! S3 (or S3-compatible) object storage.
//!
//! Logical bucket names are mapped to real bucket names with a configurable
//! prefix, so `missions` becomes e.g. `playlife-prod-missions`.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use playlife_core::submission::{CollaboratorError, ObjectStorage};

use crate::config::StorageConfig;
use crate::error::StorageError;
use crate::local::validate_key;

#[derive(Debug, Clone)]
pub struct S3ObjectStorage {
    client: Client,
    bucket_prefix: String,
    public_base_url: String,
}

impl S3ObjectStorage {
    pub fn new(client: Client, bucket_prefix: &str, public_base_url: &str) -> Self {
        Self {
            client,
            bucket_prefix: bucket_prefix.to_string(),
            public_base_url: public_base_url.trim_end_matches('/').to_string(),
        }
    }

    /// Build a client from the AWS default credential chain plus any
    /// region or endpoint override in `config`.
    pub async fn from_config(config: &StorageConfig) -> Self {
        let mut loader = aws_config::defaults(aws_config::BehaviorVersion::latest());
        if let Some(region) = &config.s3_region {
            loader = loader.region(aws_config::Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.s3_endpoint {
            loader = loader.endpoint_url(endpoint);
        }
        let sdk_config = loader.load().await;

        let s3_config = aws_sdk_s3::config::Builder::from(&sdk_config)
            .force_path_style(config.s3_endpoint.is_some())
            .build();

        tracing::info!(
            bucket_prefix = %config.s3_bucket_prefix,
            endpoint = ?config.s3_endpoint,
            "S3 object storage configured"
        );
        Self::new(
            Client::from_conf(s3_config),
            &config.s3_bucket_prefix,
            &config.public_base_url,
        )
    }

    pub fn bucket_name(&self, bucket: &str) -> String {
        format!("{}{bucket}", self.bucket_prefix)
    }

    async fn put(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<(), StorageError> {
        validate_key(bucket, path)?;
        self.client
            .put_object()
            .bucket(self.bucket_name(bucket))
            .key(path)
            .content_type(content_type)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| StorageError::S3(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ObjectStorage for S3ObjectStorage {
    async fn upload(
        &self,
        bucket: &str,
        path: &str,
        bytes: Vec<u8>,
        content_type: &str,
    ) -> Result<String, CollaboratorError> {
        let size = bytes.len();
        self.put(bucket, path, bytes, content_type).await?;
        tracing::info!(
            bucket = %self.bucket_name(bucket),
            key = path,
            size,
            "Stored object in S3"
        );
        Ok(self.public_url(bucket, path))
    }

    fn public_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/{}/{path}", self.public_base_url, self.bucket_name(bucket))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn storage() -> S3ObjectStorage {
        let config = aws_sdk_s3::Config::builder()
            .behavior_version(aws_sdk_s3::config::BehaviorVersion::latest())
            .region(aws_sdk_s3::config::Region::new("eu-west-3"))
            .build();
        S3ObjectStorage::new(
            Client::from_conf(config),
            "playlife-test-",
            "https://objects.example.org/",
        )
    }

    #[test]
    fn bucket_names_are_prefixed() {
        assert_eq!(storage().bucket_name("missions"), "playlife-test-missions");
    }

    #[test]
    fn public_url_uses_real_bucket_name() {
        assert_eq!(
            storage().public_url("missions", "3/10-a.png"),
            "https://objects.example.org/playlife-test-missions/3/10-a.png"
        );
    }

    #[tokio::test]
    async fn invalid_key_fails_before_any_request() {
        let err = storage()
            .upload("missions", "../escape.png", vec![1], "image/png")
            .await
            .unwrap_err();
        assert!(err.message.contains("Invalid object key"));
    }
}
