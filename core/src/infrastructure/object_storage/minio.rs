use std::time::Duration;

use aws_sdk_s3::{
    Client,
    config::{BehaviorVersion, Credentials, Region},
    presigning::PresigningConfig,
    primitives::ByteStream,
};
use bytes::Bytes;
use tracing::instrument;

use crate::domain::{
    common::{ObjectStorageConfig, entities::app_errors::CoreError},
    storage::{entities::PresignedUrl, ports::ObjectStoragePort},
};

/// S3-compatible storage for uploaded food images. Every object lives in a
/// single bucket whose name comes from configuration.
#[derive(Clone)]
pub struct MinioObjectStorage {
    client: Client,
    bucket: String,
}

impl MinioObjectStorage {
    pub fn new(config: &ObjectStorageConfig) -> Self {
        let credentials = Credentials::new(
            &config.access_key,
            &config.secret_key,
            None,
            None,
            "nutriguard",
        );

        let endpoint = normalize_endpoint(&config.endpoint, config.use_ssl);

        tracing::info!(
            endpoint = %endpoint,
            region = %config.region,
            bucket = %config.bucket_name,
            "Initializing MinIO client"
        );

        let s3_config = aws_sdk_s3::Config::builder()
            .behavior_version(BehaviorVersion::latest())
            .region(Region::new(config.region.clone()))
            .credentials_provider(credentials)
            .endpoint_url(endpoint)
            .force_path_style(true)
            .build();

        Self {
            client: Client::from_conf(s3_config),
            bucket: config.bucket_name.clone(),
        }
    }

    pub fn bucket(&self) -> &str {
        &self.bucket
    }
}

/// Adds the scheme when the endpoint is a bare `host:port`, and drops any
/// trailing slash.
fn normalize_endpoint(endpoint: &str, use_ssl: bool) -> String {
    let endpoint = endpoint.trim_end_matches('/');
    if endpoint.starts_with("http://") || endpoint.starts_with("https://") {
        return endpoint.to_string();
    }

    let scheme = if use_ssl { "https" } else { "http" };
    format!("{scheme}://{endpoint}")
}

impl ObjectStoragePort for MinioObjectStorage {
    #[instrument(skip(self))]
    async fn ensure_bucket(&self) -> Result<(), CoreError> {
        if self
            .client
            .head_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .is_ok()
        {
            tracing::debug!(bucket = %self.bucket, "Bucket already exists");
            return Ok(());
        }

        self.client
            .create_bucket()
            .bucket(&self.bucket)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, bucket = %self.bucket, "Failed to create bucket");
                CoreError::ObjectStorageError(format!("Failed to create bucket: {}", e))
            })?;

        tracing::info!(bucket = %self.bucket, "Bucket created");
        Ok(())
    }

    #[instrument(skip(self, payload))]
    async fn put_object(
        &self,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> Result<(), CoreError> {
        let payload_size = payload.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(object_key)
            .content_type(content_type)
            .body(ByteStream::from(payload))
            .send()
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    object_key = %object_key,
                    payload_size = payload_size,
                    "Failed to upload object"
                );
                CoreError::ObjectStorageError(format!("Failed to upload object: {}", e))
            })?;

        tracing::info!(object_key = %object_key, size = payload_size, "Object uploaded");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn presign_get_url(
        &self,
        object_key: &str,
        expires_in: Duration,
    ) -> Result<PresignedUrl, CoreError> {
        let presigning_config = PresigningConfig::expires_in(expires_in)
            .map_err(|e| CoreError::ObjectStorageError(format!("Invalid expiration: {}", e)))?;

        let presigned_request = self
            .client
            .get_object()
            .bucket(&self.bucket)
            .key(object_key)
            .presigned(presigning_config)
            .await
            .map_err(|e| {
                tracing::error!(
                    error = %e,
                    object_key = %object_key,
                    "Failed to generate presigned GET URL"
                );
                CoreError::ObjectStorageError(format!("Failed to generate presigned URL: {}", e))
            })?;

        Ok(PresignedUrl {
            url: presigned_request.uri().to_string(),
            expires_in_seconds: expires_in.as_secs(),
        })
    }

    #[instrument(skip(self))]
    async fn delete_object(&self, object_key: &str) -> Result<(), CoreError> {
        self.client
            .delete_object()
            .bucket(&self.bucket)
            .key(object_key)
            .send()
            .await
            .map_err(|e| {
                tracing::error!(error = %e, object_key = %object_key, "Failed to delete object");
                CoreError::ObjectStorageError(format!("Failed to delete object: {}", e))
            })?;

        tracing::info!(object_key = %object_key, "Object deleted");
        Ok(())
    }
}
