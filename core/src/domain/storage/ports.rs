use std::future::Future;
use std::time::Duration;

use bytes::Bytes;

use crate::domain::common::entities::app_errors::CoreError;

use super::entities::PresignedUrl;

/// Port for object storage operations (MinIO/S3) on the image bucket
#[cfg_attr(test, mockall::automock)]
pub trait ObjectStoragePort: Send + Sync {
    /// Create the bucket when it does not exist yet
    fn ensure_bucket(&self) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Upload an object directly to storage
    fn put_object(
        &self,
        object_key: &str,
        payload: Bytes,
        content_type: &str,
    ) -> impl Future<Output = Result<(), CoreError>> + Send;

    /// Generate a presigned GET URL for downloads
    fn presign_get_url(
        &self,
        object_key: &str,
        expires_in: Duration,
    ) -> impl Future<Output = Result<PresignedUrl, CoreError>> + Send;

    /// Delete an object from storage
    fn delete_object(&self, object_key: &str) -> impl Future<Output = Result<(), CoreError>> + Send;
}
