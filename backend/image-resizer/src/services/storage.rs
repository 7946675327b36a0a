//! Object storage seam
//!
//! The handler reads originals and writes thumbnails through `ObjectStore`.
//! Production uses S3 via `s3-utils`.

use async_trait::async_trait;
use bytes::Bytes;
use s3_utils::{S3Operations, S3Result};

#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Fetch the full content of `bucket/key`
    async fn get_object(&self, bucket: &str, key: &str) -> S3Result<Bytes>;

    /// Store `body` at `bucket/key`, replacing any existing object
    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> S3Result<()>;
}

#[async_trait]
impl ObjectStore for S3Operations {
    async fn get_object(&self, bucket: &str, key: &str) -> S3Result<Bytes> {
        self.download_file(bucket, key).await
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> S3Result<()> {
        self.upload_file(bucket, key, body, content_type).await
    }
}
