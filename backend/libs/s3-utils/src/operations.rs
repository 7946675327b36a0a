/// S3 object download and upload across buckets
use crate::error::{S3Error, S3Result};
use aws_sdk_s3::error::DisplayErrorContext;
use aws_sdk_s3::primitives::ByteStream;
use aws_sdk_s3::Client;
use bytes::Bytes;
use std::sync::Arc;
use tracing::debug;

/// Bucket-agnostic object operations.
///
/// Every call names its bucket, so one instance serves both the source and
/// destination buckets of a pipeline.
#[derive(Clone)]
pub struct S3Operations {
    client: Arc<Client>,
}

impl S3Operations {
    pub fn new(client: Arc<Client>) -> Self {
        Self { client }
    }

    /// Download the full content of an object
    pub async fn download_file(&self, bucket: &str, key: &str) -> S3Result<Bytes> {
        debug!(bucket = %bucket, key = %key, "Downloading from S3");

        let response = self
            .client
            .get_object()
            .bucket(bucket)
            .key(key)
            .send()
            .await
            .map_err(|e| {
                let missing = e
                    .as_service_error()
                    .map(|se| se.is_no_such_key())
                    .unwrap_or(false);
                if missing {
                    S3Error::NotFound {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                    }
                } else {
                    S3Error::GetObject {
                        bucket: bucket.to_string(),
                        key: key.to_string(),
                        message: DisplayErrorContext(&e).to_string(),
                    }
                }
            })?;

        let body = response
            .body
            .collect()
            .await
            .map_err(|e| S3Error::ReadBody {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?
            .into_bytes();

        debug!(bucket = %bucket, key = %key, size = body.len(), "Downloaded from S3");
        Ok(body)
    }

    /// Upload an object, replacing any existing object under the same key
    pub async fn upload_file(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> S3Result<()> {
        let size = body.len();
        debug!(bucket = %bucket, key = %key, size, "Uploading to S3");

        self.client
            .put_object()
            .bucket(bucket)
            .key(key)
            .content_type(content_type)
            .body(ByteStream::from(body))
            .send()
            .await
            .map_err(|e| S3Error::PutObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        debug!(bucket = %bucket, key = %key, size, "Uploaded to S3");
        Ok(())
    }
}
