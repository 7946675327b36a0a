//! Error types for S3 operations

use thiserror::Error;

/// Result type for S3 operations
pub type S3Result<T> = Result<T, S3Error>;

#[derive(Error, Debug)]
pub enum S3Error {
    /// The object does not exist in the bucket
    #[error("object s3://{bucket}/{key} does not exist")]
    NotFound { bucket: String, key: String },

    /// GetObject request failed (access denied, network, throttling...)
    #[error("failed to get s3://{bucket}/{key}: {message}")]
    GetObject {
        bucket: String,
        key: String,
        message: String,
    },

    /// The response body stream broke while being collected
    #[error("failed to read body of s3://{bucket}/{key}: {message}")]
    ReadBody {
        bucket: String,
        key: String,
        message: String,
    },

    /// PutObject request failed
    #[error("failed to put s3://{bucket}/{key}: {message}")]
    PutObject {
        bucket: String,
        key: String,
        message: String,
    },
}

impl S3Error {
    /// Whether the error means the object is missing rather than unreachable
    pub fn is_not_found(&self) -> bool {
        matches!(self, S3Error::NotFound { .. })
    }
}
