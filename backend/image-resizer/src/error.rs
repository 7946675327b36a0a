/// Error types for the image resizer
///
/// Every failure the handler can hit maps to one `HandlerError` variant.
/// The handler boundary turns them into an `error` result instead of
/// failing the invocation.
use s3_utils::S3Error;
use thiserror::Error;

/// Result type for image-resizer operations
pub type Result<T> = std::result::Result<T, HandlerError>;

#[derive(Error, Debug)]
pub enum HandlerError {
    /// Malformed event, empty field, or object from a foreign bucket
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    /// Source object missing or inaccessible
    #[error("Failed to fetch original image: {0}")]
    FetchFailure(String),

    /// Source bytes are not a supported raster image
    #[error("Failed to decode image: {0}")]
    DecodeFailure(String),

    /// Thumbnail could not be encoded
    #[error("Failed to encode thumbnail: {0}")]
    EncodeFailure(String),

    /// Thumbnail could not be written to the resize bucket
    #[error("Failed to upload thumbnail: {0}")]
    UploadFailure(String),

    /// Metadata upsert failed after the thumbnail was uploaded
    #[error("Failed to write metadata: {0}")]
    MetadataWriteFailure(String),
}

impl HandlerError {
    /// Stable machine-readable code reported in error results
    pub fn code(&self) -> &'static str {
        match self {
            HandlerError::InvalidEvent(_) => "invalid_event",
            HandlerError::FetchFailure(_) => "fetch_failure",
            HandlerError::DecodeFailure(_) => "decode_failure",
            HandlerError::EncodeFailure(_) => "encode_failure",
            HandlerError::UploadFailure(_) => "upload_failure",
            HandlerError::MetadataWriteFailure(_) => "metadata_write_failure",
        }
    }
}

/// Errors raised while loading configuration at startup
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ConfigError {
    #[error("{0} not set")]
    Missing(&'static str),

    #[error("{name} has invalid value {value:?}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

/// Storage errors become fetch or upload failures depending on the call site.
pub(crate) fn fetch_failure(err: S3Error) -> HandlerError {
    HandlerError::FetchFailure(err.to_string())
}

pub(crate) fn upload_failure(err: S3Error) -> HandlerError {
    HandlerError::UploadFailure(err.to_string())
}
