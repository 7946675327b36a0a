/// Data models for image-resizer
///
/// This module defines structures for:
/// - UploadEvent: the accepted invocation payload shapes
/// - ImageEvent: the normalised event the service works on
/// - MetadataRecord: the row written to the metadata table
/// - HandlerResult: the value returned to the invoker
///
use crate::error::{HandlerError, Result};
use serde::{Deserialize, Serialize};

/// Prefix prepended to the original key to form the thumbnail key
pub const RESIZED_PREFIX: &str = "resized/";

/// Content type of every stored thumbnail
pub const THUMBNAIL_CONTENT_TYPE: &str = "image/jpeg";

// ========================================
// Event Models
// ========================================

#[derive(Debug, Clone, Deserialize)]
pub struct BucketRef {
    pub name: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ObjectRef {
    pub key: String,
}

/// `detail` section of an EventBridge "Object Created" event
#[derive(Debug, Clone, Deserialize)]
pub struct ObjectCreatedDetail {
    pub bucket: BucketRef,
    pub object: ObjectRef,
}

/// Invocation payload.
///
/// EventBridge notifications carry the bucket and key under `detail`;
/// direct invocations name the image and key at the top level.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UploadEvent {
    Notification {
        detail: ObjectCreatedDetail,
    },
    Direct {
        #[serde(rename = "ImageID")]
        image_id: String,
        s3_key: String,
    },
}

/// Normalised event, independent of the payload shape it came from
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageEvent {
    pub image_id: String,
    /// Bucket named by the event; direct invocations carry none
    pub bucket: Option<String>,
    pub key: String,
}

impl UploadEvent {
    /// Parse a raw invocation payload
    pub fn from_value(value: serde_json::Value) -> Result<Self> {
        serde_json::from_value(value).map_err(|_| {
            HandlerError::InvalidEvent(
                "expected detail.bucket.name and detail.object.key, or ImageID and s3_key"
                    .to_string(),
            )
        })
    }

    /// Resolve the image identifier and storage coordinates
    pub fn normalize(self) -> Result<ImageEvent> {
        let event = match self {
            UploadEvent::Notification { detail } => {
                let key = detail.object.key;
                ImageEvent {
                    image_id: image_id_from_key(&key).to_string(),
                    bucket: Some(detail.bucket.name),
                    key,
                }
            }
            UploadEvent::Direct { image_id, s3_key } => ImageEvent {
                image_id,
                bucket: None,
                key: s3_key,
            },
        };

        if event.key.is_empty() {
            return Err(HandlerError::InvalidEvent("object key is empty".to_string()));
        }
        if event.image_id.is_empty() {
            return Err(HandlerError::InvalidEvent(format!(
                "could not resolve ImageID from key {:?}",
                event.key
            )));
        }
        Ok(event)
    }
}

impl ImageEvent {
    /// Reject events that name a bucket other than the upload bucket
    pub fn ensure_bucket(&self, upload_bucket: &str) -> Result<()> {
        match self.bucket.as_deref() {
            Some(bucket) if bucket != upload_bucket => Err(HandlerError::InvalidEvent(format!(
                "Ignoring object from unexpected bucket: {bucket}"
            ))),
            _ => Ok(()),
        }
    }

    /// Key the thumbnail is stored under
    pub fn resized_key(&self) -> String {
        resized_key(&self.key)
    }
}

/// Image identifier for an object key: file name without its last extension.
///
/// Leading dots belong to the name, so `.hidden` keeps its dot.
pub fn image_id_from_key(key: &str) -> &str {
    let file_name = key.rsplit('/').next().unwrap_or(key);
    match file_name.rfind('.') {
        Some(idx) if file_name[..idx].chars().any(|c| c != '.') => &file_name[..idx],
        _ => file_name,
    }
}

/// Thumbnail key for an original key. Plain concatenation, no path joining.
pub fn resized_key(original_key: &str) -> String {
    format!("{RESIZED_PREFIX}{original_key}")
}

// ========================================
// Metadata Models
// ========================================

/// Processing status stored in the metadata table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageStatus {
    Resized,
}

impl ImageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Resized => "resized",
        }
    }
}

/// One row per ImageID; rewritten on every successful run
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetadataRecord {
    #[serde(rename = "ImageID")]
    pub image_id: String,
    pub original_storage_key: String,
    pub resized_storage_key: String,
    pub status: ImageStatus,
}

// ========================================
// Result Models
// ========================================

/// Outcome returned to the invoker; both variants are normal returns
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum HandlerResult {
    Resized {
        #[serde(rename = "ImageID")]
        image_id: String,
        original_storage_key: String,
        resized_storage_key: String,
    },
    Error {
        message: String,
        #[serde(rename = "ImageID", skip_serializing_if = "Option::is_none")]
        image_id: Option<String>,
        error_code: String,
    },
}

impl HandlerResult {
    pub fn error(err: &HandlerError, image_id: Option<String>) -> Self {
        HandlerResult::Error {
            message: err.to_string(),
            image_id,
            error_code: err.code().to_string(),
        }
    }

    pub fn is_resized(&self) -> bool {
        matches!(self, HandlerResult::Resized { .. })
    }
}

impl From<MetadataRecord> for HandlerResult {
    fn from(record: MetadataRecord) -> Self {
        HandlerResult::Resized {
            image_id: record.image_id,
            original_storage_key: record.original_storage_key,
            resized_storage_key: record.resized_storage_key,
        }
    }
}
