//! Thumbnail service - coordinates thumbnail generation, storage, and metadata updates
//!
//! This service handles the complete thumbnail generation workflow:
//! 1. Normalise the event and check its bucket
//! 2. Download original image from the upload bucket
//! 3. Generate thumbnail
//! 4. Upload thumbnail to the resize bucket
//! 5. Upsert the metadata record
//!
//! Failures at any step are returned as an `error` result, never raised.
//! Nothing is rolled back: a thumbnail uploaded before a failed metadata
//! write stays in the resize bucket.

use super::processor::{ThumbnailConfig, ThumbnailProcessor};
use crate::config::StorageConfig;
use crate::error::{fetch_failure, upload_failure, HandlerError, Result};
use crate::models::{
    HandlerResult, ImageEvent, ImageStatus, MetadataRecord, UploadEvent, THUMBNAIL_CONTENT_TYPE,
};
use crate::services::metadata::MetadataStore;
use crate::services::storage::ObjectStore;
use std::sync::Arc;
use tracing::{error, info};

/// Thumbnail service configuration
#[derive(Clone, Debug)]
pub struct ThumbnailServiceConfig {
    /// Thumbnail processing config
    pub thumbnail: ThumbnailConfig,
    /// Source and destination buckets
    pub storage: StorageConfig,
}

/// Thumbnail service for generating and recording thumbnails
pub struct ThumbnailService {
    objects: Arc<dyn ObjectStore>,
    metadata: Arc<dyn MetadataStore>,
    processor: Arc<ThumbnailProcessor>,
    storage: StorageConfig,
}

impl ThumbnailService {
    /// Create a new thumbnail service
    pub fn new(
        objects: Arc<dyn ObjectStore>,
        metadata: Arc<dyn MetadataStore>,
        config: ThumbnailServiceConfig,
    ) -> Self {
        let processor = Arc::new(ThumbnailProcessor::new(config.thumbnail));

        info!(
            upload_bucket = %config.storage.upload_bucket,
            resize_bucket = %config.storage.resize_bucket,
            max_dimension = processor.config().max_dimension,
            "Thumbnail service initialized"
        );

        Self {
            objects,
            metadata,
            processor,
            storage: config.storage,
        }
    }

    /// Process one raw invocation payload
    pub async fn process(&self, payload: serde_json::Value) -> HandlerResult {
        let event = match UploadEvent::from_value(payload).and_then(UploadEvent::normalize) {
            Ok(event) => event,
            Err(e) => {
                error!(error = %e, "Rejected event");
                return HandlerResult::error(&e, None);
            }
        };

        self.process_event(&event).await
    }

    /// Process an already normalised event
    #[tracing::instrument(skip(self, event), fields(image_id = %event.image_id, key = %event.key))]
    pub async fn process_event(&self, event: &ImageEvent) -> HandlerResult {
        match self.generate_thumbnail(event).await {
            Ok(record) => HandlerResult::from(record),
            Err(e) => {
                error!(error = %e, error_code = e.code(), "Thumbnail generation failed");
                HandlerResult::error(&e, Some(event.image_id.clone()))
            }
        }
    }

    /// Generate, store and record the thumbnail for a single image
    async fn generate_thumbnail(&self, event: &ImageEvent) -> Result<MetadataRecord> {
        event.ensure_bucket(&self.storage.upload_bucket)?;

        info!(
            image_id = %event.image_id,
            key = %event.key,
            "Processing image"
        );

        // Download original
        let original_data = self
            .objects
            .get_object(&self.storage.upload_bucket, &event.key)
            .await
            .map_err(fetch_failure)?;

        // Generate thumbnail
        let thumbnail = self.processor.clone().generate_async(original_data).await?;

        // Upload thumbnail
        let resized_key = event.resized_key();
        let size = thumbnail.data.len();
        self.objects
            .put_object(
                &self.storage.resize_bucket,
                &resized_key,
                thumbnail.data,
                THUMBNAIL_CONTENT_TYPE,
            )
            .await
            .map_err(upload_failure)?;

        // Upsert metadata record
        let record = MetadataRecord {
            image_id: event.image_id.clone(),
            original_storage_key: event.key.clone(),
            resized_storage_key: resized_key,
            status: ImageStatus::Resized,
        };
        self.metadata.put_item(&record).await.map_err(|e| match e {
            HandlerError::MetadataWriteFailure(_) => e,
            other => HandlerError::MetadataWriteFailure(other.to_string()),
        })?;

        info!(
            image_id = %record.image_id,
            resized_key = %record.resized_storage_key,
            width = thumbnail.width,
            height = thumbnail.height,
            size,
            "Thumbnail created successfully"
        );

        Ok(record)
    }
}
