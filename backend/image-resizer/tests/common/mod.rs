//! In-memory test doubles for the storage and metadata seams
#![allow(dead_code)]

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage};
use image_resizer::config::StorageConfig;
use image_resizer::error::HandlerError;
use image_resizer::models::MetadataRecord;
use image_resizer::services::thumbnail::ThumbnailConfig;
use image_resizer::services::{MetadataStore, ObjectStore, ThumbnailService, ThumbnailServiceConfig};
use s3_utils::{S3Error, S3Result};
use std::collections::HashMap;
use std::io::Cursor;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

pub const UPLOAD_BUCKET: &str = "imageworkflow-prod-upload-bucket-123456789101";
pub const RESIZE_BUCKET: &str = "imageworkflow-prod-resize-bucket-123456789101";

#[derive(Debug, Clone)]
pub struct StoredObject {
    pub body: Bytes,
    pub content_type: String,
}

#[derive(Default)]
pub struct InMemoryObjectStore {
    objects: Mutex<HashMap<(String, String), StoredObject>>,
    gets: AtomicUsize,
    puts: AtomicUsize,
    fail_puts: bool,
}

impl InMemoryObjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing_puts() -> Self {
        Self {
            fail_puts: true,
            ..Self::default()
        }
    }

    pub fn insert(&self, bucket: &str, key: &str, body: Vec<u8>, content_type: &str) {
        self.objects.lock().unwrap().insert(
            (bucket.to_string(), key.to_string()),
            StoredObject {
                body: Bytes::from(body),
                content_type: content_type.to_string(),
            },
        );
    }

    pub fn object(&self, bucket: &str, key: &str) -> Option<StoredObject> {
        self.objects
            .lock()
            .unwrap()
            .get(&(bucket.to_string(), key.to_string()))
            .cloned()
    }

    pub fn keys_in(&self, bucket: &str) -> Vec<String> {
        let mut keys: Vec<String> = self
            .objects
            .lock()
            .unwrap()
            .keys()
            .filter(|(b, _)| b == bucket)
            .map(|(_, k)| k.clone())
            .collect();
        keys.sort();
        keys
    }

    pub fn get_count(&self) -> usize {
        self.gets.load(Ordering::SeqCst)
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ObjectStore for InMemoryObjectStore {
    async fn get_object(&self, bucket: &str, key: &str) -> S3Result<Bytes> {
        self.gets.fetch_add(1, Ordering::SeqCst);
        self.object(bucket, key)
            .map(|o| o.body)
            .ok_or_else(|| S3Error::NotFound {
                bucket: bucket.to_string(),
                key: key.to_string(),
            })
    }

    async fn put_object(
        &self,
        bucket: &str,
        key: &str,
        body: Bytes,
        content_type: &str,
    ) -> S3Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail_puts {
            return Err(S3Error::PutObject {
                bucket: bucket.to_string(),
                key: key.to_string(),
                message: "AccessDenied".to_string(),
            });
        }
        self.insert(bucket, key, body.to_vec(), content_type);
        Ok(())
    }
}

#[derive(Default)]
pub struct InMemoryMetadataStore {
    records: Mutex<HashMap<String, MetadataRecord>>,
    puts: AtomicUsize,
    fail: bool,
}

impl InMemoryMetadataStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn record(&self, image_id: &str) -> Option<MetadataRecord> {
        self.records.lock().unwrap().get(image_id).cloned()
    }

    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    pub fn put_count(&self) -> usize {
        self.puts.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl MetadataStore for InMemoryMetadataStore {
    async fn put_item(&self, record: &MetadataRecord) -> image_resizer::Result<()> {
        self.puts.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(HandlerError::MetadataWriteFailure(
                "ProvisionedThroughputExceededException".to_string(),
            ));
        }
        self.records
            .lock()
            .unwrap()
            .insert(record.image_id.clone(), record.clone());
        Ok(())
    }
}

/// Service wired to the given doubles with the default thumbnail settings
pub fn service(
    objects: Arc<InMemoryObjectStore>,
    metadata: Arc<InMemoryMetadataStore>,
) -> ThumbnailService {
    ThumbnailService::new(
        objects,
        metadata,
        ThumbnailServiceConfig {
            thumbnail: ThumbnailConfig::default(),
            storage: StorageConfig {
                upload_bucket: UPLOAD_BUCKET.to_string(),
                resize_bucket: RESIZE_BUCKET.to_string(),
            },
        },
    )
}

pub fn encode(width: u32, height: u32, format: ImageOutputFormat) -> Vec<u8> {
    let img = RgbImage::from_pixel(width, height, Rgb([0, 0, 255]));
    let mut buf = Vec::new();
    DynamicImage::ImageRgb8(img)
        .write_to(&mut Cursor::new(&mut buf), format)
        .unwrap();
    buf
}

pub fn jpeg(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageOutputFormat::Jpeg(90))
}

pub fn png(width: u32, height: u32) -> Vec<u8> {
    encode(width, height, ImageOutputFormat::Png)
}

pub fn fixture_event() -> serde_json::Value {
    serde_json::from_str(include_str!("../fixtures/s3_event.json")).unwrap()
}
