//! Metadata table seam
//!
//! One record per ImageID, written with a full-item `PutItem` so a rerun
//! overwrites the previous row.

use crate::error::{HandlerError, Result};
use crate::models::MetadataRecord;
use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use aws_sdk_dynamodb::types::AttributeValue;
use aws_sdk_dynamodb::Client;
use std::collections::HashMap;
use tracing::debug;

#[async_trait]
pub trait MetadataStore: Send + Sync {
    /// Insert or overwrite the record keyed by its ImageID
    async fn put_item(&self, record: &MetadataRecord) -> Result<()>;
}

/// DynamoDB-backed metadata store
#[derive(Debug, Clone)]
pub struct DynamoMetadataStore {
    client: Client,
    table: String,
}

impl DynamoMetadataStore {
    pub fn new(client: Client, table: impl Into<String>) -> Self {
        Self {
            client,
            table: table.into(),
        }
    }
}

/// Attribute map for a record; `ImageID` is the partition key
pub fn to_item(record: &MetadataRecord) -> HashMap<String, AttributeValue> {
    HashMap::from([
        (
            "ImageID".to_string(),
            AttributeValue::S(record.image_id.clone()),
        ),
        (
            "original_storage_key".to_string(),
            AttributeValue::S(record.original_storage_key.clone()),
        ),
        (
            "resized_storage_key".to_string(),
            AttributeValue::S(record.resized_storage_key.clone()),
        ),
        (
            "status".to_string(),
            AttributeValue::S(record.status.as_str().to_string()),
        ),
    ])
}

#[async_trait]
impl MetadataStore for DynamoMetadataStore {
    #[tracing::instrument(skip(self, record), fields(image_id = %record.image_id))]
    async fn put_item(&self, record: &MetadataRecord) -> Result<()> {
        self.client
            .put_item()
            .table_name(&self.table)
            .set_item(Some(to_item(record)))
            .send()
            .await
            .map_err(|e| {
                HandlerError::MetadataWriteFailure(format!(
                    "put_item on {} failed: {}",
                    self.table,
                    DisplayErrorContext(&e)
                ))
            })?;

        debug!(table = %self.table, "Metadata record written");
        Ok(())
    }
}
