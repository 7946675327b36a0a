//! Image Resizer - Lambda entry point
//!
//! Environment variables:
//! - UPLOAD_BUCKET_NAME: bucket originals are uploaded to
//! - RESIZE_BUCKET_NAME: bucket thumbnails are written to
//! - TABLE_NAME: DynamoDB metadata table
//! - REGION: region of the metadata table (default: "eu-central-1")
//! - THUMB_MAX_DIMENSION: thumbnail bounding box edge (default: 128)
//! - THUMB_QUALITY: JPEG quality 1-100 (default: 75)
//! - S3_ENDPOINT: optional S3-compatible endpoint for local runs
//! - S3_REGION: optional S3 region override (default: ambient AWS region)

use anyhow::Context;
use aws_config::{BehaviorVersion, Region};
use image_resizer::handler::handler;
use image_resizer::services::{DynamoMetadataStore, ThumbnailService, ThumbnailServiceConfig};
use image_resizer::Config;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use s3_utils::{S3Client, S3Config};
use serde_json::Value;
use std::sync::Arc;
use tracing::info;

#[tokio::main]
async fn main() -> Result<(), Error> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .json()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("image_resizer=info".parse()?),
        )
        .with_target(false)
        .without_time()
        .init();

    let config = Config::from_env().context("failed to load configuration")?;
    info!(
        upload_bucket = %config.storage.upload_bucket,
        resize_bucket = %config.storage.resize_bucket,
        table = %config.table.name,
        region = %config.table.region,
        "Configuration loaded"
    );

    let sdk_config = aws_config::load_defaults(BehaviorVersion::latest()).await;

    let s3 = S3Client::from_sdk_config(&sdk_config, S3Config::from_env());

    let dynamodb = aws_sdk_dynamodb::Client::from_conf(
        aws_sdk_dynamodb::config::Builder::from(&sdk_config)
            .region(Region::new(config.table.region.clone()))
            .build(),
    );
    let metadata = DynamoMetadataStore::new(dynamodb, config.table.name.clone());

    let service = Arc::new(ThumbnailService::new(
        Arc::new(s3.operations()),
        Arc::new(metadata),
        ThumbnailServiceConfig {
            thumbnail: config.thumbnail.clone(),
            storage: config.storage.clone(),
        },
    ));

    run(service_fn(move |event: LambdaEvent<Value>| {
        let service = service.clone();
        async move { handler(&service, event).await }
    }))
    .await
}
