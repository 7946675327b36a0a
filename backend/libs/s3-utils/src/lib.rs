/// Shared S3 utilities
///
/// Provides the AWS S3 client wrapper, configuration, and object
/// operations used by the image pipeline.
use aws_config::{Region, SdkConfig};
use aws_sdk_s3::Client;
use std::sync::Arc;

pub mod config;
pub mod error;
pub mod operations;

pub use config::S3Config;
pub use error::{S3Error, S3Result};
pub use operations::S3Operations;

/// Shared S3 client wrapper
#[derive(Clone)]
pub struct S3Client {
    client: Arc<Client>,
    config: S3Config,
}

impl S3Client {
    /// Build from an already loaded SDK configuration
    ///
    /// The SDK region is only replaced when `config.region` is set.
    pub fn from_sdk_config(sdk_config: &SdkConfig, config: S3Config) -> Self {
        let mut builder =
            aws_sdk_s3::config::Builder::from(sdk_config).force_path_style(config.path_style);
        if let Some(region) = &config.region {
            builder = builder.region(Region::new(region.clone()));
        }
        if let Some(endpoint) = &config.endpoint {
            builder = builder.endpoint_url(endpoint);
        }

        let client = Client::from_conf(builder.build());

        tracing::info!(
            region = ?client.config().region(),
            endpoint = ?config.endpoint,
            "S3 client initialized"
        );

        Self {
            client: Arc::new(client),
            config,
        }
    }

    /// Get reference to underlying AWS S3 client
    pub fn client(&self) -> &Client {
        &self.client
    }

    /// Get S3 configuration
    pub fn config(&self) -> &S3Config {
        &self.config
    }

    /// Object operations sharing this client
    pub fn operations(&self) -> S3Operations {
        S3Operations::new(self.client.clone())
    }
}
