/// Configuration management for image-resizer
///
/// Loads configuration from environment variables once at process start.
/// Bucket and table names are required; the rest fall back to defaults.
use crate::error::ConfigError;
use crate::services::thumbnail::ThumbnailConfig;
use serde::Deserialize;

/// Region used for the metadata table client when `REGION` is unset
pub const DEFAULT_REGION: &str = "eu-central-1";

#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    pub storage: StorageConfig,
    pub table: TableConfig,
    pub thumbnail: ThumbnailConfig,
}

#[derive(Clone, Debug, Deserialize)]
pub struct StorageConfig {
    /// Source bucket; events naming any other bucket are rejected
    pub upload_bucket: String,
    /// Destination bucket for thumbnails
    pub resize_bucket: String,
}

#[derive(Clone, Debug, Deserialize)]
pub struct TableConfig {
    pub name: String,
    pub region: String,
}

impl Config {
    /// Load configuration from process environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Load configuration through an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.trim().is_empty())
                .ok_or(ConfigError::Missing(name))
        };

        let defaults = ThumbnailConfig::default();

        let max_dimension = match lookup("THUMB_MAX_DIMENSION") {
            Some(raw) => parse_bounded("THUMB_MAX_DIMENSION", &raw, 1, u32::from(u16::MAX))?,
            None => defaults.max_dimension,
        };
        let quality = match lookup("THUMB_QUALITY") {
            Some(raw) => parse_bounded("THUMB_QUALITY", &raw, 1, 100)? as u8,
            None => defaults.quality,
        };

        Ok(Config {
            storage: StorageConfig {
                upload_bucket: required("UPLOAD_BUCKET_NAME")?,
                resize_bucket: required("RESIZE_BUCKET_NAME")?,
            },
            table: TableConfig {
                name: required("TABLE_NAME")?,
                region: lookup("REGION")
                    .filter(|v| !v.trim().is_empty())
                    .unwrap_or_else(|| DEFAULT_REGION.to_string()),
            },
            thumbnail: ThumbnailConfig {
                max_dimension,
                quality,
            },
        })
    }
}

fn parse_bounded(name: &'static str, raw: &str, min: u32, max: u32) -> Result<u32, ConfigError> {
    let invalid = |reason: String| ConfigError::Invalid {
        name,
        value: raw.to_string(),
        reason,
    };

    let value: u32 = raw.trim().parse().map_err(|e| invalid(format!("{e}")))?;
    if !(min..=max).contains(&value) {
        return Err(invalid(format!("must be between {min} and {max}")));
    }
    Ok(value)
}
