//! Thumbnail generation service
//!
//! This module provides thumbnail generation capabilities:
//! - Image processor for resizing and encoding
//! - Service for coordinating download, thumbnail upload and metadata

pub mod processor;
pub mod service;

pub use processor::{ThumbnailConfig, ThumbnailProcessor, ThumbnailResult};
pub use service::{ThumbnailService, ThumbnailServiceConfig};
