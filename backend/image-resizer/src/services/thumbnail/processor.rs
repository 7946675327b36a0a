//! Thumbnail processor - generates thumbnails from original images
//!
//! Decodes an image, shrinks it to fit a square bounding box while keeping the
//! aspect ratio, and encodes the result as JPEG. Images already inside the box
//! are re-encoded at their original size, never upscaled.
//!
//! Uses `spawn_blocking` for CPU-intensive operations to avoid blocking the async runtime.

use crate::error::{HandlerError, Result};
use bytes::Bytes;
use image::imageops::FilterType;
use image::{DynamicImage, GenericImageView, ImageOutputFormat};
use serde::Deserialize;
use std::io::Cursor;
use std::sync::Arc;
use tracing::debug;

/// Configuration for thumbnail generation
#[derive(Clone, Debug, Deserialize)]
pub struct ThumbnailConfig {
    /// Maximum dimension (width or height) in pixels
    pub max_dimension: u32,
    /// JPEG quality (1-100)
    pub quality: u8,
}

impl Default for ThumbnailConfig {
    fn default() -> Self {
        Self {
            max_dimension: 128,
            quality: 75,
        }
    }
}

/// Result of thumbnail generation
#[derive(Debug)]
pub struct ThumbnailResult {
    /// The thumbnail image data as JPEG
    pub data: Bytes,
    /// Width of the thumbnail
    pub width: u32,
    /// Height of the thumbnail
    pub height: u32,
}

/// Thumbnail processor
pub struct ThumbnailProcessor {
    config: ThumbnailConfig,
}

impl ThumbnailProcessor {
    /// Create a new processor with the given configuration
    pub fn new(config: ThumbnailConfig) -> Self {
        Self { config }
    }

    /// Create a processor with default configuration
    pub fn with_defaults() -> Self {
        Self::new(ThumbnailConfig::default())
    }

    pub fn config(&self) -> &ThumbnailConfig {
        &self.config
    }

    /// Generate a thumbnail from the given image data (blocking version)
    ///
    /// **Note:** This method performs CPU-intensive operations and should not be called
    /// directly from async code. Use `generate_async` instead.
    pub fn generate(&self, original_data: &[u8]) -> Result<ThumbnailResult> {
        let img = image::load_from_memory(original_data)
            .map_err(|e| HandlerError::DecodeFailure(e.to_string()))?;

        let (orig_w, orig_h) = img.dimensions();
        debug!(
            original_width = orig_w,
            original_height = orig_h,
            "Processing image for thumbnail"
        );

        let (new_w, new_h) = self.calculate_dimensions(orig_w, orig_h);

        let thumbnail = if (new_w, new_h) == (orig_w, orig_h) {
            debug!("Image already within max dimensions, encoding as-is");
            img
        } else {
            img.resize_exact(new_w, new_h, FilterType::Triangle)
        };

        let data = self.encode_jpeg(&thumbnail)?;

        debug!(
            width = new_w,
            height = new_h,
            size = data.len(),
            "Thumbnail generated"
        );

        Ok(ThumbnailResult {
            data,
            width: new_w,
            height: new_h,
        })
    }

    /// Generate a thumbnail asynchronously using a blocking thread pool
    ///
    /// This method offloads the CPU-intensive image processing to a dedicated
    /// thread pool, preventing the async runtime from being blocked.
    pub async fn generate_async(self: Arc<Self>, original_data: Bytes) -> Result<ThumbnailResult> {
        tokio::task::spawn_blocking(move || self.generate(&original_data))
            .await
            .map_err(|e| HandlerError::EncodeFailure(format!("Thumbnail task panicked: {e}")))?
    }

    /// Calculate dimensions that fit the bounding box, keeping the aspect ratio
    fn calculate_dimensions(&self, width: u32, height: u32) -> (u32, u32) {
        let max_dim = self.config.max_dimension;

        if width <= max_dim && height <= max_dim {
            return (width, height);
        }

        if width > height {
            let ratio = max_dim as f64 / width as f64;
            (max_dim, ((height as f64 * ratio).round() as u32).max(1))
        } else {
            let ratio = max_dim as f64 / height as f64;
            (((width as f64 * ratio).round() as u32).max(1), max_dim)
        }
    }

    /// Encode image as baseline JPEG
    ///
    /// JPEG has no alpha channel and only 8-bit samples, so everything is
    /// flattened to RGB8 first.
    fn encode_jpeg(&self, img: &DynamicImage) -> Result<Bytes> {
        let rgb = DynamicImage::ImageRgb8(img.to_rgb8());

        let mut buf = Vec::new();
        let mut cursor = Cursor::new(&mut buf);

        rgb.write_to(&mut cursor, ImageOutputFormat::Jpeg(self.config.quality))
            .map_err(|e| HandlerError::EncodeFailure(e.to_string()))?;

        Ok(Bytes::from(buf))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = RgbaImage::from_pixel(width, height, Rgba([10, 200, 30, 128]));
        let mut buf = Vec::new();
        DynamicImage::ImageRgba8(img)
            .write_to(&mut Cursor::new(&mut buf), ImageOutputFormat::Png)
            .unwrap();
        buf
    }

    #[test]
    fn test_calculate_dimensions_landscape() {
        let processor = ThumbnailProcessor::with_defaults();
        let (w, h) = processor.calculate_dimensions(1200, 800);
        assert_eq!(w, 128);
        assert_eq!(h, 85);
    }

    #[test]
    fn test_calculate_dimensions_portrait() {
        let processor = ThumbnailProcessor::with_defaults();
        let (w, h) = processor.calculate_dimensions(800, 1200);
        assert_eq!(w, 85);
        assert_eq!(h, 128);
    }

    #[test]
    fn test_calculate_dimensions_square() {
        let processor = ThumbnailProcessor::with_defaults();
        let (w, h) = processor.calculate_dimensions(500, 500);
        assert_eq!(w, 128);
        assert_eq!(h, 128);
    }

    #[test]
    fn test_calculate_dimensions_never_upscales() {
        let processor = ThumbnailProcessor::with_defaults();
        assert_eq!(processor.calculate_dimensions(64, 32), (64, 32));
        assert_eq!(processor.calculate_dimensions(128, 10), (128, 10));
    }

    #[test]
    fn test_calculate_dimensions_extreme_aspect_keeps_one_pixel() {
        let processor = ThumbnailProcessor::with_defaults();
        assert_eq!(processor.calculate_dimensions(10_000, 3), (128, 1));
    }

    #[test]
    fn test_png_with_alpha_becomes_jpeg() {
        let processor = ThumbnailProcessor::with_defaults();
        let result = processor.generate(&png_bytes(300, 150)).unwrap();

        assert_eq!((result.width, result.height), (128, 64));
        assert_eq!(
            image::guess_format(&result.data).unwrap(),
            ImageFormat::Jpeg
        );
        let decoded = image::load_from_memory(&result.data).unwrap();
        assert_eq!(decoded.dimensions(), (128, 64));
    }

    #[test]
    fn test_undecodable_bytes_rejected() {
        let processor = ThumbnailProcessor::with_defaults();
        let err = processor.generate(b"definitely not an image").unwrap_err();
        assert_eq!(err.code(), "decode_failure");
    }

    #[tokio::test]
    async fn test_generate_async() {
        let processor = Arc::new(ThumbnailProcessor::new(ThumbnailConfig {
            max_dimension: 32,
            quality: 90,
        }));
        let result = processor
            .generate_async(Bytes::from(png_bytes(40, 80)))
            .await
            .unwrap();
        assert_eq!((result.width, result.height), (16, 32));
    }
}
