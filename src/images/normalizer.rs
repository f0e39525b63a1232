//! Best-effort image normalization before upload.
//!
//! Normalization bounds the image width and re-encodes it as JPEG at a fixed
//! quality. It is an optimization only: [`ImageNormalizer::normalize`] never
//! fails, and any internal error hands back the original handle unchanged.

use std::path::Path;

use anyhow::{Context, Result};
use async_trait::async_trait;
use image::codecs::jpeg::JpegEncoder;
use image::imageops::FilterType;
use image::DynamicImage;
use memoria_common::ImageHandle;

use crate::config::NormalizeConfig;

/// Encoding produced by normalization.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    #[default]
    Jpeg,
}

impl OutputFormat {
    /// File extension for this format.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Jpeg => "jpg",
        }
    }
}

/// Target dimensions and encoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NormalizeOptions {
    /// Images wider than this are scaled down, keeping the aspect ratio.
    pub max_width: u32,
    /// Encoder quality, 1-100.
    pub quality: u8,
    pub format: OutputFormat,
}

impl Default for NormalizeOptions {
    fn default() -> Self {
        Self {
            max_width: 1200,
            quality: 80,
            format: OutputFormat::Jpeg,
        }
    }
}

impl From<&NormalizeConfig> for NormalizeOptions {
    fn from(config: &NormalizeConfig) -> Self {
        Self {
            max_width: config.max_width,
            quality: config.quality,
            format: OutputFormat::Jpeg,
        }
    }
}

/// Resizes and re-encodes images.
#[async_trait]
pub trait ImageNormalizer: Send + Sync {
    /// Normalize `image`. Must return the original handle on any failure.
    async fn normalize(&self, image: &ImageHandle, options: &NormalizeOptions) -> ImageHandle;
}

/// Normalizer backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct JpegNormalizer;

impl JpegNormalizer {
    pub fn new() -> Self {
        Self
    }

    async fn try_normalize(
        &self,
        image: &ImageHandle,
        options: &NormalizeOptions,
    ) -> Result<ImageHandle> {
        let data = image
            .read_bytes()
            .await
            .context("Failed to read image for normalization")?;

        let task_options = options.clone();
        let encoded = tokio::task::spawn_blocking(move || encode_jpeg(&data, &task_options))
            .await
            .context("Normalization task failed")??;

        let file_name = Path::new(&image.file_name())
            .with_extension(options.format.extension())
            .to_string_lossy()
            .to_string();

        Ok(ImageHandle::encoded(encoded, file_name))
    }
}

#[async_trait]
impl ImageNormalizer for JpegNormalizer {
    async fn normalize(&self, image: &ImageHandle, options: &NormalizeOptions) -> ImageHandle {
        match self.try_normalize(image, options).await {
            Ok(normalized) => {
                tracing::debug!(
                    "Normalized {} to max width {}",
                    image.file_name(),
                    options.max_width
                );
                normalized
            }
            Err(e) => {
                tracing::warn!("Image normalization failed, uploading original: {:#}", e);
                image.clone()
            }
        }
    }
}

/// Normalizer that leaves images untouched.
#[derive(Debug, Clone, Copy, Default)]
pub struct PassthroughNormalizer;

#[async_trait]
impl ImageNormalizer for PassthroughNormalizer {
    async fn normalize(&self, image: &ImageHandle, _options: &NormalizeOptions) -> ImageHandle {
        image.clone()
    }
}

/// Decode `data`, bound its width, and encode it as JPEG.
///
/// Images no wider than `max_width` keep their dimensions; wider ones are
/// scaled down proportionally. Alpha is dropped since JPEG cannot carry it.
pub fn encode_jpeg(data: &[u8], options: &NormalizeOptions) -> Result<Vec<u8>> {
    let img = image::load_from_memory(data).context("Failed to decode image data")?;

    let img = if img.width() > options.max_width {
        img.resize(options.max_width, u32::MAX, FilterType::Lanczos3)
    } else {
        img
    };

    let rgb = DynamicImage::ImageRgb8(img.to_rgb8());
    let mut buf = Vec::new();
    let encoder = JpegEncoder::new_with_quality(&mut buf, options.quality);
    rgb.write_with_encoder(encoder)
        .context("Failed to encode image as JPEG")?;

    Ok(buf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        let img = image::RgbaImage::from_pixel(width, height, image::Rgba([10, 120, 200, 128]));
        let mut buf = Cursor::new(Vec::new());
        DynamicImage::ImageRgba8(img)
            .write_to(&mut buf, image::ImageFormat::Png)
            .unwrap();
        buf.into_inner()
    }

    #[test]
    fn test_default_options() {
        let options = NormalizeOptions::default();
        assert_eq!(options.max_width, 1200);
        assert_eq!(options.quality, 80);
        assert_eq!(options.format, OutputFormat::Jpeg);
    }

    #[test]
    fn test_encode_downscales_wide_image() {
        let options = NormalizeOptions {
            max_width: 100,
            ..Default::default()
        };
        let out = encode_jpeg(&png_bytes(400, 200), &options).unwrap();

        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!(decoded.width(), 100);
        assert_eq!(decoded.height(), 50);
        assert_eq!(image::guess_format(&out).unwrap(), image::ImageFormat::Jpeg);
    }

    #[test]
    fn test_encode_never_upscales() {
        let options = NormalizeOptions {
            max_width: 100,
            ..Default::default()
        };
        let out = encode_jpeg(&png_bytes(40, 30), &options).unwrap();

        let decoded = image::load_from_memory(&out).unwrap();
        assert_eq!((decoded.width(), decoded.height()), (40, 30));
    }

    #[test]
    fn test_encode_rejects_garbage() {
        assert!(encode_jpeg(b"definitely not an image", &NormalizeOptions::default()).is_err());
    }

    #[tokio::test]
    async fn test_normalize_produces_encoded_jpeg() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("photo.png");
        std::fs::write(&path, png_bytes(64, 64)).unwrap();

        let original = ImageHandle::file(&path);
        let normalized = JpegNormalizer::new()
            .normalize(&original, &NormalizeOptions::default())
            .await;

        assert_ne!(normalized, original);
        assert_eq!(normalized.file_name(), "photo.jpg");
        let bytes = normalized.read_bytes().await.unwrap();
        assert_eq!(image::guess_format(&bytes).unwrap(), image::ImageFormat::Jpeg);
    }

    #[tokio::test]
    async fn test_normalize_failure_returns_original() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.jpg");
        std::fs::write(&path, b"corrupt").unwrap();

        let original = ImageHandle::file(&path);
        let normalized = JpegNormalizer::new()
            .normalize(&original, &NormalizeOptions::default())
            .await;
        assert_eq!(normalized, original);
    }

    #[tokio::test]
    async fn test_normalize_missing_file_returns_original() {
        let original = ImageHandle::file("/no/such/photo.jpg");
        let normalized = JpegNormalizer::new()
            .normalize(&original, &NormalizeOptions::default())
            .await;
        assert_eq!(normalized, original);
    }

    #[tokio::test]
    async fn test_passthrough() {
        let original = ImageHandle::encoded(vec![1u8, 2, 3], "a.jpg");
        let out = PassthroughNormalizer
            .normalize(&original, &NormalizeOptions::default())
            .await;
        assert_eq!(out, original);
    }
}
