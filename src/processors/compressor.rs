// pixresize/src/processors/compressor.rs
use crate::core::{PixresizeError, Result};
use image::codecs::jpeg::JpegEncoder;
use image::{DynamicImage, ImageFormat};
use std::io::Cursor;
use std::path::Path;

/// Re-encodes images in the format they were read from.
pub struct Compressor {
    quality: u8,
}

impl Compressor {
    pub fn new(quality: u8) -> Self {
        Self {
            quality: quality.clamp(1, 100),
        }
    }

    /// Encodes `image` fully in memory, then replaces the file at `path`.
    pub fn save_with_format(
        &self,
        image: &DynamicImage,
        path: &Path,
        format: ImageFormat,
    ) -> Result<u64> {
        log::debug!(
            "Saving image to {} with format {:?}, quality: {}",
            path.display(),
            format,
            self.quality
        );

        let data = self
            .compress_to_bytes(image, format)
            .map_err(|e| PixresizeError::codec(path, e))?;

        std::fs::write(path, &data).map_err(|e| PixresizeError::fs("write", path, e))?;

        log::debug!("Saved image: {} ({} bytes)", path.display(), data.len());
        Ok(data.len() as u64)
    }

    pub fn compress_to_bytes(
        &self,
        image: &DynamicImage,
        format: ImageFormat,
    ) -> std::result::Result<Vec<u8>, image::ImageError> {
        let mut buffer = Cursor::new(Vec::new());

        match format {
            ImageFormat::Jpeg => {
                let encoder = JpegEncoder::new_with_quality(&mut buffer, self.quality);
                // JPEG has no alpha channel
                if image.color().has_alpha() {
                    DynamicImage::ImageRgb8(image.to_rgb8()).write_with_encoder(encoder)?;
                } else {
                    image.write_with_encoder(encoder)?;
                }
            }
            _ => {
                image.write_to(&mut buffer, format)?;
            }
        }

        Ok(buffer.into_inner())
    }
}

impl Default for Compressor {
    fn default() -> Self {
        Self::new(85)
    }
}
