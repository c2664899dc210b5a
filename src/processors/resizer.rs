// pixresize/src/processors/resizer.rs
use crate::core::{PixresizeError, ResizeAlgorithm, Result};
use image::{imageops::FilterType, DynamicImage};
use std::path::Path;

/// Computes aspect-correct target sizes and applies the scaling filter.
#[derive(Debug, Clone, Copy)]
pub struct Resizer {
    algorithm: ResizeAlgorithm,
}

impl Resizer {
    pub fn new(algorithm: ResizeAlgorithm) -> Self {
        Self { algorithm }
    }

    /// Target size for an image of `orig_width`x`orig_height` scaled to `target_width`.
    ///
    /// The height is `round(target_width * orig_height / orig_width)`, never below one
    /// pixel. A zero source dimension cannot be scaled and is reported against `path`.
    pub fn target_dimensions(
        path: &Path,
        orig_width: u32,
        orig_height: u32,
        target_width: u32,
    ) -> Result<(u32, u32)> {
        if orig_width == 0 || orig_height == 0 {
            return Err(PixresizeError::InvalidDimensions {
                path: path.to_path_buf(),
                width: orig_width,
                height: orig_height,
            });
        }

        if target_width == 0 {
            return Err(PixresizeError::InvalidParameter(
                "Target width must be positive".to_string(),
            ));
        }

        if target_width == orig_width {
            return Ok((orig_width, orig_height));
        }

        let height = (f64::from(target_width) * f64::from(orig_height) / f64::from(orig_width))
            .round() as u32;

        Ok((target_width, height.max(1)))
    }

    /// Scales `image` to exactly `width`x`height`, or returns `None` when it already has that size.
    pub fn resize(&self, image: &DynamicImage, width: u32, height: u32) -> Option<DynamicImage> {
        if width == image.width() && height == image.height() {
            log::debug!("Image dimensions unchanged, skipping resize");
            return None;
        }

        if width > image.width() {
            log::debug!(
                "Upscaling from {}x{} to {}x{}",
                image.width(),
                image.height(),
                width,
                height
            );
        } else {
            log::debug!(
                "Resizing image from {}x{} to {}x{}",
                image.width(),
                image.height(),
                width,
                height
            );
        }

        Some(image.resize_exact(width, height, self.filter_type()))
    }

    fn filter_type(&self) -> FilterType {
        match self.algorithm {
            ResizeAlgorithm::Nearest => FilterType::Nearest,
            ResizeAlgorithm::Bilinear => FilterType::Triangle,
            ResizeAlgorithm::Bicubic => FilterType::CatmullRom,
            ResizeAlgorithm::Lanczos3 => FilterType::Lanczos3,
        }
    }
}

impl Default for Resizer {
    fn default() -> Self {
        Self::new(ResizeAlgorithm::Lanczos3)
    }
}
