// pixresize/src/processors/loader.rs
use crate::core::{PixresizeError, Result};
use image::{DynamicImage, GenericImageView, ImageFormat, ImageReader};
use std::path::Path;

#[derive(Clone)]
pub struct Loader {
    max_dimensions: (u32, u32),
}

impl Loader {
    pub fn new() -> Self {
        Self {
            max_dimensions: (100_000, 100_000),
        }
    }

    pub fn load(&self, path: &Path) -> Result<DynamicImage> {
        log::debug!("Loading image from: {}", path.display());

        self.validate_path(path)?;

        let image = ImageReader::open(path)
            .map_err(|e| PixresizeError::fs("open", path, e))?
            .with_guessed_format()
            .map_err(|e| PixresizeError::fs("read", path, e))?
            .decode()
            .map_err(|e| PixresizeError::codec(path, e))?;

        let (width, height) = image.dimensions();
        let (max_w, max_h) = self.max_dimensions;
        if width > max_w || height > max_h {
            return Err(PixresizeError::InvalidDimensions {
                path: path.to_path_buf(),
                width,
                height,
            });
        }

        log::debug!(
            "Loaded image: {}x{} pixels, color: {:?}",
            width,
            height,
            image.color()
        );

        Ok(image)
    }

    /// Output format follows the file extension, whatever its case.
    pub fn detect_format(&self, path: &Path) -> Result<ImageFormat> {
        ImageFormat::from_path(path).map_err(|e| PixresizeError::codec(path, e))
    }

    fn validate_path(&self, path: &Path) -> Result<()> {
        let metadata = path
            .metadata()
            .map_err(|e| PixresizeError::fs("inspect", path, e))?;

        if metadata.len() == 0 {
            return Err(PixresizeError::InvalidParameter(format!(
                "File is empty: {}",
                path.display()
            )));
        }

        Ok(())
    }
}

impl Default for Loader {
    fn default() -> Self {
        Self::new()
    }
}
