// pixresize/src/core/processor.rs
use super::{ResizeConfig, Result};
use crate::processors::{Compressor, Loader, Resizer};
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOutcome {
    Resized { from: (u32, u32), to: (u32, u32) },
    /// Already at the requested size; the file was not rewritten.
    Unchanged((u32, u32)),
}

/// Resizes one image file in place.
pub struct ImageProcessor {
    width: u32,
    loader: Loader,
    resizer: Resizer,
    compressor: Compressor,
}

impl ImageProcessor {
    pub fn new(config: &ResizeConfig) -> Self {
        Self {
            width: config.width,
            loader: Loader::new(),
            resizer: Resizer::new(config.algorithm),
            compressor: Compressor::new(config.quality),
        }
    }

    pub fn process<P: AsRef<Path>>(&self, path: P) -> Result<FileOutcome> {
        let path = path.as_ref();

        let format = self.loader.detect_format(path)?;
        let image = self.loader.load(path)?;
        let from = (image.width(), image.height());
        let to = Resizer::target_dimensions(path, from.0, from.1, self.width)?;

        match self.resizer.resize(&image, to.0, to.1) {
            Some(resized) => {
                self.compressor.save_with_format(&resized, path, format)?;
                Ok(FileOutcome::Resized { from, to })
            }
            None => Ok(FileOutcome::Unchanged(from)),
        }
    }
}
