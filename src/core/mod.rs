// pixresize/src/core/mod.rs
pub mod processor;

use std::path::PathBuf;
use thiserror::Error;

pub use processor::{FileOutcome, ImageProcessor};

/// Width used when the caller does not ask for one.
pub const DEFAULT_WIDTH: u32 = 1200;

/// Name of the backup directory created next to the images.
pub const BACKUP_DIR: &str = "bak";

const MAX_DIMENSION: u32 = 100_000;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResizeAlgorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

/// What the pipeline does when a single image cannot be decoded, resized or saved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ErrorPolicy {
    /// Stop the batch at the first failing file.
    #[default]
    Abort,
    /// Record the failure and move on to the next file.
    Skip,
}

#[derive(Debug, Clone)]
pub struct ResizeConfig {
    pub width: u32,
    pub algorithm: ResizeAlgorithm,
    pub quality: u8,
    pub backup_dir: String,
    pub on_codec_error: ErrorPolicy,
    pub continue_on_backup_failure: bool,
}

impl Default for ResizeConfig {
    fn default() -> Self {
        Self {
            width: DEFAULT_WIDTH,
            algorithm: ResizeAlgorithm::Lanczos3,
            quality: 85,
            backup_dir: BACKUP_DIR.to_string(),
            on_codec_error: ErrorPolicy::Abort,
            continue_on_backup_failure: false,
        }
    }
}

impl ResizeConfig {
    pub fn with_width(width: u32) -> Self {
        Self {
            width,
            ..Default::default()
        }
    }

    pub fn validate(&self) -> Result<()> {
        if self.width == 0 {
            return Err(PixresizeError::InvalidParameter(
                "Width must be a positive number of pixels".to_string(),
            ));
        }

        if self.width > MAX_DIMENSION {
            return Err(PixresizeError::InvalidParameter(format!(
                "Width too large (max {} pixels)",
                MAX_DIMENSION
            )));
        }

        if self.quality == 0 || self.quality > 100 {
            return Err(PixresizeError::InvalidParameter(
                "Quality must be between 1 and 100".to_string(),
            ));
        }

        if self.backup_dir.is_empty()
            || self.backup_dir.contains(['/', '\\'])
            || self.backup_dir == "."
            || self.backup_dir == ".."
        {
            return Err(PixresizeError::InvalidParameter(format!(
                "Backup directory must be a plain directory name, got {:?}",
                self.backup_dir
            )));
        }

        Ok(())
    }
}

/// Result of the backup step of a resize run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackupOutcome {
    /// Nothing to back up, the step did not run.
    Skipped,
    Completed(usize),
    /// The backup failed and the caller chose to resize anyway.
    FailedIgnored(String),
}

#[derive(Debug)]
pub struct ResizeSummary {
    pub found: usize,
    pub resized: usize,
    pub unchanged: usize,
    pub failed: Vec<(PathBuf, String)>,
    pub backup: BackupOutcome,
}

impl ResizeSummary {
    pub fn empty() -> Self {
        Self {
            found: 0,
            resized: 0,
            unchanged: 0,
            failed: Vec::new(),
            backup: BackupOutcome::Skipped,
        }
    }

    /// No image was discovered in the working directory.
    pub fn is_empty(&self) -> bool {
        self.found == 0
    }

    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[derive(Error, Debug)]
pub enum PixresizeError {
    #[error("Unsupported platform: {0}")]
    UnsupportedPlatform(String),

    #[error("Cannot install: {0}")]
    PreconditionFailed(String),

    #[error("Failed to {action} {}: {source}", path.display())]
    Filesystem {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to {action} registry key {key}: {source}")]
    Registry {
        action: &'static str,
        key: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Image error in {}: {source}", path.display())]
    Codec {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("Invalid dimensions {width}x{height} in {}", path.display())]
    InvalidDimensions {
        path: PathBuf,
        width: u32,
        height: u32,
    },

    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    #[error("Backup failed: {0}")]
    BackupFailed(Box<PixresizeError>),
}

impl PixresizeError {
    pub fn fs(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Filesystem {
            action,
            path: path.into(),
            source,
        }
    }

    pub fn codec(path: impl Into<PathBuf>, source: image::ImageError) -> Self {
        Self::Codec {
            path: path.into(),
            source,
        }
    }

    /// Missing file, key or directory.
    pub fn is_not_found(&self) -> bool {
        match self {
            Self::Filesystem { source, .. } | Self::Registry { source, .. } => {
                source.kind() == std::io::ErrorKind::NotFound
            }
            _ => false,
        }
    }
}

pub type Result<T> = std::result::Result<T, PixresizeError>;
