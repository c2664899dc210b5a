pub mod cli;
mod core;
pub mod install;
mod processors;
mod utils;

pub use cli::{Algorithm, Cli, Mode};
pub use self::core::{
    BackupOutcome, ErrorPolicy, FileOutcome, ImageProcessor, PixresizeError,
    ResizeAlgorithm, ResizeConfig, ResizeSummary, Result, BACKUP_DIR, DEFAULT_WIDTH,
};
pub use install::{
    current_platform, InstallLayout, InstallReport, Installer, LinuxIntegrator, Platform,
    PlatformIntegrator, StepOutcome, UninstallReport, UserDirs,
};
pub use processors::{BackupManager, BackupReport, BatchResizer, Compressor, Loader, Resizer};
pub use utils::{format_file_size, is_supported_format, list_images, IMAGE_EXTENSIONS};

pub mod prelude {
    pub use crate::{
        BackupManager, BatchResizer, Installer, Platform, ResizeConfig, ResizeSummary,
    };
}
