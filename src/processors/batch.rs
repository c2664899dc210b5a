// pixresize/src/processors/batch.rs
use crate::core::{
    BackupOutcome, ErrorPolicy, FileOutcome, ImageProcessor, PixresizeError, ResizeConfig,
    ResizeSummary, Result,
};
use crate::processors::BackupManager;
use crate::utils::list_images;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::Path;

/// Backs up and resizes every image of a directory, one file at a time.
pub struct BatchResizer {
    config: ResizeConfig,
    show_progress: bool,
}

impl BatchResizer {
    pub fn new(config: ResizeConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            config,
            show_progress: true,
        })
    }

    pub fn with_progress(mut self, show: bool) -> Self {
        self.show_progress = show;
        self
    }

    pub fn config(&self) -> &ResizeConfig {
        &self.config
    }

    /// Resizes all images in `dir` to the configured width, in listing order.
    ///
    /// An empty directory is a no-op and no backup folder is created. A failing backup
    /// stops the run unless `continue_on_backup_failure` is set. A failing image stops
    /// the run under [`ErrorPolicy::Abort`]; files handled before it stay resized.
    pub fn resize_all(&self, dir: &Path) -> Result<ResizeSummary> {
        let found = list_images(dir)?.len();
        if found == 0 {
            log::warn!("No images found in {}", dir.display());
            return Ok(ResizeSummary::empty());
        }

        log::info!("{} files will be processed", found);

        let backup = self.backup(dir)?;

        // Listed again: the directory may have changed while backing up.
        let images = list_images(dir)?;
        let total = images.len();
        let pb = self.create_progress_bar(total);
        let processor = ImageProcessor::new(&self.config);

        let mut summary = ResizeSummary {
            found: total,
            backup,
            ..ResizeSummary::empty()
        };

        for (index, path) in images.iter().enumerate() {
            let name = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_else(|| path.display().to_string());
            pb.set_message(name.clone());
            pb.suspend(|| println!("Resizing {} ({} of {})", name, index + 1, total));

            match processor.process(path) {
                Ok(FileOutcome::Resized { from, to }) => {
                    log::debug!("{}: {}x{} -> {}x{}", name, from.0, from.1, to.0, to.1);
                    summary.resized += 1;
                }
                Ok(FileOutcome::Unchanged((w, h))) => {
                    log::debug!("{}: already {}x{}", name, w, h);
                    summary.unchanged += 1;
                }
                Err(e) => match self.config.on_codec_error {
                    ErrorPolicy::Abort => {
                        pb.abandon_with_message(format!("Stopped at {}", name));
                        return Err(e);
                    }
                    ErrorPolicy::Skip => {
                        log::warn!("Skipping {}: {}", name, e);
                        summary.failed.push((path.clone(), e.to_string()));
                    }
                },
            }

            pb.inc(1);
        }

        pb.finish_with_message(format!(
            "Resized {} of {} images",
            summary.resized, summary.found
        ));

        Ok(summary)
    }

    fn backup(&self, dir: &Path) -> Result<BackupOutcome> {
        let manager = BackupManager::new(self.config.backup_dir.clone());
        match manager.make_backups(dir) {
            Ok(report) => Ok(BackupOutcome::Completed(report.copied.len())),
            Err(e) if self.config.continue_on_backup_failure => {
                log::warn!("Unable to create backup, continuing anyway: {}", e);
                Ok(BackupOutcome::FailedIgnored(e.to_string()))
            }
            Err(e) => {
                log::error!("Unable to create backup: {}", e);
                Err(PixresizeError::BackupFailed(Box::new(e)))
            }
        }
    }

    fn create_progress_bar(&self, total: usize) -> ProgressBar {
        if !self.show_progress {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new(total as u64);
        let style = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("#>-");
        pb.set_style(style);
        pb
    }
}
