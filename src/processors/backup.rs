// pixresize/src/processors/backup.rs
use crate::core::{PixresizeError, Result};
use crate::utils::{format_file_size, list_images};
use std::fs::{self, File, FileTimes};
use std::path::{Path, PathBuf};

#[derive(Debug)]
pub struct BackupReport {
    pub dir: PathBuf,
    pub copied: Vec<PathBuf>,
}

/// Copies the current image set of a directory into a sibling backup folder.
pub struct BackupManager {
    backup_dir_name: String,
}

impl BackupManager {
    pub fn new(backup_dir_name: impl Into<String>) -> Self {
        Self {
            backup_dir_name: backup_dir_name.into(),
        }
    }

    pub fn backup_dir(&self, dir: &Path) -> PathBuf {
        dir.join(&self.backup_dir_name)
    }

    /// Creates the backup folder if needed and copies every image currently in `dir` into it.
    ///
    /// Existing backups with the same name are overwritten. The first failing copy
    /// stops the run and is returned.
    pub fn make_backups(&self, dir: &Path) -> Result<BackupReport> {
        let backup_dir = self.backup_dir(dir);
        log::info!("Creating original images backup in {}", backup_dir.display());

        if !backup_dir.is_dir() {
            fs::create_dir(&backup_dir)
                .map_err(|e| PixresizeError::fs("create backup directory", &backup_dir, e))?;
        }

        let mut copied = Vec::new();
        let mut bytes = 0;
        for source in list_images(dir)? {
            let Some(file_name) = source.file_name() else {
                continue;
            };
            let target = backup_dir.join(file_name);
            bytes += copy_preserving_times(&source, &target)?;
            log::debug!("Backed up {} -> {}", source.display(), target.display());
            copied.push(target);
        }

        log::info!(
            "Backup created ({} files, {})",
            copied.len(),
            format_file_size(bytes)
        );
        Ok(BackupReport {
            dir: backup_dir,
            copied,
        })
    }
}

impl Default for BackupManager {
    fn default() -> Self {
        Self::new(crate::core::BACKUP_DIR)
    }
}

/// `fs::copy` keeps permissions; access and modification times are carried over here.
fn copy_preserving_times(source: &Path, target: &Path) -> Result<u64> {
    let bytes = fs::copy(source, target).map_err(|e| PixresizeError::fs("copy", source, e))?;

    let metadata = fs::metadata(source).map_err(|e| PixresizeError::fs("inspect", source, e))?;
    let mut times = FileTimes::new();
    if let Ok(modified) = metadata.modified() {
        times = times.set_modified(modified);
    }
    if let Ok(accessed) = metadata.accessed() {
        times = times.set_accessed(accessed);
    }

    open_for_times(target)
        .and_then(|file| file.set_times(times))
        .map_err(|e| PixresizeError::fs("set timestamps on", target, e))?;

    Ok(bytes)
}

// A read-only descriptor is enough for the owner on Unix, which keeps read-only sources working.
#[cfg(unix)]
fn open_for_times(path: &Path) -> std::io::Result<File> {
    File::open(path)
}

#[cfg(not(unix))]
fn open_for_times(path: &Path) -> std::io::Result<File> {
    File::options().write(true).open(path)
}
