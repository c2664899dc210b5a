// pixresize/src/utils/mod.rs
use crate::core::{PixresizeError, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Extensions picked up by the resize run.
pub const IMAGE_EXTENSIONS: [&str; 5] = ["bmp", "gif", "jpg", "jpeg", "png"];

/// Lists the image files directly inside `dir`.
///
/// Regular files and symlinks to them are returned, matched on their extension without
/// regard to case.
/// The order is whatever the directory listing yields. Nothing is cached, so every
/// call sees the directory as it is right now.
pub fn list_images(dir: &Path) -> Result<Vec<PathBuf>> {
    let mut images = Vec::new();

    for entry in WalkDir::new(dir).min_depth(1).max_depth(1) {
        let entry = entry.map_err(|e| {
            let source = e
                .into_io_error()
                .unwrap_or_else(|| std::io::Error::other("directory loop"));
            PixresizeError::fs("list", dir, source)
        })?;

        if entry.path().is_file() && is_supported_format(entry.path()) {
            images.push(entry.into_path());
        }
    }

    Ok(images)
}

pub fn is_supported_format(path: &Path) -> bool {
    get_file_extension(path)
        .map(|ext| IMAGE_EXTENSIONS.contains(&ext.as_str()))
        .unwrap_or(false)
}

pub fn get_file_extension(path: &Path) -> Option<String> {
    path.extension()
        .and_then(|ext| ext.to_str())
        .map(|s| s.to_lowercase())
}

pub fn format_file_size(bytes: u64) -> String {
    const UNITS: [&str; 6] = ["B", "KB", "MB", "GB", "TB", "PB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let base = 1024_f64;
    let bytes_f64 = bytes as f64;
    let exponent = ((bytes_f64.log10() / base.log10()).floor() as usize).min(UNITS.len() - 1);
    let size = bytes_f64 / base.powi(exponent as i32);

    format!("{:.2} {}", size, UNITS[exponent])
}
