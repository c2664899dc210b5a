// pixresize/src/install/linux.rs
use super::{InstallLayout, PlatformIntegrator, RcBlock, StepOutcome};
use crate::core::{PixresizeError, Result};
use std::fs::{self, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::PathBuf;

const USER_STARTUP_FILES: [&str; 5] = [
    ".bashrc",
    ".profile",
    ".bash_profile",
    ".bash.login",
    ".bash_aliases",
];

const SYSTEM_STARTUP_FILES: [&str; 3] = ["etc/bash.bashrc", "etc/profile", "etc/environment"];

const SYSTEM_PROFILE_DIR: &str = "etc/profile.d";

/// Puts `~/.local/bin` on `PATH` through the user's `.bashrc`.
pub struct LinuxIntegrator {
    home: PathBuf,
    system_root: PathBuf,
}

impl LinuxIntegrator {
    pub fn new(home: impl Into<PathBuf>) -> Self {
        Self::with_system_root(home, "/")
    }

    /// `system_root` stands in for `/` when looking for system-wide startup files.
    pub fn with_system_root(home: impl Into<PathBuf>, system_root: impl Into<PathBuf>) -> Self {
        Self {
            home: home.into(),
            system_root: system_root.into(),
        }
    }

    /// The one file the marker block is written to and removed from.
    pub fn canonical_rc(&self) -> PathBuf {
        self.home.join(USER_STARTUP_FILES[0])
    }

    /// Startup files checked for an existing `PATH` export, in lookup order.
    pub fn startup_files(&self) -> Vec<PathBuf> {
        let mut files: Vec<PathBuf> = USER_STARTUP_FILES
            .iter()
            .map(|name| self.home.join(name))
            .collect();

        let (system, environment) = SYSTEM_STARTUP_FILES.split_at(2);
        files.extend(system.iter().map(|name| self.system_root.join(name)));

        if let Ok(entries) = fs::read_dir(self.system_root.join(SYSTEM_PROFILE_DIR)) {
            let mut profile_d: Vec<PathBuf> = entries
                .filter_map(|entry| entry.ok())
                .map(|entry| entry.path())
                .filter(|path| path.is_file())
                .collect();
            profile_d.sort();
            files.extend(profile_d);
        }

        files.extend(environment.iter().map(|name| self.system_root.join(name)));
        files
    }

    fn find_existing_export(&self) -> Option<PathBuf> {
        self.startup_files().into_iter().find(|path| {
            match fs::read_to_string(path) {
                Ok(content) => RcBlock::exports_local_bin(&content),
                Err(e) => {
                    if e.kind() != ErrorKind::NotFound {
                        log::debug!("Skipping {}: {}", path.display(), e);
                    }
                    false
                }
            }
        })
    }
}

impl PlatformIntegrator for LinuxIntegrator {
    fn describe(&self) -> String {
        format!("PATH entry in {}", self.canonical_rc().display())
    }

    fn integrate(&self, _layout: &InstallLayout) -> Result<StepOutcome> {
        if let Some(path) = self.find_existing_export() {
            log::info!("~/.local/bin is already on PATH via {}", path.display());
            return Ok(StepOutcome::AlreadyPresent);
        }

        let rc = self.canonical_rc();
        log::info!("Adding ~/.local/bin to PATH in {}", rc.display());

        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&rc)
            .map_err(|e| PixresizeError::fs("open", &rc, e))?;
        file.write_all(RcBlock::text().as_bytes())
            .map_err(|e| PixresizeError::fs("write", &rc, e))?;

        Ok(StepOutcome::Done)
    }

    fn revert(&self, _layout: &InstallLayout) -> Result<StepOutcome> {
        let rc = self.canonical_rc();
        log::info!("Removing PATH entry from {}", rc.display());

        let content = match fs::read_to_string(&rc) {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(StepOutcome::NotInstalled),
            Err(e) => return Err(PixresizeError::fs("read", &rc, e)),
        };

        match RcBlock::remove_from(&content) {
            // Only the block was there, so install created the file.
            Some(stripped) if stripped.is_empty() => {
                fs::remove_file(&rc).map_err(|e| PixresizeError::fs("remove", &rc, e))?;
                Ok(StepOutcome::Done)
            }
            Some(stripped) => {
                fs::write(&rc, stripped).map_err(|e| PixresizeError::fs("write", &rc, e))?;
                Ok(StepOutcome::Done)
            }
            None => Ok(StepOutcome::NotInstalled),
        }
    }
}
