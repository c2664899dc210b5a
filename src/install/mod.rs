// pixresize/src/install/mod.rs
//! Copying the running binary to a per-user location and hooking it into the shell.
//!
//! There is no install manifest. `install` and `uninstall` both start from
//! [`InstallLayout::derive`], and every step of `uninstall` treats a missing target as
//! "not installed" so it can be run on a partial or already reverted installation.
//! Steps that succeeded before a failure are not rolled back.
mod layout;
mod linux;
mod platform;
#[cfg(windows)]
mod windows;

pub use layout::{InstallLayout, RcBlock, ShellMenuEntry, UserDirs, APP_NAME};
pub use linux::LinuxIntegrator;
pub use platform::{current_platform, Platform};
#[cfg(windows)]
pub use windows::WindowsIntegrator;

use crate::core::{PixresizeError, Result};
use std::fs;
use std::io::ErrorKind;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepOutcome {
    Done,
    /// Nothing to do, the target state was already there.
    AlreadyPresent,
    /// Nothing to remove.
    NotInstalled,
}

/// Platform half of an installation: whatever makes the installed binary reachable.
pub trait PlatformIntegrator {
    fn describe(&self) -> String;

    fn integrate(&self, layout: &InstallLayout) -> Result<StepOutcome>;

    /// Exact inverse of [`PlatformIntegrator::integrate`].
    fn revert(&self, layout: &InstallLayout) -> Result<StepOutcome>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InstallReport {
    pub binary: StepOutcome,
    pub integration: StepOutcome,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UninstallReport {
    pub binary: StepOutcome,
    pub integration: StepOutcome,
}

impl UninstallReport {
    pub fn was_installed(&self) -> bool {
        self.binary == StepOutcome::Done || self.integration == StepOutcome::Done
    }
}

pub struct Installer {
    layout: InstallLayout,
    integrator: Box<dyn PlatformIntegrator>,
}

impl Installer {
    pub fn new(layout: InstallLayout, integrator: Box<dyn PlatformIntegrator>) -> Self {
        Self { layout, integrator }
    }

    /// Installer for the running system and the current user.
    pub fn for_host() -> Result<Self> {
        let platform = current_platform().ensure_supported()?;
        Self::for_platform(platform, UserDirs::detect()?)
    }

    /// Fails before touching anything when `platform` has no integration in this build.
    pub fn for_platform(platform: Platform, dirs: UserDirs) -> Result<Self> {
        let layout = InstallLayout::derive(platform, &dirs)?;
        let integrator: Box<dyn PlatformIntegrator> = match platform {
            Platform::Linux => Box::new(LinuxIntegrator::new(dirs.home)),
            #[cfg(windows)]
            Platform::Windows => Box::new(WindowsIntegrator::new()),
            other => return Err(PixresizeError::UnsupportedPlatform(other.to_string())),
        };

        Ok(Self::new(layout, integrator))
    }

    pub fn layout(&self) -> &InstallLayout {
        &self.layout
    }

    /// Copies `executable` into the install directory and adds the shell integration.
    pub fn install(&self, executable: &Path) -> Result<InstallReport> {
        check_deployable(executable)?;

        log::info!("Copying executable file to {}", self.layout.binary_path.display());
        let binary = self.copy_binary(executable)?;
        log::info!("Executable file in place");

        log::info!("Adding {}", self.integrator.describe());
        let integration = self.integrator.integrate(&self.layout)?;

        Ok(InstallReport {
            binary,
            integration,
        })
    }

    pub fn uninstall(&self) -> Result<UninstallReport> {
        log::info!("Removing executable file {}", self.layout.binary_path.display());
        let binary = self.remove_binary()?;
        if binary == StepOutcome::NotInstalled {
            log::warn!("Executable file not found, maybe app is not installed?");
        }

        log::info!("Removing {}", self.integrator.describe());
        let integration = self.integrator.revert(&self.layout)?;
        if integration == StepOutcome::NotInstalled {
            log::warn!("Shell integration not found, maybe app is not installed?");
        }

        Ok(UninstallReport {
            binary,
            integration,
        })
    }

    fn copy_binary(&self, executable: &Path) -> Result<StepOutcome> {
        let dir = &self.layout.install_dir;
        let target = &self.layout.binary_path;

        fs::create_dir_all(dir).map_err(|e| PixresizeError::fs("create", dir, e))?;

        if is_same_file(executable, target) {
            log::info!("Already running from {}", target.display());
            return Ok(StepOutcome::AlreadyPresent);
        }

        fs::copy(executable, target).map_err(|e| PixresizeError::fs("copy", executable, e))?;
        make_executable(target)?;
        Ok(StepOutcome::Done)
    }

    fn remove_binary(&self) -> Result<StepOutcome> {
        match self.layout.owned_dir() {
            Some(dir) => {
                // Recursive removal is only ever aimed at the application's own folder.
                if dir.file_name().and_then(|n| n.to_str()) != Some(APP_NAME) {
                    return Err(PixresizeError::PreconditionFailed(format!(
                        "refusing to remove {}",
                        dir.display()
                    )));
                }
                match fs::remove_dir_all(dir) {
                    Ok(()) => Ok(StepOutcome::Done),
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(StepOutcome::NotInstalled),
                    Err(e) => Err(PixresizeError::fs("remove", dir, e)),
                }
            }
            None => {
                let target = &self.layout.binary_path;
                match fs::remove_file(target) {
                    Ok(()) => {
                        self.prune_shared_dirs();
                        Ok(StepOutcome::Done)
                    }
                    Err(e) if e.kind() == ErrorKind::NotFound => Ok(StepOutcome::NotInstalled),
                    Err(e) => Err(PixresizeError::fs("remove", target, e)),
                }
            }
        }
    }

    /// Removes the directories `copy_binary` may have created, as long as they are empty.
    fn prune_shared_dirs(&self) {
        for dir in self.layout.shared_dirs() {
            match fs::remove_dir(dir) {
                Ok(()) => log::debug!("Removed empty directory {}", dir.display()),
                Err(e) if e.kind() == ErrorKind::NotFound => continue,
                Err(e) => {
                    if e.kind() != ErrorKind::DirectoryNotEmpty {
                        log::debug!("Keeping {}: {}", dir.display(), e);
                    }
                    break;
                }
            }
        }
    }
}

/// The running program must be the compiled `pixresize` binary itself.
///
/// Test harnesses and renamed copies are refused so the installed file is always
/// the tool and nothing else.
pub fn check_deployable(executable: &Path) -> Result<()> {
    let metadata = fs::metadata(executable).map_err(|e| {
        PixresizeError::PreconditionFailed(format!(
            "cannot read executable {}: {}",
            executable.display(),
            e
        ))
    })?;

    if !metadata.is_file() {
        return Err(PixresizeError::PreconditionFailed(format!(
            "{} is not a file",
            executable.display()
        )));
    }

    let stem = executable.file_stem().and_then(|s| s.to_str()).unwrap_or("");
    if !stem.eq_ignore_ascii_case(APP_NAME) {
        return Err(PixresizeError::PreconditionFailed(format!(
            "{} is not a {} binary",
            executable.display(),
            APP_NAME
        )));
    }

    Ok(())
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

#[cfg(unix)]
fn make_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| PixresizeError::fs("set permissions on", path, e))
}

#[cfg(not(unix))]
fn make_executable(_path: &Path) -> Result<()> {
    Ok(())
}
