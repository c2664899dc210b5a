// pixresize/src/install/windows.rs
use super::{InstallLayout, PlatformIntegrator, StepOutcome};
use crate::core::{PixresizeError, Result};
use std::io::ErrorKind;
use winreg::enums::HKEY_CURRENT_USER;
use winreg::RegKey;

/// Adds a "Use pixresize here" entry to the folder background context menu.
pub struct WindowsIntegrator {
    root: RegKey,
}

impl WindowsIntegrator {
    pub fn new() -> Self {
        Self {
            root: RegKey::predef(HKEY_CURRENT_USER),
        }
    }
}

impl Default for WindowsIntegrator {
    fn default() -> Self {
        Self::new()
    }
}

fn registry_error(action: &'static str, key: &str, source: std::io::Error) -> PixresizeError {
    PixresizeError::Registry {
        action,
        key: format!(r"HKEY_CURRENT_USER\{}", key),
        source,
    }
}

impl PlatformIntegrator for WindowsIntegrator {
    fn describe(&self) -> String {
        "folder context menu entry".to_string()
    }

    fn integrate(&self, layout: &InstallLayout) -> Result<StepOutcome> {
        let entry = layout.shell_menu_entry();
        log::info!("Adding registry keys under {}", entry.key);

        let (key, _) = self
            .root
            .create_subkey(&entry.key)
            .map_err(|e| registry_error("create", &entry.key, e))?;
        key.set_value("", &entry.label)
            .map_err(|e| registry_error("set label on", &entry.key, e))?;
        key.set_value("Icon", &entry.icon)
            .map_err(|e| registry_error("set icon on", &entry.key, e))?;

        let (command, _) = key
            .create_subkey("command")
            .map_err(|e| registry_error("create", &entry.command_key, e))?;
        command
            .set_value("", &entry.command)
            .map_err(|e| registry_error("set command on", &entry.command_key, e))?;

        Ok(StepOutcome::Done)
    }

    fn revert(&self, layout: &InstallLayout) -> Result<StepOutcome> {
        let entry = layout.shell_menu_entry();
        log::info!("Removing registry keys under {}", entry.key);

        // Child first: the parent cannot be deleted while it has subkeys.
        for key in [&entry.command_key, &entry.key] {
            match self.root.delete_subkey(key) {
                Ok(()) => {}
                Err(e) if e.kind() == ErrorKind::NotFound => {
                    log::debug!("Registry key {} not found", key);
                    if key == &entry.key {
                        return Ok(StepOutcome::NotInstalled);
                    }
                }
                Err(e) => return Err(registry_error("delete", key, e)),
            }
        }

        Ok(StepOutcome::Done)
    }
}
