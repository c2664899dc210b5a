// pixresize/src/install/layout.rs
//! Everything install and uninstall need to agree on.
//!
//! Nothing about an installation is recorded on disk, so uninstall finds its targets by
//! deriving them again from the same constants. All of those derivations live here.
use super::Platform;
use crate::core::{PixresizeError, Result};
use regex::Regex;
use std::path::{Path, PathBuf};

pub const APP_NAME: &str = "pixresize";

/// Per-user registry tree for entries in the folder background context menu.
const SHELL_MENU_ROOT: &str = r"Software\Classes\Directory\Background\shell";

const RC_BEGIN: &str = "# >>> pixresize >>>";
const RC_END: &str = "# <<< pixresize <<<";
const RC_EXPORT: &str = r#"export PATH="$HOME/.local/bin:$PATH""#;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserDirs {
    pub home: PathBuf,
    /// `%LOCALAPPDATA%` on Windows.
    pub local_app_data: Option<PathBuf>,
}

impl UserDirs {
    pub fn detect() -> Result<Self> {
        let home = dirs::home_dir().ok_or_else(|| {
            PixresizeError::PreconditionFailed("cannot locate the home directory".to_string())
        })?;

        Ok(Self {
            home,
            local_app_data: dirs::data_local_dir(),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstallLayout {
    pub platform: Platform,
    pub install_dir: PathBuf,
    pub binary_path: PathBuf,
}

impl InstallLayout {
    pub fn derive(platform: Platform, dirs: &UserDirs) -> Result<Self> {
        let (install_dir, binary_name) = match platform.ensure_supported()? {
            Platform::Windows => {
                let base = dirs
                    .local_app_data
                    .clone()
                    .unwrap_or_else(|| dirs.home.join("AppData").join("Local"));
                (base.join(APP_NAME), format!("{}.exe", APP_NAME))
            }
            Platform::Linux => (dirs.home.join(".local").join("bin"), APP_NAME.to_string()),
            Platform::Unsupported(os) => {
                return Err(PixresizeError::UnsupportedPlatform(os.to_string()))
            }
        };

        let binary_path = install_dir.join(binary_name);
        Ok(Self {
            platform,
            install_dir,
            binary_path,
        })
    }

    /// Directory owned entirely by the application, removed as a whole on uninstall.
    ///
    /// Only Windows installs into a dedicated folder; `~/.local/bin` is shared.
    pub fn owned_dir(&self) -> Option<&Path> {
        match self.platform {
            Platform::Windows => Some(&self.install_dir),
            _ => None,
        }
    }

    /// Shared directories install may have created, innermost first.
    ///
    /// Uninstall removes each one only while it is empty.
    pub fn shared_dirs(&self) -> Vec<&Path> {
        match self.platform {
            Platform::Linux => self.install_dir.ancestors().take(2).collect(),
            _ => Vec::new(),
        }
    }

    pub fn shell_menu_entry(&self) -> ShellMenuEntry {
        let key = format!(r"{}\{}", SHELL_MENU_ROOT, APP_NAME);
        let binary = self.binary_path.display().to_string();
        ShellMenuEntry {
            command_key: format!(r"{}\command", key),
            key,
            label: format!("Use {} here", APP_NAME),
            icon: binary.clone(),
            command: format!("\"{}\"", binary),
        }
    }
}

/// Registry keys and values that put the tool in the folder background menu.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellMenuEntry {
    /// Relative to `HKEY_CURRENT_USER`.
    pub key: String,
    pub command_key: String,
    pub label: String,
    pub icon: String,
    pub command: String,
}

/// The delimited block appended to a shell startup file.
pub struct RcBlock;

impl RcBlock {
    /// Block as appended, starting with the newline that terminates the previous content.
    pub fn text() -> String {
        format!("\n{}\n{}\n{}\n", RC_BEGIN, RC_EXPORT, RC_END)
    }

    pub fn append_to(content: &str) -> String {
        format!("{}{}", content, Self::text())
    }

    /// Content with the block taken out, or `None` if it is not there.
    pub fn remove_from(content: &str) -> Option<String> {
        let pattern = Regex::new(&format!(
            r"(?s)\r?\n{}\r?\n.*?{}\r?\n?",
            regex::escape(RC_BEGIN),
            regex::escape(RC_END)
        ))
        .ok()?;

        if !pattern.is_match(content) {
            return None;
        }
        Some(pattern.replace(content, "").into_owned())
    }

    /// True when some uncommented line already adds `$HOME/.local/bin` to `PATH`.
    pub fn exports_local_bin(content: &str) -> bool {
        match Regex::new(r"(?m)^[^#\n]*PATH=.*(\$HOME|\$\{HOME\}|~)/\.local/bin") {
            Ok(pattern) => pattern.is_match(content),
            Err(_) => false,
        }
    }
}
