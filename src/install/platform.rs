// pixresize/src/install/platform.rs
use crate::core::{PixresizeError, Result};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Platform {
    Windows,
    Linux,
    Unsupported(&'static str),
}

impl Platform {
    pub fn from_os(os: &'static str) -> Self {
        match os {
            "windows" => Platform::Windows,
            "linux" => Platform::Linux,
            other => Platform::Unsupported(other),
        }
    }

    /// Fails with [`PixresizeError::UnsupportedPlatform`] unless shell integration exists for this OS.
    pub fn ensure_supported(self) -> Result<Self> {
        match self {
            Platform::Unsupported(os) => Err(PixresizeError::UnsupportedPlatform(os.to_string())),
            supported => Ok(supported),
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Windows => f.write_str("windows"),
            Platform::Linux => f.write_str("linux"),
            Platform::Unsupported(os) => f.write_str(os),
        }
    }
}

pub fn current_platform() -> Platform {
    Platform::from_os(std::env::consts::OS)
}
