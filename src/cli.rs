// pixresize/src/cli.rs
use crate::core::{ErrorPolicy, ResizeAlgorithm, ResizeConfig, DEFAULT_WIDTH};
use clap::{Parser, ValueEnum};

#[derive(Parser, Debug)]
#[command(name = "pixresize", version)]
#[command(about = "Resize every image in the current directory, keeping a backup in ./bak")]
pub struct Cli {
    /// Copy the program to a per-user folder and add it to the shell
    #[arg(short, long, conflicts_with = "uninstall")]
    pub install: bool,

    /// Remove the installed program and its shell integration
    #[arg(short, long)]
    pub uninstall: bool,

    /// Target width in pixels; height follows the aspect ratio
    #[arg(short, long, default_value_t = DEFAULT_WIDTH, value_parser = clap::value_parser!(u32).range(1..=100_000))]
    pub width: u32,

    /// Scaling filter
    #[arg(short, long, value_enum, default_value_t = Algorithm::Lanczos3)]
    pub algorithm: Algorithm,

    /// JPEG quality (1-100)
    #[arg(short, long, default_value_t = 85, value_parser = clap::value_parser!(u8).range(1..=100))]
    pub quality: u8,

    /// Resize even if the backup could not be created
    #[arg(short, long)]
    pub yes: bool,

    /// Skip images that fail instead of stopping
    #[arg(short, long)]
    pub keep_going: bool,

    /// Exit without waiting for Enter
    #[arg(long)]
    pub no_wait: bool,

    /// Verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Resize,
    Install,
    Uninstall,
}

impl Cli {
    pub fn mode(&self) -> Mode {
        if self.install {
            Mode::Install
        } else if self.uninstall {
            Mode::Uninstall
        } else {
            Mode::Resize
        }
    }

    pub fn resize_config(&self) -> ResizeConfig {
        ResizeConfig {
            width: self.width,
            algorithm: self.algorithm.into(),
            quality: self.quality,
            on_codec_error: if self.keep_going {
                ErrorPolicy::Skip
            } else {
                ErrorPolicy::Abort
            },
            continue_on_backup_failure: self.yes,
            ..Default::default()
        }
    }
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum Algorithm {
    Nearest,
    Bilinear,
    Bicubic,
    Lanczos3,
}

impl From<Algorithm> for ResizeAlgorithm {
    fn from(algorithm: Algorithm) -> Self {
        match algorithm {
            Algorithm::Nearest => ResizeAlgorithm::Nearest,
            Algorithm::Bilinear => ResizeAlgorithm::Bilinear,
            Algorithm::Bicubic => ResizeAlgorithm::Bicubic,
            Algorithm::Lanczos3 => ResizeAlgorithm::Lanczos3,
        }
    }
}
