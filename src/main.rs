use anyhow::{Context, Result};
use clap::Parser;
use log::LevelFilter;
use pixresize::{
    BackupOutcome, BatchResizer, Cli, Installer, Mode, PixresizeError, ResizeSummary,
    StepOutcome,
};
use std::io::{self, BufRead, IsTerminal, Write};

fn main() -> Result<()> {
    let cli = Cli::parse();

    env_logger::Builder::new()
        .filter_level(if cli.verbose {
            LevelFilter::Debug
        } else {
            LevelFilter::Info
        })
        .init();

    println!(
        "{} {}, type -h or --help to see more information.",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    );

    match cli.mode() {
        Mode::Install => process_install(),
        Mode::Uninstall => process_uninstall(),
        Mode::Resize => {
            let result = process_resize(&cli);
            if !cli.no_wait && io::stdin().is_terminal() {
                if let Err(e) = &result {
                    eprintln!("Error: {:#}", e);
                }
                wait_for_enter();
                if result.is_err() {
                    std::process::exit(1);
                }
            }
            result
        }
    }
}

fn process_resize(cli: &Cli) -> Result<()> {
    let dir = std::env::current_dir().context("cannot determine the working directory")?;
    let resizer = BatchResizer::new(cli.resize_config())?;

    let summary = match resizer.resize_all(&dir) {
        Err(PixresizeError::BackupFailed(cause)) if confirm_without_backup(&cause) => {
            let mut config = resizer.config().clone();
            config.continue_on_backup_failure = true;
            BatchResizer::new(config)?.resize_all(&dir)?
        }
        other => other?,
    };

    print_summary(&summary);
    Ok(())
}

fn print_summary(summary: &ResizeSummary) {
    if summary.is_empty() {
        println!("No images to process found.");
        return;
    }

    if let BackupOutcome::FailedIgnored(reason) = &summary.backup {
        println!("Warning: resized without a backup ({})", reason);
    }

    for (path, reason) in &summary.failed {
        println!("Failed: {} ({})", path.display(), reason);
    }

    println!(
        "Processing finished: {} resized, {} already at size, {} failed.",
        summary.resized,
        summary.unchanged,
        summary.failed.len()
    );
}

/// Asks whether to resize without a backup; only an interactive `y` says yes.
fn confirm_without_backup(cause: &PixresizeError) -> bool {
    eprintln!("Error: unable to create backup: {}", cause);
    if !io::stdin().is_terminal() {
        return false;
    }

    print!("Do you want to proceed to next step? [y/n]: ");
    let _ = io::stdout().flush();

    let mut answer = String::new();
    match io::stdin().lock().read_line(&mut answer) {
        Ok(_) => answer.trim().eq_ignore_ascii_case("y"),
        Err(_) => false,
    }
}

fn wait_for_enter() {
    print!("Press enter to exit...");
    let _ = io::stdout().flush();
    let mut line = String::new();
    let _ = io::stdin().lock().read_line(&mut line);
}

fn process_install() -> Result<()> {
    println!("Installing {}...", env!("CARGO_PKG_NAME"));

    let installer = Installer::for_host()?;
    let executable = std::env::current_exe().context("cannot locate the running executable")?;
    let report = installer
        .install(&executable)
        .context("installation did not complete")?;

    if report.binary == StepOutcome::AlreadyPresent {
        println!("Executable already installed.");
    }
    if report.integration == StepOutcome::AlreadyPresent {
        println!("Shell integration already present.");
    }
    println!(
        "Installed to {}.",
        installer.layout().binary_path.display()
    );
    Ok(())
}

fn process_uninstall() -> Result<()> {
    println!("Uninstalling {}...", env!("CARGO_PKG_NAME"));

    let installer = Installer::for_host()?;
    let report = installer
        .uninstall()
        .context("uninstallation did not complete")?;

    if report.was_installed() {
        println!("Uninstalled.");
    } else {
        println!("Nothing to remove, {} is not installed.", env!("CARGO_PKG_NAME"));
    }
    Ok(())
}
