#[cfg(test)]
mod tests {
    use assert_fs::prelude::*;
    use assert_fs::TempDir;
    use pixresize::{
        BackupOutcome, BatchResizer, ErrorPolicy, InstallLayout, Installer, LinuxIntegrator,
        PixresizeError, Platform, ResizeAlgorithm, ResizeConfig, StepOutcome, UserDirs,
    };
    use std::fs;
    use std::path::Path;

    fn config(width: u32) -> ResizeConfig {
        ResizeConfig {
            width,
            // Nearest keeps the 4K fixtures fast in debug builds
            algorithm: ResizeAlgorithm::Nearest,
            ..ResizeConfig::default()
        }
    }

    fn resizer(config: ResizeConfig) -> BatchResizer {
        BatchResizer::new(config).unwrap().with_progress(false)
    }

    fn write_uhd_fixtures(temp: &TempDir) {
        image::RgbImage::from_pixel(3840, 2160, image::Rgb([0, 0, 0]))
            .save(temp.child("full-black-4k.png").path())
            .unwrap();
        image::RgbImage::from_pixel(3840, 2160, image::Rgb([255, 0, 0]))
            .save(temp.child("full-red-4k.jpg").path())
            .unwrap();
    }

    fn dimensions(path: &Path) -> (u32, u32) {
        image::image_dimensions(path).unwrap()
    }

    #[test]
    fn test_default_resizing() {
        let temp = TempDir::new().unwrap();
        write_uhd_fixtures(&temp);

        let summary = resizer(config(1200)).resize_all(temp.path()).unwrap();

        assert_eq!(summary.found, 2);
        assert_eq!(summary.resized, 2);
        assert!(summary.is_complete());
        assert_eq!(dimensions(temp.child("full-black-4k.png").path()), (1200, 675));
        assert_eq!(dimensions(temp.child("full-red-4k.jpg").path()), (1200, 675));
    }

    #[test]
    fn test_custom_resizing() {
        let temp = TempDir::new().unwrap();
        write_uhd_fixtures(&temp);

        resizer(config(2000)).resize_all(temp.path()).unwrap();

        assert_eq!(dimensions(temp.child("full-black-4k.png").path()), (2000, 1125));
        assert_eq!(dimensions(temp.child("full-red-4k.jpg").path()), (2000, 1125));
    }

    #[test]
    fn test_backups_created() {
        let temp = TempDir::new().unwrap();
        image::RgbImage::new(400, 300)
            .save(temp.child("photo.PNG").path())
            .unwrap();
        let original = fs::read(temp.child("photo.PNG").path()).unwrap();
        temp.child("notes.txt").write_str("not an image").unwrap();

        let summary = resizer(config(200)).resize_all(temp.path()).unwrap();

        assert_eq!(summary.backup, BackupOutcome::Completed(1));
        let backup = temp.child("bak/photo.PNG");
        assert_eq!(fs::read(backup.path()).unwrap(), original);
        assert_eq!(dimensions(backup.path()), (400, 300));
        assert_eq!(dimensions(temp.child("photo.PNG").path()), (200, 150));
        assert!(!temp.child("bak/notes.txt").path().exists());
        temp.child("notes.txt").assert("not an image");
    }

    #[test]
    fn test_empty_directory_is_a_no_op() {
        let temp = TempDir::new().unwrap();
        temp.child("readme.txt").write_str("hello").unwrap();

        let summary = resizer(config(1200)).resize_all(temp.path()).unwrap();

        assert!(summary.is_empty());
        assert_eq!(summary.backup, BackupOutcome::Skipped);
        assert!(!temp.child("bak").path().exists());
    }

    #[test]
    fn test_second_run_changes_nothing() {
        let temp = TempDir::new().unwrap();
        image::RgbImage::new(640, 480)
            .save(temp.child("a.png").path())
            .unwrap();

        resizer(config(320)).resize_all(temp.path()).unwrap();
        let after_first = fs::read(temp.child("a.png").path()).unwrap();
        let summary = resizer(config(320)).resize_all(temp.path()).unwrap();

        assert_eq!(summary.resized, 0);
        assert_eq!(summary.unchanged, 1);
        assert_eq!(fs::read(temp.child("a.png").path()).unwrap(), after_first);
    }

    #[test]
    fn test_corrupt_image_aborts_by_default() {
        let temp = TempDir::new().unwrap();
        temp.child("broken.jpg").write_str("not really a jpeg").unwrap();

        let err = resizer(config(100)).resize_all(temp.path()).unwrap_err();

        assert!(matches!(err, PixresizeError::Codec { .. }));
        // the backup ran before the failure
        temp.child("bak/broken.jpg").assert("not really a jpeg");
    }

    #[test]
    fn test_corrupt_image_skipped_when_asked() {
        let temp = TempDir::new().unwrap();
        temp.child("broken.png").write_str("garbage").unwrap();
        image::RgbImage::new(300, 100)
            .save(temp.child("fine.png").path())
            .unwrap();

        let summary = resizer(ResizeConfig {
            on_codec_error: ErrorPolicy::Skip,
            ..config(150)
        })
        .resize_all(temp.path())
        .unwrap();

        assert_eq!(summary.found, 2);
        assert_eq!(summary.resized, 1);
        assert_eq!(summary.failed.len(), 1);
        assert!(summary.failed[0].0.ends_with("broken.png"));
        assert_eq!(dimensions(temp.child("fine.png").path()), (150, 50));
    }

    #[test]
    fn test_backup_failure_stops_resizing() {
        let temp = TempDir::new().unwrap();
        temp.child("bak").write_str("a file where the folder should be").unwrap();
        image::RgbImage::new(300, 100)
            .save(temp.child("keep.png").path())
            .unwrap();

        let err = resizer(config(150)).resize_all(temp.path()).unwrap_err();

        assert!(matches!(err, PixresizeError::BackupFailed(_)));
        assert_eq!(dimensions(temp.child("keep.png").path()), (300, 100));
    }

    #[test]
    fn test_backup_failure_can_be_ignored() {
        let temp = TempDir::new().unwrap();
        temp.child("bak").write_str("a file where the folder should be").unwrap();
        image::RgbImage::new(300, 100)
            .save(temp.child("go.png").path())
            .unwrap();

        let summary = resizer(ResizeConfig {
            continue_on_backup_failure: true,
            ..config(150)
        })
        .resize_all(temp.path())
        .unwrap();

        assert!(matches!(summary.backup, BackupOutcome::FailedIgnored(_)));
        assert_eq!(dimensions(temp.child("go.png").path()), (150, 50));
    }

    #[test]
    fn test_zero_width_is_rejected() {
        let err = BatchResizer::new(ResizeConfig::with_width(0)).err().unwrap();
        assert!(matches!(err, PixresizeError::InvalidParameter(_)));
    }

    struct LinuxSandbox {
        temp: TempDir,
    }

    impl LinuxSandbox {
        fn new() -> Self {
            let sandbox = Self::fresh();
            sandbox.temp.child("home/.local/bin").create_dir_all().unwrap();
            sandbox
        }

        /// Home directory with nothing in it, as on a first login.
        fn fresh() -> Self {
            let temp = TempDir::new().unwrap();
            temp.child("home").create_dir_all().unwrap();
            temp.child("root/etc").create_dir_all().unwrap();
            temp.child("build/pixresize").write_str("#!/bin/sh\n").unwrap();
            Self { temp }
        }

        /// Every path under the home directory, relative and sorted.
        fn home_tree(&self) -> Vec<String> {
            let home = self.home();
            let mut tree: Vec<String> = walkdir::WalkDir::new(&home)
                .min_depth(1)
                .into_iter()
                .map(|entry| {
                    let entry = entry.unwrap();
                    entry
                        .path()
                        .strip_prefix(&home)
                        .unwrap()
                        .to_string_lossy()
                        .replace('\\', "/")
                })
                .collect();
            tree.sort();
            tree
        }

        fn home(&self) -> std::path::PathBuf {
            self.temp.child("home").to_path_buf()
        }

        fn executable(&self) -> std::path::PathBuf {
            self.temp.child("build/pixresize").to_path_buf()
        }

        fn installer(&self) -> Installer {
            let dirs = UserDirs {
                home: self.home(),
                local_app_data: None,
            };
            let layout = InstallLayout::derive(Platform::Linux, &dirs).unwrap();
            let integrator =
                LinuxIntegrator::with_system_root(self.home(), self.temp.child("root").path());
            Installer::new(layout, Box::new(integrator))
        }
    }

    #[test]
    fn test_install_then_uninstall_restores_home() {
        let sandbox = LinuxSandbox::new();
        let bashrc = sandbox.temp.child("home/.bashrc");
        bashrc.write_str("alias ll='ls -l'\n").unwrap();
        let installer = sandbox.installer();

        let report = installer.install(&sandbox.executable()).unwrap();
        assert_eq!(report.binary, StepOutcome::Done);
        assert_eq!(report.integration, StepOutcome::Done);

        let installed = sandbox.temp.child("home/.local/bin/pixresize");
        installed.assert("#!/bin/sh\n");
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mode = fs::metadata(installed.path()).unwrap().permissions().mode();
            assert_eq!(mode & 0o777, 0o755);
        }
        let patched = fs::read_to_string(bashrc.path()).unwrap();
        assert!(patched.contains(r#"export PATH="$HOME/.local/bin:$PATH""#));

        let report = installer.uninstall().unwrap();
        assert!(report.was_installed());
        assert!(!installed.path().exists());
        bashrc.assert("alias ll='ls -l'\n");
    }

    #[test]
    fn test_install_then_uninstall_on_empty_home() {
        let sandbox = LinuxSandbox::fresh();
        let installer = sandbox.installer();
        assert!(sandbox.home_tree().is_empty());

        let report = installer.install(&sandbox.executable()).unwrap();
        assert_eq!(report.binary, StepOutcome::Done);
        assert_eq!(report.integration, StepOutcome::Done);
        assert_eq!(
            sandbox.home_tree(),
            vec![".bashrc", ".local", ".local/bin", ".local/bin/pixresize"]
        );

        let report = installer.uninstall().unwrap();
        assert_eq!(report.binary, StepOutcome::Done);
        assert_eq!(report.integration, StepOutcome::Done);
        assert!(sandbox.home_tree().is_empty());
    }

    #[test]
    fn test_uninstall_keeps_directories_in_use() {
        let sandbox = LinuxSandbox::fresh();
        sandbox.temp.child("home/.local/share/notes.txt").write_str("mine").unwrap();
        let installer = sandbox.installer();

        installer.install(&sandbox.executable()).unwrap();
        installer.uninstall().unwrap();

        assert_eq!(
            sandbox.home_tree(),
            vec![".local", ".local/share", ".local/share/notes.txt"]
        );
    }

    #[test]
    fn test_install_keeps_existing_path_export() {
        let sandbox = LinuxSandbox::new();
        let profile = sandbox.temp.child("home/.profile");
        profile
            .write_str("PATH=\"$HOME/.local/bin:$PATH\"\n")
            .unwrap();

        let report = sandbox.installer().install(&sandbox.executable()).unwrap();

        assert_eq!(report.integration, StepOutcome::AlreadyPresent);
        assert!(!sandbox.temp.child("home/.bashrc").path().exists());
    }

    #[test]
    fn test_uninstall_when_not_installed() {
        let sandbox = LinuxSandbox::new();
        let installer = sandbox.installer();

        for _ in 0..2 {
            let report = installer.uninstall().unwrap();
            assert_eq!(report.binary, StepOutcome::NotInstalled);
            assert_eq!(report.integration, StepOutcome::NotInstalled);
            assert!(!report.was_installed());
        }
    }

    #[test]
    fn test_install_refuses_foreign_binary() {
        let sandbox = LinuxSandbox::new();
        let other = sandbox.temp.child("build/python3");
        other.write_str("interpreter").unwrap();

        let err = sandbox.installer().install(other.path()).unwrap_err();

        assert!(matches!(err, PixresizeError::PreconditionFailed(_)));
        assert!(!sandbox.temp.child("home/.local/bin/pixresize").path().exists());
        assert!(!sandbox.temp.child("home/.bashrc").path().exists());
    }

    #[test]
    fn test_unsupported_platform_touches_nothing() {
        let temp = TempDir::new().unwrap();
        let dirs = UserDirs {
            home: temp.path().to_path_buf(),
            local_app_data: Some(temp.path().to_path_buf()),
        };

        let err = Installer::for_platform(Platform::Unsupported("macos"), dirs)
            .err()
            .unwrap();

        assert!(matches!(err, PixresizeError::UnsupportedPlatform(_)));
        assert_eq!(fs::read_dir(temp.path()).unwrap().count(), 0);
    }
}
