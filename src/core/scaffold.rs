use crate::core::config::Config;
use crate::core::download::Downloader;
use crate::core::extract;
use crate::error::{CleanupWarning, Result};
use crate::utils::fs as fs_utils;
use crate::utils::path;
use std::path::PathBuf;

#[derive(Debug)]
pub struct ScaffoldOutcome {
    pub target_dir: PathBuf,
    pub cleanup_warning: Option<CleanupWarning>,
}

/// Resolve, create, download, extract, clean up. Stops at the first failure.
pub struct Scaffolder {
    config: Config,
    home: Option<PathBuf>,
    cwd: Option<PathBuf>,
}

impl Scaffolder {
    pub fn new(config: Config) -> Self {
        Self {
            config,
            home: None,
            cwd: None,
        }
    }

    /// Resolve against fixed directories instead of the process environment.
    pub fn with_dirs(config: Config, home: Option<PathBuf>, cwd: PathBuf) -> Self {
        Self {
            config,
            home,
            cwd: Some(cwd),
        }
    }

    pub fn run(&self, raw_input: &str) -> Result<ScaffoldOutcome> {
        self.config.validate()?;

        let target_dir = self.resolve(raw_input)?;
        tracing::debug!(dir = %target_dir.display(), "resolved target directory");

        fs_utils::ensure_dir_exists(&target_dir)?;

        let staging = self.config.get_staging_path(&target_dir);
        println!("📥 Downloading Gooo repository to {}...", staging.display());
        Downloader::with_timeout(self.config.timeout()).fetch(&self.config.archive_url, &staging)?;

        println!(
            "📦 Extracting {} to {}...",
            staging.display(),
            target_dir.display()
        );
        extract::extract(&staging, &target_dir, self.config.strip_policy())?;

        let cleanup_warning = fs_utils::remove_staging_file(&staging);

        Ok(ScaffoldOutcome {
            target_dir,
            cleanup_warning,
        })
    }

    fn resolve(&self, raw_input: &str) -> Result<PathBuf> {
        match &self.cwd {
            Some(cwd) => path::resolve_target(raw_input, self.home.as_deref(), cwd),
            None => path::resolve_from_env(raw_input),
        }
    }
}
