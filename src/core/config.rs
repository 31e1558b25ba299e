use crate::core::extract::StripPolicy;
use crate::error::{Result, ScaffoldError};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

pub const DEFAULT_ARCHIVE_URL: &str =
    "https://github.com/Tmmcmasters/Gooo/archive/refs/heads/main.zip";
pub const DEFAULT_STAGING_FILE_NAME: &str = "gooo.zip";

#[derive(Debug, Deserialize, Clone, PartialEq)]
#[serde(default)]
pub struct Config {
    pub archive_url: String,
    pub staging_file_name: String,
    pub strip_top_level: bool,
    pub timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            archive_url: DEFAULT_ARCHIVE_URL.to_string(),
            staging_file_name: DEFAULT_STAGING_FILE_NAME.to_string(),
            strip_top_level: true,
            timeout_secs: None,
        }
    }
}

impl Config {
    /// Load `~/.gooo/config.json`, falling back to defaults when it is absent.
    pub fn load() -> Result<Self> {
        match get_config_path() {
            Some(path) => Self::load_from(&path),
            None => Ok(Self::default()),
        }
    }

    pub fn load_from(path: &Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }

        let content = std::fs::read_to_string(path).map_err(|e| {
            ScaffoldError::config_error(format!("could not read {path:?}: {e}"))
        })?;
        let config: Config = serde_json::from_str(&content)
            .map_err(|e| ScaffoldError::config_error(format!("invalid {path:?}: {e}")))?;

        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.archive_url.trim().is_empty() {
            return Err(ScaffoldError::config_error("archive URL cannot be empty"));
        }

        let name = self.staging_file_name.as_str();
        let is_bare = !name.is_empty()
            && name != "."
            && name != ".."
            && !name.contains(['/', '\\']);
        if !is_bare {
            return Err(ScaffoldError::config_error(format!(
                "staging file name '{name}' must be a plain file name"
            )));
        }

        Ok(())
    }

    pub fn strip_policy(&self) -> StripPolicy {
        if self.strip_top_level {
            StripPolicy::StripTopLevel
        } else {
            StripPolicy::Keep
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }

    pub fn get_staging_path(&self, target_dir: &Path) -> PathBuf {
        target_dir.join(&self.staging_file_name)
    }
}

fn get_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(".gooo").join("config.json"))
}
