use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ScaffoldError>;

#[derive(Error, Debug)]
pub enum ScaffoldError {
    #[error("Directory cannot be empty")]
    EmptyInput,

    #[error("Could not resolve home directory")]
    HomeResolution,

    #[error("Could not resolve path '{input}': {reason}")]
    PathResolution { input: String, reason: String },

    #[error("Could not create directory {path:?}: {source}")]
    TargetDirectory {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Could not read input: {message}")]
    Prompt { message: String },

    #[error("Failed to download repository: {0}")]
    Download(#[from] DownloadError),

    #[error("Failed to extract ZIP file: {0}")]
    Extract(#[from] ExtractError),
}

#[derive(Error, Debug)]
pub enum DownloadError {
    /// Connection, TLS, timeout, or a body cut off mid-stream.
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("unexpected status code: {code} {reason}")]
    BadStatus { code: u16, reason: String },

    #[error("could not write {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
}

#[derive(Error, Debug)]
pub enum ExtractError {
    #[error("could not open archive {path:?}: {source}")]
    OpenFailed {
        path: PathBuf,
        source: zip::result::ZipError,
    },

    #[error("entry '{entry}' resolves outside the target directory")]
    UnsafePath { entry: String },

    #[error("entry '{entry}': {source}")]
    Io {
        entry: String,
        source: std::io::Error,
    },
}

/// Non-fatal: the staging archive survived after a successful extraction.
#[derive(Error, Debug)]
#[error("Could not remove ZIP file {path:?}: {source}")]
pub struct CleanupWarning {
    pub path: PathBuf,
    pub source: std::io::Error,
}

impl ScaffoldError {
    pub fn config_error<S: Into<String>>(message: S) -> Self {
        ScaffoldError::Config {
            message: message.into(),
        }
    }

    pub fn path_error<S: Into<String>, R: Into<String>>(input: S, reason: R) -> Self {
        ScaffoldError::PathResolution {
            input: input.into(),
            reason: reason.into(),
        }
    }
}

impl ExtractError {
    pub fn io<S: Into<String>>(entry: S, source: std::io::Error) -> Self {
        ExtractError::Io {
            entry: entry.into(),
            source,
        }
    }

    /// True for the zip-slip rejection.
    pub fn is_unsafe_path(&self) -> bool {
        matches!(self, ExtractError::UnsafePath { .. })
    }
}
