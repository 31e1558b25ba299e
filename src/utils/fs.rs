use crate::error::{CleanupWarning, Result, ScaffoldError};
use std::path::Path;

/// Owner rwx, group/other r-x.
pub const DEFAULT_DIR_MODE: u32 = 0o755;

/// Owner rw, group/other r.
pub const DEFAULT_FILE_MODE: u32 = 0o644;

pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    create_dir_all_with_mode(path, DEFAULT_DIR_MODE).map_err(|source| {
        ScaffoldError::TargetDirectory {
            path: path.to_path_buf(),
            source,
        }
    })
}

/// `mkdir -p` with an explicit mode. An existing directory is not an error.
pub fn create_dir_all_with_mode(path: &Path, mode: u32) -> std::io::Result<()> {
    let mut builder = std::fs::DirBuilder::new();
    builder.recursive(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::DirBuilderExt;
        builder.mode(mode & 0o7777);
    }

    #[cfg(not(unix))]
    {
        let _ = mode;
    }

    builder.create(path)
}

/// Open `path` for a fresh write, truncating any previous content.
///
/// `mode` only applies when the file is created.
pub fn create_file_with_mode(path: &Path, mode: u32) -> std::io::Result<std::fs::File> {
    let mut options = std::fs::OpenOptions::new();
    options.write(true).create(true).truncate(true);

    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(mode & 0o7777);
    }

    #[cfg(not(unix))]
    {
        let _ = mode;
    }

    options.open(path)
}

pub fn remove_file_if_exists(path: &Path) -> std::io::Result<()> {
    match std::fs::remove_file(path) {
        Err(e) if e.kind() != std::io::ErrorKind::NotFound => Err(e),
        _ => Ok(()),
    }
}

/// Best-effort removal of the staging archive.
pub fn remove_staging_file(path: &Path) -> Option<CleanupWarning> {
    match remove_file_if_exists(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed staging archive");
            None
        }
        Err(source) => Some(CleanupWarning {
            path: path.to_path_buf(),
            source,
        }),
    }
}
