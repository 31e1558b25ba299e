//! ZIP extraction into a target directory.
//!
//! Every entry name is resolved to a path relative to the target before anything
//! is written. A name that climbs above its root (`..`), starts at the filesystem
//! root, or carries a drive prefix aborts the whole extraction.

use crate::error::ExtractError;
use crate::utils::fs::{
    create_dir_all_with_mode, create_file_with_mode, DEFAULT_DIR_MODE, DEFAULT_FILE_MODE,
};
use std::fs::File;
use std::io::{BufWriter, Read, Write};
use std::path::{Component, Path, PathBuf};
use zip::result::ZipError;
use zip::ZipArchive;

/// Whether the first path segment of each entry name is dropped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StripPolicy {
    /// Drop the wrapping folder hosting services add (e.g. `Gooo-main/`).
    #[default]
    StripTopLevel,
    Keep,
}

/// Extract every entry of the ZIP at `archive_path` into `target_dir`.
///
/// Stops at the first failure. Entries written before it stay on disk.
pub fn extract(
    archive_path: &Path,
    target_dir: &Path,
    policy: StripPolicy,
) -> Result<(), ExtractError> {
    let open_failed = |source| ExtractError::OpenFailed {
        path: archive_path.to_path_buf(),
        source,
    };

    let file = File::open(archive_path).map_err(|e| open_failed(ZipError::Io(e)))?;
    let mut archive = ZipArchive::new(file).map_err(open_failed)?;
    tracing::debug!(
        archive = %archive_path.display(),
        entries = archive.len(),
        ?policy,
        "opened archive"
    );

    for index in 0..archive.len() {
        // A central directory entry whose local header cannot be read.
        let mut entry = archive.by_index(index).map_err(open_failed)?;

        let name = entry.name().to_string();
        let relative = resolve_entry_path(&name, policy)?;
        let destination = target_dir.join(&relative);

        if is_same_file(&destination, archive_path) {
            return Err(ExtractError::io(
                &name,
                std::io::Error::new(
                    std::io::ErrorKind::InvalidInput,
                    "entry would overwrite the archive being extracted",
                ),
            ));
        }

        if entry.is_dir() {
            let mode = entry_mode(entry.unix_mode(), DEFAULT_DIR_MODE);
            tracing::trace!(entry = %name, path = %destination.display(), "directory");
            create_dir_all_with_mode(&destination, mode)
                .map_err(|e| ExtractError::io(&name, e))?;
            continue;
        }

        if let Some(parent) = destination.parent() {
            create_dir_all_with_mode(parent, DEFAULT_DIR_MODE)
                .map_err(|e| ExtractError::io(&name, e))?;
        }

        let mode = entry_mode(entry.unix_mode(), DEFAULT_FILE_MODE);
        let out =
            create_file_with_mode(&destination, mode).map_err(|e| ExtractError::io(&name, e))?;
        let bytes = copy_entry(&mut entry, out).map_err(|e| ExtractError::io(&name, e))?;
        tracing::trace!(entry = %name, path = %destination.display(), bytes, "file");
    }

    Ok(())
}

/// Map a stored entry name to a path relative to the target directory.
///
/// Backslashes count as separators. With [`StripPolicy::StripTopLevel`] the
/// part before the first separator is dropped; a name without a separator is
/// kept whole. Both the stored name and the stripped name must stay inside
/// their root.
pub fn resolve_entry_path(name: &str, policy: StripPolicy) -> Result<PathBuf, ExtractError> {
    let unsafe_path = || ExtractError::UnsafePath {
        entry: name.to_string(),
    };

    let normalized = name.replace('\\', "/");
    contained_path(&normalized).ok_or_else(unsafe_path)?;

    let stripped = match policy {
        StripPolicy::StripTopLevel => normalized
            .split_once('/')
            .map_or(normalized.as_str(), |(_, rest)| rest),
        StripPolicy::Keep => normalized.as_str(),
    };

    contained_path(stripped).ok_or_else(unsafe_path)
}

// None when the `/`-separated name would leave its root.
fn contained_path(name: &str) -> Option<PathBuf> {
    if name.starts_with('/') {
        return None;
    }

    let mut segments: Vec<&str> = Vec::new();
    for segment in name.split('/') {
        match segment {
            "" | "." => {}
            ".." => {
                segments.pop()?;
            }
            _ if is_plain_segment(segment) => segments.push(segment),
            _ => return None,
        }
    }

    Some(segments.iter().collect())
}

// Rejects drive letters and UNC prefixes on Windows.
fn is_plain_segment(segment: &str) -> bool {
    let mut components = Path::new(segment).components();
    matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    )
}

fn is_same_file(a: &Path, b: &Path) -> bool {
    if a == b {
        return true;
    }
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => false,
    }
}

// Archives written without permission bits fall back to the default.
fn entry_mode(mode: Option<u32>, default: u32) -> u32 {
    mode.filter(|m| m & 0o777 != 0).unwrap_or(default)
}

fn copy_entry<R: Read>(entry: &mut R, file: File) -> std::io::Result<u64> {
    let mut writer = BufWriter::new(file);
    let bytes = std::io::copy(entry, &mut writer)?;
    writer.flush()?;
    Ok(bytes)
}
