//! Turns the user's raw directory string into an absolute target path.
//!
//! `resolve_target` is pure: the home and working directories are passed in,
//! so nothing here touches the process environment or the filesystem.

use crate::error::{Result, ScaffoldError};
use std::path::{Component, Path, PathBuf};

/// Resolve `raw` against an explicit home directory and working directory.
///
/// A leading `~` is replaced by `home`; relative paths are joined onto `cwd`;
/// `.` and `..` segments are folded lexically.
pub fn resolve_target(raw: &str, home: Option<&Path>, cwd: &Path) -> Result<PathBuf> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ScaffoldError::EmptyInput);
    }

    if trimmed.contains('\0') {
        return Err(ScaffoldError::path_error(trimmed, "path contains a NUL byte"));
    }

    let expanded = match trimmed.strip_prefix('~') {
        Some(rest) => {
            let home = home.ok_or(ScaffoldError::HomeResolution)?;
            home.join(rest.trim_start_matches(['/', '\\']))
        }
        None => PathBuf::from(trimmed),
    };

    let absolute = if expanded.is_absolute() {
        expanded
    } else {
        if !cwd.is_absolute() {
            return Err(ScaffoldError::path_error(
                trimmed,
                format!("working directory {cwd:?} is not absolute"),
            ));
        }
        cwd.join(expanded)
    };

    Ok(normalize(&absolute))
}

/// Resolve `raw` using the real home directory and current working directory.
pub fn resolve_from_env(raw: &str) -> Result<PathBuf> {
    let cwd = std::env::current_dir()
        .map_err(|e| ScaffoldError::path_error(raw.trim(), e.to_string()))?;
    let home = dirs::home_dir();
    resolve_target(raw, home.as_deref(), &cwd)
}

// `..` at the root stays at the root, as the OS does.
fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(prefix) => out.push(prefix.as_os_str()),
            Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                out.pop();
            }
            Component::Normal(part) => out.push(part),
        }
    }
    out
}
