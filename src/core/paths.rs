// src/core/paths.rs

use crate::constants::{ACHIRA_DIR, MAX_SEARCH_DEPTH};
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PathError {
    #[error("Could not resolve '{path}' to an absolute path: {source}")]
    Resolve {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Returns the absolute form of `path`.
///
/// Existing paths are canonicalized (symlinks resolved, no `\\?\` prefix on
/// Windows). Paths that do not exist yet are made absolute lexically against
/// the current directory, with `.` and `..` components collapsed.
pub fn resolve_absolute(path: &Path) -> Result<PathBuf, PathError> {
    let to_error = |source: std::io::Error| PathError::Resolve {
        path: path.display().to_string(),
        source,
    };

    match dunce::canonicalize(path) {
        Ok(resolved) => Ok(resolved),
        Err(e) if e.kind() == ErrorKind::NotFound => std::path::absolute(path)
            .map(|absolute| normalize_lexically(&absolute))
            .map_err(to_error),
        Err(e) => Err(to_error(e)),
    }
}

/// Collapses `.` and `..` without touching the filesystem. `..` never climbs
/// above the root.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(normalized.components().next_back(), Some(Component::Normal(_))) {
                    normalized.pop();
                }
            }
            other => normalized.push(other),
        }
    }
    normalized
}

/// Finds the `.achira` directory for `start`, even when run from a subfolder.
pub fn resolve_achira_dir(start: &Path) -> Result<PathBuf, PathError> {
    find_marker_dir(start, ACHIRA_DIR)
}

/// Searches `start` and up to `MAX_SEARCH_DEPTH` of its ancestors for a
/// subdirectory named `marker`.
///
/// # Returns
/// The marker path under the first directory that has one, built from the
/// resolved form of `start`. If none of the candidates has it, the marker path
/// directly under `start` as given (possibly relative), whether or not it exists.
pub fn find_marker_dir(start: &Path, marker: &str) -> Result<PathBuf, PathError> {
    find_marker_dir_with(start, marker, Path::is_dir)
}

/// Same as [`find_marker_dir`], with the existence check supplied by the caller.
pub fn find_marker_dir_with<F>(
    start: &Path,
    marker: &str,
    mut exists: F,
) -> Result<PathBuf, PathError>
where
    F: FnMut(&Path) -> bool,
{
    let resolved = resolve_absolute(start)?;

    // `ancestors()` ends at the filesystem root, so the root itself is still
    // checked before the search gives up early.
    for candidate in resolved.ancestors().take(MAX_SEARCH_DEPTH + 1) {
        let marker_path = candidate.join(marker);
        if exists(&marker_path) {
            log::debug!("Found '{}' at {}", marker, marker_path.display());
            return Ok(marker_path);
        }
    }

    log::debug!(
        "No '{}' found within {} levels of {}; using fallback.",
        marker,
        MAX_SEARCH_DEPTH,
        resolved.display()
    );
    Ok(start.join(marker))
}
