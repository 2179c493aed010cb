//! File system utilities.

use crate::Result;
use std::path::Path;
use walkdir::WalkDir;

/// Counts gathered while copying a directory tree.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CopyStats {
    /// Directories created.
    pub directories: usize,
    /// Files copied.
    pub files: usize,
    /// Bytes copied.
    pub bytes: u64,
}

/// Check if a path exists and is a directory.
pub fn ensure_directory(path: &Path) -> Result<()> {
    if !path.exists() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    if !path.is_dir() {
        return Err(crate::Error::NotADirectory(path.display().to_string()));
    }
    Ok(())
}

/// Check if a path exists and is a regular file.
pub fn ensure_file(path: &Path) -> Result<()> {
    if !path.is_file() {
        return Err(crate::Error::PathNotFound(path.display().to_string()));
    }
    Ok(())
}

/// Create the parent directory of a file path if needed.
pub fn create_parent_dir(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}

/// Recursively copy the contents of `source` into `dest`.
///
/// Directories are created before their contents. Existing directories are
/// reused and existing files overwritten. `on_entry` is called with each
/// source path as it is copied. Symlinks are not followed.
pub fn copy_tree<F>(source: &Path, dest: &Path, mut on_entry: F) -> Result<CopyStats>
where
    F: FnMut(&Path),
{
    ensure_directory(source)?;
    std::fs::create_dir_all(dest)?;

    let mut stats = CopyStats::default();

    for entry in WalkDir::new(source).min_depth(1).follow_links(false) {
        let entry = entry.map_err(std::io::Error::from)?;
        let relative = entry
            .path()
            .strip_prefix(source)
            .map_err(|e| crate::Error::other(e.to_string()))?;
        let target = dest.join(relative);

        on_entry(entry.path());

        if entry.file_type().is_dir() {
            std::fs::create_dir_all(&target)?;
            stats.directories += 1;
        } else if entry.file_type().is_file() {
            stats.bytes += std::fs::copy(entry.path(), &target)?;
            stats.files += 1;
        } else {
            tracing::debug!("Skipping non-regular file: {}", entry.path().display());
        }
    }

    Ok(stats)
}
