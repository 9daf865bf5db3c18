//! Atomic file writes for generated artifacts.
//!
//! Every artifact lands through the same three steps:
//! 1. Write the content to `.{filename}.tmp` in the destination directory
//! 2. Sync the temporary file to disk (fsync)
//! 3. Rename it over the destination
//!
//! A reader of the destination sees either the old content or the complete
//! new content, never a half-written file. On failure the temporary file is
//! removed before the error is returned.
//!
//! The destination's parent directory must already exist. It is created by
//! the setup driver, not here; a missing parent surfaces as a
//! `FilesystemError` from the temporary-file creation step.

use crate::error::{AutoserverError, Result};
use std::fs::{self, File, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

/// Atomically write bytes to a file, replacing any previous content.
pub fn atomic_write<P: AsRef<Path>>(path: P, content: &[u8]) -> Result<()> {
    let path = path.as_ref();

    let temp_path = generate_temp_path(path)?;
    write_and_sync(&temp_path, content)?;
    atomic_replace(&temp_path, path)?;

    Ok(())
}

/// Atomically write a string to a file.
pub fn atomic_write_file<P: AsRef<Path>>(path: P, content: &str) -> Result<()> {
    atomic_write(path, content.as_bytes())
}

/// Temporary file path in the same directory as the target.
fn generate_temp_path(target: &Path) -> Result<PathBuf> {
    let parent = target.parent().unwrap_or(Path::new("."));
    let filename = target
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| {
            AutoserverError::FilesystemError(format!(
                "invalid destination path '{}'",
                target.display()
            ))
        })?;

    Ok(parent.join(format!(".{}.tmp", filename)))
}

/// Write `content` to a freshly created `path`.
///
/// A leftover file or symlink at `path` is removed first and the new file is
/// opened with `create_new`, so the write never follows a planted link.
fn write_and_sync(path: &Path, content: &[u8]) -> Result<()> {
    match fs::remove_file(path) {
        Err(e) if e.kind() != io::ErrorKind::NotFound => {
            return Err(AutoserverError::fs("remove stale temp file", path, e));
        }
        _ => {}
    }

    let mut file = OpenOptions::new()
        .write(true)
        .create_new(true)
        .open(path)
        .map_err(|e| AutoserverError::fs("create", path, e))?;

    file.write_all(content).map_err(|e| {
        let _ = fs::remove_file(path);
        AutoserverError::fs("write", path, e)
    })?;

    file.sync_all().map_err(|e| {
        let _ = fs::remove_file(path);
        AutoserverError::fs("sync", path, e)
    })?;

    Ok(())
}

/// Rename `source` over `target`.
///
/// `rename` replaces an existing destination on both POSIX and Windows
/// (`MoveFileExW` with `MOVEFILE_REPLACE_EXISTING`).
fn atomic_replace(source: &Path, target: &Path) -> Result<()> {
    fs::rename(source, target).map_err(|e| {
        let _ = fs::remove_file(source);
        AutoserverError::fs("replace", target, e)
    })?;

    #[cfg(unix)]
    {
        if let Some(parent) = target.parent()
            && let Ok(dir) = File::open(parent)
        {
            let _ = dir.sync_all();
        }
    }

    Ok(())
}
