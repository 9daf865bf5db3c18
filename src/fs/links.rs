//! Directory, permission, and symlink helpers.
//!
//! These are the non-artifact filesystem steps of a run: creating the
//! project skeleton, marking the git hook executable, and linking generated
//! configuration into system directories during `deploy`.

use crate::error::{AutoserverError, Result};
use std::fs;
use std::path::Path;

/// Create a directory and its parents if missing.
pub fn ensure_dir(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| AutoserverError::fs("create directory", path, e))
}

/// Set mode 0o755 on `path`.
#[cfg(unix)]
pub fn mark_executable(path: &Path) -> Result<()> {
    use std::os::unix::fs::PermissionsExt;

    fs::set_permissions(path, fs::Permissions::from_mode(0o755))
        .map_err(|e| AutoserverError::fs("set permissions on", path, e))
}

/// Executable bits do not exist outside unix; git on Windows ignores them.
#[cfg(not(unix))]
pub fn mark_executable(_path: &Path) -> Result<()> {
    Ok(())
}

/// Point `link` at `target`, removing whatever `link` currently is.
///
/// The caller decides whether replacing is allowed; this only performs it.
#[cfg(unix)]
pub fn replace_symlink(target: &Path, link: &Path) -> Result<()> {
    if link.symlink_metadata().is_ok() {
        fs::remove_file(link).map_err(|e| AutoserverError::fs("remove", link, e))?;
    }

    std::os::unix::fs::symlink(target, link).map_err(|e| AutoserverError::fs("symlink", link, e))
}

#[cfg(not(unix))]
pub fn replace_symlink(_target: &Path, link: &Path) -> Result<()> {
    Err(AutoserverError::FilesystemError(format!(
        "cannot create '{}': symlinks are only supported on unix hosts",
        link.display()
    )))
}
