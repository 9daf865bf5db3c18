//! Bare deployment repository management.
//!
//! The project's `repo.git` is a bare repository the operator pushes to from
//! a workstation; its `post-receive` hook checks the pushed tree out into
//! the project directory.

use crate::error::Result;
use crate::process::run_command;
use std::ffi::OsStr;
use std::path::Path;

/// Run `git init --bare` on `repo_dir`.
///
/// Safe to run on an existing repository: git reinitializes it without
/// touching refs or objects.
pub fn init_bare_repo(repo_dir: &Path) -> Result<()> {
    let output = run_command(
        "git",
        &[OsStr::new("init"), OsStr::new("--bare"), repo_dir.as_os_str()],
    )?;
    if !output.stdout.is_empty() {
        println!("{}", output.stdout);
    }
    Ok(())
}

/// The command an operator runs on their workstation to push to this host.
pub fn remote_hint(user: &str, host: &str, repo_dir: &Path) -> String {
    format!(
        "git remote add live ssh://{}@{}{}",
        user,
        host,
        repo_dir.display()
    )
}
