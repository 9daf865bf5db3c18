//! Bare repository and deployment hook step.

use super::{SetupReport, print_hr};
use crate::artifacts::{ArtifactKind, catalogue};
use crate::context::RunContext;
use crate::error::Result;
use crate::fs::{ensure_dir, mark_executable};
use crate::git::{init_bare_repo, remote_hint};
use crate::symbols::SymbolTable;
use std::path::Path;

/// Create `repo.git` and install its `post-receive` hook.
///
/// The repository is only (re)initialized when absent or with
/// `--force-reinit-git`. The hook goes through the Write Policy like every
/// other artifact, independent of whether the repository was just created.
pub(super) fn setup_git(
    ctx: &RunContext,
    templates_dir: &Path,
    symbols: &SymbolTable,
    report: &mut SetupReport,
) -> Result<()> {
    if ctx.args.skip_git {
        println!("* * * Skipping git repo");
        return Ok(());
    }

    let layout = &ctx.layout;
    if !layout.repo_dir.exists() || ctx.args.force_reinit_git {
        println!("* * * Creating git bare repo");
        init_bare_repo(&layout.repo_dir)?;
    } else {
        println!("* * * Repo already exists.");
        println!("Run with \"--force-reinit-git\" to reinitialize repo");
    }

    ensure_dir(&layout.hooks_dir())?;
    for artifact in catalogue(ArtifactKind::Git, layout, templates_dir) {
        let decision = artifact.materialize(symbols, ctx.args.overwrite)?;
        if decision.proceeds() {
            mark_executable(&artifact.destination)?;
        }
        report.record(&artifact, decision);
    }

    println!();
    println!(">>> Run this on your workstation <<<");
    println!(
        "{}",
        remote_hint(&ctx.host.user, ctx.host.ssh_host(), &layout.repo_dir)
    );
    print_hr();

    Ok(())
}
