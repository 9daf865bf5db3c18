//! Implementation of the `autoserver deploy` command.
//!
//! Links the generated nginx site and uWSGI emperor unit into the
//! directories nginx and systemd read from. Writing there needs root, so a
//! non-root invocation re-executes itself through `sudo`.
//!
//! Links follow the Write Policy: an existing link is only replaced with
//! `--overwrite`.

use crate::cli::ProjectArgs;
use crate::context::RunContext;
use crate::error::{AutoserverError, Result};
use crate::fs::replace_symlink;
use crate::policy::{WriteDecision, decide};
use crate::process::{effective_uid, reexec_with_sudo};
use std::ffi::OsString;
use std::path::{Path, PathBuf};

/// Execute the `autoserver deploy` command.
pub fn cmd_deploy(args: ProjectArgs) -> Result<()> {
    if effective_uid()? != 0 {
        println!("Script not started as root. Running sudo..");
        let argv: Vec<OsString> = std::env::args_os().skip(1).collect();
        return Err(reexec_with_sudo(&argv));
    }

    let ctx = RunContext::resolve(args)?;
    let links = run_deploy(&ctx)?;

    if links.is_empty() {
        println!("Nothing to link.");
        return Ok(());
    }

    for linked in &links {
        println!(
            "  {:<12} {} -> {}",
            linked.decision,
            linked.link.display(),
            linked.target.display()
        );
    }
    println!();
    println!("Reload nginx and run `systemctl daemon-reload` to pick up changes.");

    Ok(())
}

/// One link created (or left alone) by a deploy run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DeployedLink {
    pub link: PathBuf,
    pub target: PathBuf,
    pub decision: WriteDecision,
}

/// Link every non-skipped service into its system directory.
pub(crate) fn run_deploy(ctx: &RunContext) -> Result<Vec<DeployedLink>> {
    let mut planned = Vec::new();
    if !ctx.args.skip_nginx {
        planned.push((&ctx.layout.nginx_conf, &ctx.config.nginx_sites_enabled));
    }
    if !ctx.args.skip_uwsgi {
        planned.push((&ctx.layout.uwsgi_emperor, &ctx.config.systemd_dir));
    }

    let mut linked = Vec::with_capacity(planned.len());
    for (target, link_dir) in planned {
        linked.push(link_into(target, link_dir, ctx.args.overwrite)?);
    }

    Ok(linked)
}

/// Link `target` into `link_dir` under its own file name.
fn link_into(target: &Path, link_dir: &Path, overwrite: bool) -> Result<DeployedLink> {
    if !target.is_file() {
        return Err(AutoserverError::UserError(format!(
            "'{}' does not exist; run `autoserver setup --production` first",
            target.display()
        )));
    }

    let file_name = target.file_name().ok_or_else(|| {
        AutoserverError::UserError(format!("'{}' has no file name", target.display()))
    })?;
    let link = link_dir.join(file_name);

    let decision = decide(&link, overwrite);
    if decision.proceeds() {
        replace_symlink(target, &link)?;
    }

    Ok(DeployedLink {
        link,
        target: target.to_path_buf(),
        decision,
    })
}
