//! Implementation of the `autoserver setup` command.
//!
//! # What `autoserver setup` does
//!
//! 1. Bootstraps the virtualenv at `{proj_dir}/env{proj}` (unless `--skip-venv`)
//! 2. Stops there unless `--production` is given
//! 3. Creates the project skeleton: django project, static, backups, conf dirs
//! 4. Generates the nginx site config and its https/redirect snippets
//!    (needs both `--ip` and `--domain`)
//! 5. Generates the uWSGI emperor unit and vassal ini
//! 6. Creates the bare `repo.git` and its `post-receive` hook
//!
//! Every generated file passes through the Write Policy, so re-running is
//! safe: existing files are kept unless `--overwrite` is given.

mod report;
mod repo;
mod services;
mod venv;

#[cfg(test)]
mod tests;

use crate::artifacts::{ArtifactKind, catalogue};
use crate::cli::ProjectArgs;
use crate::context::RunContext;
use crate::error::Result;
use crate::fs::ensure_dir;
use crate::symbols::SymbolTable;
use std::path::{Path, PathBuf};

pub(crate) use report::SetupReport;

/// Execute the `autoserver setup` command.
pub fn cmd_setup(args: ProjectArgs) -> Result<()> {
    let ctx = RunContext::resolve(args)?;
    let report = run_setup(&ctx)?;
    report.print_summary();
    Ok(())
}

/// Run every enabled setup step for a resolved context.
pub(crate) fn run_setup(ctx: &RunContext) -> Result<SetupReport> {
    let mut report = SetupReport::default();
    let args = &ctx.args;

    if args.skip_venv {
        println!("* * * Skipping virtualenv");
    } else {
        venv::create_virtualenv(ctx)?;
    }

    if !args.production {
        println!("* * * Production mode off, deploying locally");
        return Ok(report);
    }

    let needs_templates = !(args.skip_nginx && args.skip_uwsgi && args.skip_git);
    let prepared = if needs_templates {
        Some(prepare_rendering(ctx)?)
    } else {
        None
    };

    create_skeleton(ctx)?;

    let Some((templates_dir, symbols)) = prepared else {
        return Ok(report);
    };

    services::setup_nginx(ctx, &templates_dir, &symbols, &mut report)?;
    services::setup_uwsgi(ctx, &templates_dir, &symbols, &mut report)?;
    repo::setup_git(ctx, &templates_dir, &symbols, &mut report)?;

    Ok(report)
}

/// Resolve the templates directory and symbol table before anything is written.
fn prepare_rendering(ctx: &RunContext) -> Result<(PathBuf, SymbolTable)> {
    let templates_dir = ctx
        .config
        .resolve_templates_dir(ctx.args.templates_dir.as_deref())?;
    let symbols = SymbolTable::for_project(&ctx.layout, &ctx.host)?;
    for (name, value) in symbols.iter() {
        tracing::trace!(name, value, "symbol");
    }
    Ok((templates_dir, symbols))
}

/// Create the project directories that generated files live in.
fn create_skeleton(ctx: &RunContext) -> Result<()> {
    let layout = &ctx.layout;

    for dir in [
        &layout.django_proj_dir,
        &layout.static_dir,
        &layout.backups_dir,
    ] {
        ensure_dir(dir)?;
    }

    if !(ctx.args.skip_nginx && ctx.args.skip_uwsgi) {
        ensure_dir(&layout.conf_dir)?;
    }

    Ok(())
}

/// Materialize every artifact of `kind`, recording each decision.
fn materialize_kind(
    kind: ArtifactKind,
    ctx: &RunContext,
    templates_dir: &Path,
    symbols: &SymbolTable,
    report: &mut SetupReport,
) -> Result<()> {
    for artifact in catalogue(kind, &ctx.layout, templates_dir) {
        let decision = artifact.materialize(symbols, ctx.args.overwrite)?;
        report.record(&artifact, decision);
    }
    Ok(())
}

fn print_hr() {
    println!("{}", "-".repeat(40));
    println!();
}
