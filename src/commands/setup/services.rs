//! nginx and uWSGI configuration steps.

use super::{SetupReport, materialize_kind, print_hr};
use crate::artifacts::ArtifactKind;
use crate::context::RunContext;
use crate::error::Result;
use crate::symbols::SymbolTable;
use std::path::Path;

/// Generate the nginx site config plus its https and redirect snippets.
///
/// The site config needs both the IP and the domain; without them the step
/// is skipped with a notice rather than failing the run.
pub(super) fn setup_nginx(
    ctx: &RunContext,
    templates_dir: &Path,
    symbols: &SymbolTable,
    report: &mut SetupReport,
) -> Result<()> {
    if ctx.args.skip_nginx {
        println!("* * * Skipping nginx");
        return Ok(());
    }

    if ctx.host.ip.is_none() || ctx.host.domain.is_none() {
        println!("* * * Skipping nginx: both --ip and --domain are required");
        return Ok(());
    }

    println!("* * * Creating nginx configs");
    materialize_kind(ArtifactKind::Nginx, ctx, templates_dir, symbols, report)?;
    print_hr();

    Ok(())
}

/// Generate the uWSGI emperor unit and the project's vassal ini.
pub(super) fn setup_uwsgi(
    ctx: &RunContext,
    templates_dir: &Path,
    symbols: &SymbolTable,
    report: &mut SetupReport,
) -> Result<()> {
    if ctx.args.skip_uwsgi {
        println!("* * * Skipping uwsgi");
        return Ok(());
    }

    println!("* * * Creating uwsgi configs");
    materialize_kind(ArtifactKind::Uwsgi, ctx, templates_dir, symbols, report)?;
    print_hr();

    Ok(())
}
