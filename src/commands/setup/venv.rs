//! Virtualenv bootstrap step.

use crate::context::RunContext;
use crate::error::Result;
use crate::fs::ensure_dir;
use crate::process::run_command;
use std::ffi::OsStr;

/// Run `virtualenv -p <python> {proj_dir}/env{proj}` unless it already exists.
pub(super) fn create_virtualenv(ctx: &RunContext) -> Result<()> {
    let env_dir = &ctx.layout.env_dir;

    if env_dir.exists() {
        println!("* * * Virtualenv [{}] exists, skipping", env_dir.display());
        return Ok(());
    }

    ensure_dir(&ctx.layout.proj_dir)?;
    println!("* * * Running virtualenv");
    let output = run_command(
        &ctx.config.virtualenv,
        &[
            OsStr::new("-p"),
            OsStr::new(&ctx.config.python),
            env_dir.as_os_str(),
        ],
    )?;
    if !output.stdout.is_empty() {
        println!("{}", output.stdout);
    }

    Ok(())
}
