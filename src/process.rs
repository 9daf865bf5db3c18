//! External command runner for autoserver.
//!
//! Every tool autoserver shells out to (`git`, `virtualenv`, `id`, `sudo`)
//! goes through this module so failures carry the command line and the
//! tool's own error output.

use crate::error::{AutoserverError, Result};
use std::ffi::{OsStr, OsString};
use std::process::{Command, Output};

/// Captured output of a successful command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    /// Standard output (trimmed).
    pub stdout: String,
    /// Standard error (trimmed).
    pub stderr: String,
}

impl CommandOutput {
    fn from_output(output: &Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).trim().to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        }
    }
}

/// Run `program` with `args`.
///
/// Arguments are passed to the child as-is, so paths need not be UTF-8.
///
/// # Returns
///
/// * `Ok(CommandOutput)` - On exit code 0
/// * `Err(AutoserverError::CommandError)` - If the program cannot be spawned
///   or exits non-zero
pub fn run_command<S: AsRef<OsStr>>(program: &str, args: &[S]) -> Result<CommandOutput> {
    let cmdline = command_line(program, args);
    tracing::debug!(command = %cmdline, "running");

    let output = Command::new(program).args(args).output().map_err(|e| {
        AutoserverError::CommandError(format!("failed to execute {}: {} (is it installed?)", program, e))
    })?;

    let captured = CommandOutput::from_output(&output);

    if output.status.success() {
        Ok(captured)
    } else {
        let exit_code = output.status.code().unwrap_or(-1);
        let error_msg = if captured.stderr.is_empty() {
            captured.stdout
        } else {
            captured.stderr
        };

        Err(AutoserverError::CommandError(format!(
            "{} failed (exit code {}): {}",
            cmdline, exit_code, error_msg
        )))
    }
}

/// Effective user id of this process, from `id -u`.
pub fn effective_uid() -> Result<u32> {
    let output = run_command("id", &["-u"])?;
    output.stdout.parse().map_err(|_| {
        AutoserverError::CommandError(format!("unexpected output from id -u: '{}'", output.stdout))
    })
}

/// Login name of the effective user, from the passwd entry via `id -un`.
pub fn effective_user_name() -> Result<String> {
    let output = run_command("id", &["-un"])?;
    if output.stdout.is_empty() {
        return Err(AutoserverError::CommandError(
            "id -un printed no user name".to_string(),
        ));
    }
    Ok(output.stdout)
}

/// Replace this process with `sudo <current executable> <args...>`.
///
/// Only returns on failure.
#[cfg(unix)]
pub fn reexec_with_sudo(args: &[OsString]) -> AutoserverError {
    use std::os::unix::process::CommandExt;

    let exe = match std::env::current_exe() {
        Ok(exe) => exe,
        Err(e) => {
            return AutoserverError::CommandError(format!(
                "cannot locate the autoserver executable: {}",
                e
            ));
        }
    };

    tracing::debug!(exe = %exe.display(), "re-executing through sudo");
    let err = Command::new("sudo")
        .arg("--preserve-env")
        .arg(exe)
        .args(args)
        .exec();

    AutoserverError::CommandError(format!("failed to execute sudo: {}", err))
}

#[cfg(not(unix))]
pub fn reexec_with_sudo(_args: &[OsString]) -> AutoserverError {
    AutoserverError::CommandError("privilege escalation is only supported on unix hosts".to_string())
}

/// Human-readable command line for logs and error messages.
fn command_line<S: AsRef<OsStr>>(program: &str, args: &[S]) -> String {
    let mut line = program.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&arg.as_ref().to_string_lossy());
    }
    line
}
