//! Command implementations for autoserver.
//!
//! Routes parsed CLI commands to their handlers.

mod deploy;
mod setup;

use crate::cli::Command;
use crate::error::Result;

/// Dispatch a command to its implementation.
pub fn dispatch(command: Command) -> Result<()> {
    match command {
        Command::Setup(args) => setup::cmd_setup(args),
        Command::Deploy(args) => deploy::cmd_deploy(args),
    }
}
